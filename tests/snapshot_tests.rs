use chrono::NaiveDate;
use span::excel::{columnas, Celda, Snapshot, Tabla};
use span::models::{Alcance, EstadoInterrupcion};

fn cursos() -> Tabla {
    Tabla::desde_texto(
        &[columnas::ID_CURSO, columnas::INICIO_CLASES, columnas::FIN_CLASES],
        &[&["C1", "01/03/2026", "30/06/2026"], &["", "", ""], &[" C2 ", "2026-03-01", "2026-06-30"]],
    )
}

fn materias() -> Tabla {
    Tabla::desde_texto(&[columnas::CURSO, columnas::HORAS_TOTALES], &[&["C1", "120"]])
}

#[test]
fn test_cursos_omite_filas_sin_id() {
    let snap = Snapshot::desde_tablas(&cursos(), &materias(), &Tabla::new(&[columnas::FECHA_INICIO, columnas::FECHA_FIN]));
    let ids: Vec<&str> = snap.cursos.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["C1", "C2"]);
    assert!(snap.curso("C2").is_some());
    assert!(snap.columnas_faltantes_cursos.is_empty());
}

#[test]
fn test_interrupciones_sin_columnas_opcionales() {
    let int = Tabla::desde_texto(
        &[columnas::ID_EVENTO, columnas::NOMBRE_EVENTO, columnas::FECHA_INICIO, columnas::FECHA_FIN],
        &[&["E1", "Paro", "02/03/2026", "03/03/2026"]],
    );
    let snap = Snapshot::desde_tablas(&cursos(), &materias(), &int);

    assert_eq!(snap.interrupciones.len(), 1);
    let i = &snap.interrupciones[0];
    assert_eq!(i.alcance, Alcance::Global);
    assert_eq!(i.estado, EstadoInterrupcion::Activa);
    // una advertencia por cada columna opcional ausente
    assert_eq!(snap.advertencias.len(), 3);
    assert!(snap.advertencias.iter().any(|a| a.contains(columnas::ESTADO)));
}

#[test]
fn test_interrupciones_invalidas_se_omiten_con_advertencia() {
    let int = Tabla::desde_texto(
        &[
            columnas::ID_EVENTO,
            columnas::NOMBRE_EVENTO,
            columnas::FECHA_INICIO,
            columnas::FECHA_FIN,
            columnas::ALCANCE,
            columnas::AFECTADOS,
            columnas::ESTADO,
        ],
        &[
            &["E1", "Buena", "02/03/2026", "03/03/2026", "GLOBAL", "", "ACTIVO"],
            &["E2", "Fecha mala", "31/02/2026", "03/03/2026", "GLOBAL", "", "ACTIVO"],
            &["E3", "Invertida", "05/03/2026", "03/03/2026", "GLOBAL", "", "ACTIVO"],
            &["E4", "Sin curso", "02/03/2026", "03/03/2026", "ESPECIFICO", "", "ACTIVO"],
            &["E5", "Estado raro", "02/03/2026", "03/03/2026", "GLOBAL", "", "PENDIENTE"],
            &["E6", "", "02/03/2026", "02/03/2026", "ESPECIFICO", "C1", "cancelado"],
        ],
    );
    let snap = Snapshot::desde_tablas(&cursos(), &materias(), &int);

    let ids: Vec<&str> = snap.interrupciones.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["E1", "E6"]);
    assert_eq!(snap.advertencias.len(), 4);

    let e6 = &snap.interrupciones[1];
    assert_eq!(e6.alcance, Alcance::Especifico("C1".to_string()));
    assert_eq!(e6.estado, EstadoInterrupcion::Cancelada);
    // sin nombre se usa el id
    assert_eq!(e6.nombre, "E6");
}

#[test]
fn test_fechas_nativas_de_excel() {
    let f = |y, m, d| Celda::Fecha(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap());
    let int = Tabla::new(&[columnas::FECHA_INICIO, columnas::FECHA_FIN, columnas::ESTADO])
        .con_fila(vec![f(2026, 4, 1), f(2026, 4, 2), Celda::Texto("ACTIVO".into())]);
    let snap = Snapshot::desde_tablas(&cursos(), &materias(), &int);
    assert_eq!(snap.interrupciones.len(), 1);
    assert_eq!(snap.interrupciones[0].inicio, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
    // sin id ni nombre: se identifica por la fila de la hoja
    assert_eq!(snap.interrupciones[0].nombre, "fila 2");
}

#[test]
fn test_materias_horas_invalidas_valen_cero() {
    let mat = Tabla::desde_texto(
        &[columnas::CURSO, columnas::HORAS_TOTALES],
        &[&["C1", "40,5"], &["C1", "muchas"], &["C1", "-3"], &["C1", ""]],
    );
    let snap = Snapshot::desde_tablas(&cursos(), &mat, &Tabla::new(&[columnas::FECHA_INICIO, columnas::FECHA_FIN]));
    let horas: Vec<f64> = snap.materias.iter().map(|m| m.horas_totales).collect();
    assert_eq!(horas, vec![40.5, 0.0, 0.0, 0.0]);
    assert_eq!(snap.advertencias.len(), 2);
}

#[test]
fn test_materias_sin_columna_curso() {
    let mat = Tabla::desde_texto(&[columnas::HORAS_TOTALES], &[&["40"]]);
    let snap = Snapshot::desde_tablas(&cursos(), &mat, &Tabla::new(&[columnas::FECHA_INICIO, columnas::FECHA_FIN]));
    assert_eq!(snap.materias[0].curso, None);
    assert_eq!(snap.advertencias.len(), 1);
}

#[test]
fn test_cursos_sin_columna_fin() {
    let c = Tabla::desde_texto(&[columnas::ID_CURSO, columnas::INICIO_CLASES], &[&["C1", "01/03/2026"]]);
    let snap = Snapshot::desde_tablas(&c, &materias(), &Tabla::new(&[columnas::FECHA_INICIO, columnas::FECHA_FIN]));
    assert_eq!(snap.columnas_faltantes_cursos, vec![columnas::FIN_CLASES.to_string()]);
}

#[test]
fn test_celdas_vacias_de_alcance_y_estado() {
    let int = Tabla::desde_texto(
        &[
            columnas::ID_EVENTO,
            columnas::FECHA_INICIO,
            columnas::FECHA_FIN,
            columnas::ALCANCE,
            columnas::AFECTADOS,
            columnas::ESTADO,
        ],
        &[
            &["E1", "02/03/2026", "03/03/2026", "", "C1", "ACTIVO"],
            &["E2", "02/03/2026", "03/03/2026", "", "", "ACTIVO"],
            &["E3", "02/03/2026", "03/03/2026", "GLOBAL", "", ""],
        ],
    );
    let snap = Snapshot::desde_tablas(&cursos(), &materias(), &int);

    assert_eq!(snap.interrupciones.len(), 1);
    assert_eq!(snap.interrupciones[0].id, "E1");
    assert_eq!(snap.interrupciones[0].alcance, Alcance::Especifico("C1".to_string()));
    assert_eq!(snap.advertencias.len(), 2);
    assert!(snap.advertencias.iter().any(|a| a.contains("E2")));
    assert!(snap.advertencias.iter().any(|a| a.contains("E3") && a.contains("estado vacío")));
}
