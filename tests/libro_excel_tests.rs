use chrono::NaiveDate;
use std::path::Path;
use span::acciones::{anular_interrupcion, leer_historial, registrar_interrupcion, NuevaInterrupcion};
use span::algorithm::calcular_cobertura_desde;
use span::excel::{columnas, hojas, LibroExcel};
use span::models::Alcance;
use span::{AlmacenTabular, ErrorAlmacen, ErrorCalculo};

/// Arma un libro mínimo con las cuatro hojas.
fn crear_libro(path: &Path) {
    crear_libro_con_interrupciones_en(path, 1);
}

/// Igual que `crear_libro`, con los encabezados de INTERRUPCIONES en
/// `fila_encabezados` (las filas de arriba quedan vacías).
fn crear_libro_con_interrupciones_en(path: &Path, fila_encabezados: u32) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let hojas_y_filas: Vec<(&str, Vec<Vec<&str>>)> = vec![
        (
            hojas::CURSOS,
            vec![
                vec![columnas::ID_CURSO, columnas::INICIO_CLASES, columnas::FIN_CLASES],
                vec!["C1", "01/01/2024", "07/01/2024"],
            ],
        ),
        (hojas::MATERIAS, vec![vec![columnas::CURSO, columnas::HORAS_TOTALES], vec!["C1"]]),
        (
            hojas::INTERRUPCIONES,
            vec![vec![
                columnas::ID_EVENTO,
                columnas::NOMBRE_EVENTO,
                columnas::FECHA_INICIO,
                columnas::FECHA_FIN,
                columnas::TIPO,
                columnas::ALCANCE,
                columnas::AFECTADOS,
                columnas::ESTADO,
                columnas::JUSTIFICACION,
            ]],
        ),
        (
            hojas::HISTORIAL,
            vec![vec![
                columnas::TIMESTAMP,
                columnas::USUARIO,
                columnas::ACCION,
                columnas::ID_EVENTO,
                columnas::JUSTIFICACION,
            ]],
        ),
    ];
    for (nombre, filas) in hojas_y_filas {
        let ws = book.new_sheet(nombre).unwrap();
        let desde = if nombre == hojas::INTERRUPCIONES { fila_encabezados } else { 1 };
        for (r, fila) in filas.iter().enumerate() {
            for (c, valor) in fila.iter().enumerate() {
                ws.get_cell_mut((c as u32 + 1, r as u32 + desde)).set_value_string(*valor);
            }
        }
    }
    // horas como número, igual que en el libro real
    book.get_sheet_by_name_mut(hojas::MATERIAS)
        .unwrap()
        .get_cell_mut((2, 2))
        .set_value_number(60);
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

fn ahora() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(8, 0, 0).unwrap()
}

#[test]
fn test_libro_en_disco_ciclo_completo() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("SPAN_BD_2026.xlsx");
    crear_libro(&ruta);
    let mut libro = LibroExcel::new(&ruta);

    let hojas_libro = libro.hojas().unwrap();
    for h in hojas::REQUERIDAS {
        assert!(hojas_libro.iter().any(|x| x == h), "falta la hoja {}", h);
    }

    let r = calcular_cobertura_desde(&libro, "C1").unwrap();
    assert_eq!(r.horas_disponibles, 30);
    assert_eq!(r.horas_requeridas, 60.0);
    assert_eq!(r.cobertura, 50);

    let nueva = NuevaInterrupcion {
        id: "E1".to_string(),
        nombre: "Feriado".to_string(),
        fecha_inicio: "03/01/2024".to_string(),
        fecha_fin: "04/01/2024".to_string(),
        tipo: "FERIADO".to_string(),
        alcance: Alcance::Global,
        justificacion: "Decreto".to_string(),
    };
    let res = registrar_interrupcion(&mut libro, nueva, "oficial", ahora()).unwrap();
    assert_eq!(res.advertencia, None);

    // otra instancia sobre el mismo archivo ve el cambio
    let r = calcular_cobertura_desde(&LibroExcel::new(&ruta), "C1").unwrap();
    assert_eq!(r.dias_perdidos, 2);
    assert_eq!(r.horas_disponibles, 18);
    assert_eq!(r.cobertura, 30);

    anular_interrupcion(&mut libro, "E1", "jefe", "Se suspende el feriado", ahora()).unwrap();
    let r = calcular_cobertura_desde(&libro, "C1").unwrap();
    assert_eq!(r.dias_perdidos, 0);

    let historial = leer_historial(&libro).unwrap();
    assert_eq!(historial.len(), 2);
    assert_eq!(historial[1].id_evento, "E1");
    assert_eq!(historial[1].timestamp, "2024-01-02 08:00:00");
}

#[test]
fn test_libro_inexistente_es_error_de_configuracion() {
    let dir = tempfile::tempdir().unwrap();
    let libro = LibroExcel::new(dir.path().join("no_existe.xlsx"));
    assert!(matches!(libro.hojas(), Err(ErrorAlmacen::Lectura { .. })));
    assert!(matches!(
        calcular_cobertura_desde(&libro, "C1"),
        Err(ErrorCalculo::Configuracion(ErrorAlmacen::Lectura { .. }))
    ));
}

#[test]
fn test_actualizar_fila_fuera_de_rango() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("libro.xlsx");
    crear_libro(&ruta);
    let mut libro = LibroExcel::new(&ruta);
    assert_eq!(
        libro.actualizar_celda(hojas::INTERRUPCIONES, 5, columnas::ESTADO, "CANCELADO"),
        Err(ErrorAlmacen::FilaFueraDeRango { hoja: hojas::INTERRUPCIONES.to_string(), fila: 5 })
    );
    assert!(matches!(
        libro.agregar_fila("NO_EXISTE", &[]),
        Err(ErrorAlmacen::HojaFaltante(_))
    ));
}

fn feriado() -> NuevaInterrupcion {
    NuevaInterrupcion {
        id: "E1".to_string(),
        nombre: "Feriado".to_string(),
        fecha_inicio: "03/01/2024".to_string(),
        fecha_fin: "04/01/2024".to_string(),
        tipo: String::new(),
        alcance: Alcance::Global,
        justificacion: "Decreto".to_string(),
    }
}

#[test]
fn test_encabezados_bajo_filas_vacias() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("libro.xlsx");
    crear_libro_con_interrupciones_en(&ruta, 3);
    let mut libro = LibroExcel::new(&ruta);

    registrar_interrupcion(&mut libro, feriado(), "oficial", ahora()).unwrap();
    let t = libro.leer_tabla(hojas::INTERRUPCIONES).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.celda(0, t.columna(columnas::ID_EVENTO).unwrap()).texto(), "E1");
    assert_eq!(calcular_cobertura_desde(&libro, "C1").unwrap().dias_perdidos, 2);

    // la fila que se anula es la misma que se leyó
    anular_interrupcion(&mut libro, "E1", "jefe", "motivo", ahora()).unwrap();
    let t = libro.leer_tabla(hojas::INTERRUPCIONES).unwrap();
    assert_eq!(t.celda(0, t.columna(columnas::ESTADO).unwrap()).texto(), "CANCELADO");
    assert_eq!(calcular_cobertura_desde(&libro, "C1").unwrap().dias_perdidos, 0);
}

#[test]
fn test_titulo_sobre_los_encabezados_es_columna_faltante() {
    let dir = tempfile::tempdir().unwrap();
    let ruta = dir.path().join("libro.xlsx");
    crear_libro_con_interrupciones_en(&ruta, 2);
    let mut book = umya_spreadsheet::reader::xlsx::read(&ruta).unwrap();
    book.get_sheet_by_name_mut(hojas::INTERRUPCIONES)
        .unwrap()
        .get_cell_mut((1, 1))
        .set_value_string("Interrupciones 2024");
    umya_spreadsheet::writer::xlsx::write(&book, &ruta).unwrap();

    let mut libro = LibroExcel::new(&ruta);
    assert_eq!(
        libro.agregar_fila(hojas::INTERRUPCIONES, &[(columnas::ID_EVENTO, "E1".to_string())]),
        Err(ErrorAlmacen::ColumnaFaltante {
            hoja: hojas::INTERRUPCIONES.to_string(),
            columna: columnas::ID_EVENTO.to_string(),
        })
    );
    assert!(matches!(
        registrar_interrupcion(&mut libro, feriado(), "oficial", ahora()),
        Err(span::ErrorAccion::Almacen(ErrorAlmacen::ColumnaFaltante { .. }))
    ));
    // nada se escribió bajo el título
    assert!(libro.leer_tabla(hojas::INTERRUPCIONES).unwrap().filas.len() == 1);
}
