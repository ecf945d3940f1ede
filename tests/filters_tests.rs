use chrono::NaiveDate;
use span::algorithm::{classify_day, filter_interruptions, normalize_date};
use span::excel::Celda;
use span::models::{Alcance, EstadoDia, EstadoInterrupcion, Interrupcion};

fn d(y: i32, m: u32, dia: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, dia).unwrap()
}

fn interrupcion(id: &str, alcance: Alcance, estado: EstadoInterrupcion) -> Interrupcion {
    Interrupcion {
        id: id.to_string(),
        nombre: format!("Evento {}", id),
        inicio: d(2024, 1, 2),
        fin: d(2024, 1, 3),
        tipo: String::new(),
        alcance,
        estado,
        justificacion: String::new(),
    }
}

#[test]
fn test_filtro_por_alcance_y_estado() {
    let todas = vec![
        interrupcion("G", Alcance::Global, EstadoInterrupcion::Activa),
        interrupcion("X", Alcance::Especifico("C1".into()), EstadoInterrupcion::Activa),
        interrupcion("Y", Alcance::Especifico("C2".into()), EstadoInterrupcion::Activa),
        interrupcion("Z", Alcance::Global, EstadoInterrupcion::Cancelada),
    ];
    let ids = |curso: &str| -> Vec<String> {
        filter_interruptions(&todas, curso).iter().map(|i| i.id.clone()).collect()
    };
    assert_eq!(ids("C1"), vec!["G", "X"]);
    assert_eq!(ids("C2"), vec!["G", "Y"]);
    assert_eq!(ids("C3"), vec!["G"]);
}

#[test]
fn test_clasificacion_de_dias() {
    let i = interrupcion("G", Alcance::Global, EstadoInterrupcion::Activa);
    let aplicables = vec![&i];
    // martes 2 y miércoles 3 de enero de 2024, bordes incluidos
    assert_eq!(classify_day(d(2024, 1, 2), &aplicables), EstadoDia::Interrumpido("Evento G".into()));
    assert_eq!(classify_day(d(2024, 1, 3), &aplicables), EstadoDia::Interrumpido("Evento G".into()));
    assert_eq!(classify_day(d(2024, 1, 4), &aplicables), EstadoDia::Clase);
    assert_eq!(classify_day(d(2024, 1, 6), &aplicables), EstadoDia::FinDeSemana);
}

#[test]
fn test_fecha_ambigua_dia_primero() {
    assert_eq!(normalize_date(&Celda::Texto("05/03/2026".into())), Ok(d(2026, 3, 5)));
    assert_eq!(normalize_date(&Celda::Texto("2026-03-05".into())), Ok(d(2026, 3, 5)));
    assert!(normalize_date(&Celda::Vacia).is_err());
    assert!(normalize_date(&Celda::Texto("32/01/2026".into())).is_err());
}
