//! Normalización de fechas.
//!
//! Las celdas pueden traer una fecha nativa de la planilla o texto libre.
//! El texto se interpreta con el día antes que el mes (DD/MM/AAAA) cuando la
//! representación es ambigua; los años con 4 dígitos al inicio (AAAA-MM-DD)
//! se leen en orden ISO. Nunca entra en pánico: el llamador recibe `Err` y
//! decide si omite el registro o aborta el cálculo del curso.

use chrono::NaiveDate;

use crate::error::ErrorFecha;
use crate::excel::Celda;

/// Convierte una celda en fecha de calendario.
pub fn normalize_date(celda: &Celda) -> Result<NaiveDate, ErrorFecha> {
    match celda {
        Celda::Fecha(dt) => Ok(dt.date()),
        Celda::Vacia => Err(ErrorFecha::Vacia),
        Celda::Texto(s) => parse_fecha_texto(s),
        Celda::Numero(n) => Err(ErrorFecha::TipoNoSoportado(format!("número {}", n))),
        Celda::Booleano(b) => Err(ErrorFecha::TipoNoSoportado(format!("booleano {}", b))),
    }
}

/// Interpreta una fecha escrita como texto.
///
/// Acepta `/`, `-` o `.` como separador y descarta una hora final
/// (`"05/03/2026 08:00"`, `"2026-03-05T00:00:00"`). Un año de 2 dígitos se
/// ubica en 1969..=2068.
pub fn parse_fecha_texto(s: &str) -> Result<NaiveDate, ErrorFecha> {
    let limpio = s.trim();
    if limpio.is_empty() {
        return Err(ErrorFecha::Vacia);
    }
    let error = || ErrorFecha::Formato(limpio.to_string());

    let parte_fecha = limpio
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()
        .unwrap_or(limpio);
    let partes: Vec<&str> = parte_fecha.split(['/', '-', '.']).collect();
    if partes.len() != 3
        || partes
            .iter()
            .any(|p| p.is_empty() || p.len() > 4 || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(error());
    }

    let num = |p: &str| p.parse::<u32>().map_err(|_| error());
    let (anio, mes, dia) = if partes[0].len() == 4 {
        (num(partes[0])? as i32, num(partes[1])?, num(partes[2])?)
    } else {
        let anio = match partes[2].len() {
            4 => num(partes[2])? as i32,
            2 => {
                let yy = num(partes[2])? as i32;
                if yy < 69 { 2000 + yy } else { 1900 + yy }
            }
            _ => return Err(error()),
        };
        (anio, num(partes[1])?, num(partes[0])?)
    };

    NaiveDate::from_ymd_opt(anio, mes, dia).ok_or_else(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dia_antes_que_mes() {
        assert_eq!(parse_fecha_texto("05/03/2026"), Ok(ymd(2026, 3, 5)));
        assert_eq!(parse_fecha_texto("5-3-2026"), Ok(ymd(2026, 3, 5)));
        assert_eq!(parse_fecha_texto("25.12.2025"), Ok(ymd(2025, 12, 25)));
    }

    #[test]
    fn test_iso_y_con_hora() {
        assert_eq!(parse_fecha_texto("2026-03-05"), Ok(ymd(2026, 3, 5)));
        assert_eq!(parse_fecha_texto("2026-03-05 00:00:00"), Ok(ymd(2026, 3, 5)));
        assert_eq!(parse_fecha_texto("2026-03-05T08:30:00"), Ok(ymd(2026, 3, 5)));
        assert_eq!(parse_fecha_texto(" 05/03/2026 08:00 "), Ok(ymd(2026, 3, 5)));
    }

    #[test]
    fn test_anio_de_dos_digitos() {
        assert_eq!(parse_fecha_texto("05/03/26"), Ok(ymd(2026, 3, 5)));
        assert_eq!(parse_fecha_texto("05/03/99"), Ok(ymd(1999, 3, 5)));
    }

    #[test]
    fn test_fechas_invalidas() {
        assert_eq!(parse_fecha_texto(""), Err(ErrorFecha::Vacia));
        assert_eq!(parse_fecha_texto("31/02/2026"), Err(ErrorFecha::Formato("31/02/2026".into())));
        assert_eq!(parse_fecha_texto("mañana"), Err(ErrorFecha::Formato("mañana".into())));
        assert!(parse_fecha_texto("05/2026").is_err());
        assert!(parse_fecha_texto("05/03/202").is_err());
    }

    #[test]
    fn test_celdas_no_texto() {
        let dt = ymd(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(normalize_date(&Celda::Fecha(dt)), Ok(ymd(2024, 1, 1)));
        assert_eq!(normalize_date(&Celda::Vacia), Err(ErrorFecha::Vacia));
        assert!(matches!(normalize_date(&Celda::Numero(45000.0)), Err(ErrorFecha::TipoNoSoportado(_))));
    }
}
