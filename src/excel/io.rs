use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::debug;

use crate::error::ErrorAlmacen;
use crate::excel::tabla::{Celda, Tabla};

/// Convierte un `Data` de calamine en `Celda`.
///
/// Las celdas con formato fecha se entregan como `Celda::Fecha`; las fechas
/// ISO que calamine deja como texto también se reconocen aquí.
pub fn data_to_celda(d: &Data) -> Celda {
    match d {
        Data::String(s) => Celda::texto_o_vacia(s),
        Data::Float(f) => Celda::Numero(*f),
        Data::Int(i) => Celda::Numero(*i as f64),
        Data::Bool(b) => Celda::Booleano(*b),
        Data::Empty => Celda::Vacia,
        Data::Error(_) => Celda::Vacia,
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Celda::Fecha(ndt),
            None => Celda::Numero(dt.as_f64()),
        },
        Data::DateTimeIso(s) => iso_to_celda(s),
        Data::DurationIso(s) => Celda::Texto(s.clone()),
    }
}

fn iso_to_celda(s: &str) -> Celda {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Celda::Fecha(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Celda::Fecha(d.and_time(chrono::NaiveTime::MIN));
    }
    Celda::texto_o_vacia(s)
}

/// Lee una hoja completa. La primera fila del rango son los encabezados.
pub fn leer_hoja<P: AsRef<Path>>(path: P, hoja: &str) -> Result<Tabla, ErrorAlmacen> {
    let origen = path.as_ref().display().to_string();
    let mut workbook = open_workbook_auto(path.as_ref()).map_err(|e| ErrorAlmacen::Lectura {
        origen: origen.clone(),
        detalle: e.to_string(),
    })?;

    if !workbook.sheet_names().iter().any(|s| s == hoja) {
        return Err(ErrorAlmacen::HojaFaltante(hoja.to_string()));
    }

    let range = workbook.worksheet_range(hoja).map_err(|e| ErrorAlmacen::Lectura {
        origen: format!("{}[{}]", origen, hoja),
        detalle: e.to_string(),
    })?;

    let mut rows = range.rows();
    let encabezados: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| data_to_celda(c).texto()).collect(),
        None => Vec::new(),
    };
    let mut tabla = Tabla::new(&encabezados);
    for r in rows {
        tabla.filas.push(r.iter().map(data_to_celda).collect());
    }
    debug!(hoja, filas = tabla.len(), "hoja leída desde {}", origen);
    Ok(tabla)
}

/// Lista las hojas del libro en el orden que reporta la librería.
pub fn listar_hojas<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ErrorAlmacen> {
    let workbook = open_workbook_auto(path.as_ref()).map_err(|e| ErrorAlmacen::Lectura {
        origen: path.as_ref().display().to_string(),
        detalle: e.to_string(),
    })?;
    Ok(workbook.sheet_names())
}
