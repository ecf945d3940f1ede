//! Almacén respaldado por un libro `.xlsx` en disco.
//!
//! Cada lectura vuelve a abrir el archivo (sin caché), así cada cálculo ve
//! la última versión. Las escrituras usan `umya-spreadsheet` con el ciclo
//! leer-modificar-guardar del libro completo.

use std::path::{Path, PathBuf};
use tracing::{info, warn};
use umya_spreadsheet::{Worksheet, Spreadsheet};

use crate::error::ErrorAlmacen;
use crate::excel::io::{leer_hoja, listar_hojas};
use crate::excel::tabla::Tabla;
use crate::excel::AlmacenTabular;

#[derive(Debug, Clone)]
pub struct LibroExcel {
    ruta: PathBuf,
}

impl LibroExcel {
    pub fn new<P: AsRef<Path>>(ruta: P) -> Self {
        LibroExcel { ruta: ruta.as_ref().to_path_buf() }
    }

    pub fn ruta(&self) -> &Path {
        &self.ruta
    }

    fn abrir(&self) -> Result<Spreadsheet, ErrorAlmacen> {
        umya_spreadsheet::reader::xlsx::read(&self.ruta).map_err(|e| ErrorAlmacen::Lectura {
            origen: self.ruta.display().to_string(),
            detalle: e.to_string(),
        })
    }

    fn guardar(&self, libro: &Spreadsheet, hoja: &str) -> Result<(), ErrorAlmacen> {
        umya_spreadsheet::writer::xlsx::write(libro, &self.ruta).map_err(|e| ErrorAlmacen::Escritura {
            hoja: hoja.to_string(),
            detalle: e.to_string(),
        })
    }
}

/// Fila de encabezados: la primera fila con algún valor, igual que el
/// inicio del rango que entrega calamine al leer. Hoja vacía => fila 1.
fn fila_encabezados(ws: &Worksheet) -> u32 {
    let max_col = ws.get_highest_column();
    (1..=ws.get_highest_row())
        .find(|&r| (1..=max_col).any(|c| !ws.get_value((c, r)).trim().is_empty()))
        .unwrap_or(1)
}

/// Encabezados recortados de la fila `fila`. Posición i => columna i + 1.
fn encabezados(ws: &Worksheet, fila: u32) -> Vec<String> {
    (1..=ws.get_highest_column())
        .map(|col| ws.get_value((col, fila)).trim().to_string())
        .collect()
}

impl AlmacenTabular for LibroExcel {
    fn leer_tabla(&self, hoja: &str) -> Result<Tabla, ErrorAlmacen> {
        leer_hoja(&self.ruta, hoja)
    }

    fn hojas(&self) -> Result<Vec<String>, ErrorAlmacen> {
        listar_hojas(&self.ruta)
    }

    fn agregar_fila(&mut self, hoja: &str, valores: &[(&str, String)]) -> Result<(), ErrorAlmacen> {
        let mut libro = self.abrir()?;
        let ws = libro
            .get_sheet_by_name_mut(hoja)
            .ok_or_else(|| ErrorAlmacen::HojaFaltante(hoja.to_string()))?;

        let headers = encabezados(ws, fila_encabezados(ws));
        let ubicados: Vec<(u32, &String)> = valores
            .iter()
            .filter_map(|(columna, valor)| match headers.iter().position(|h| h == columna.trim()) {
                Some(idx) => Some((idx as u32 + 1, valor)),
                None => {
                    warn!(hoja, columna, "columna ausente en la hoja; valor omitido");
                    None
                }
            })
            .collect();
        // ninguna columna reconocida: los encabezados no están donde se esperan
        if ubicados.is_empty() {
            if let Some((columna, _)) = valores.first() {
                return Err(ErrorAlmacen::ColumnaFaltante {
                    hoja: hoja.to_string(),
                    columna: columna.to_string(),
                });
            }
        }

        let fila = ws.get_highest_row().max(1) + 1;
        for (col, valor) in ubicados {
            ws.get_cell_mut((col, fila)).set_value_string(valor.clone());
        }

        self.guardar(&libro, hoja)?;
        info!(hoja, fila, "fila agregada en {}", self.ruta.display());
        Ok(())
    }

    fn actualizar_celda(&mut self, hoja: &str, fila: usize, columna: &str, valor: &str) -> Result<(), ErrorAlmacen> {
        let mut libro = self.abrir()?;
        let ws = libro
            .get_sheet_by_name_mut(hoja)
            .ok_or_else(|| ErrorAlmacen::HojaFaltante(hoja.to_string()))?;

        let fila_enc = fila_encabezados(ws);
        let idx = encabezados(ws, fila_enc)
            .iter()
            .position(|h| h == columna.trim())
            .ok_or_else(|| ErrorAlmacen::ColumnaFaltante {
                hoja: hoja.to_string(),
                columna: columna.to_string(),
            })?;

        // la fila de datos 0 está justo debajo de los encabezados
        let fila_hoja = fila_enc + 1 + fila as u32;
        if fila_hoja > ws.get_highest_row() {
            return Err(ErrorAlmacen::FilaFueraDeRango { hoja: hoja.to_string(), fila });
        }
        ws.get_cell_mut((idx as u32 + 1, fila_hoja)).set_value_string(valor);

        self.guardar(&libro, hoja)?;
        info!(hoja, fila, columna, "celda actualizada en {}", self.ruta.display());
        Ok(())
    }
}
