use std::collections::HashMap;
use tracing::warn;

use crate::error::ErrorAlmacen;
use crate::excel::tabla::{Celda, Tabla};
use crate::excel::AlmacenTabular;

/// Almacén en memoria: mismas reglas que el libro Excel, sin disco.
#[derive(Debug, Clone, Default)]
pub struct AlmacenMemoria {
    tablas: HashMap<String, Tabla>,
    /// Hojas en las que toda escritura falla (para simular fallos del colaborador).
    solo_lectura: Vec<String>,
}

impl AlmacenMemoria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn con_tabla(mut self, hoja: &str, tabla: Tabla) -> Self {
        self.tablas.insert(hoja.to_string(), tabla);
        self
    }

    pub fn con_hoja_solo_lectura(mut self, hoja: &str) -> Self {
        self.solo_lectura.push(hoja.to_string());
        self
    }

    pub fn tabla(&self, hoja: &str) -> Option<&Tabla> {
        self.tablas.get(hoja)
    }

    fn tabla_escribible(&mut self, hoja: &str) -> Result<&mut Tabla, ErrorAlmacen> {
        if self.solo_lectura.iter().any(|h| h == hoja) {
            return Err(ErrorAlmacen::Escritura {
                hoja: hoja.to_string(),
                detalle: "hoja de solo lectura".to_string(),
            });
        }
        self.tablas
            .get_mut(hoja)
            .ok_or_else(|| ErrorAlmacen::HojaFaltante(hoja.to_string()))
    }
}

impl AlmacenTabular for AlmacenMemoria {
    fn leer_tabla(&self, hoja: &str) -> Result<Tabla, ErrorAlmacen> {
        self.tablas
            .get(hoja)
            .cloned()
            .ok_or_else(|| ErrorAlmacen::HojaFaltante(hoja.to_string()))
    }

    fn hojas(&self) -> Result<Vec<String>, ErrorAlmacen> {
        let mut nombres: Vec<String> = self.tablas.keys().cloned().collect();
        nombres.sort();
        Ok(nombres)
    }

    fn agregar_fila(&mut self, hoja: &str, valores: &[(&str, String)]) -> Result<(), ErrorAlmacen> {
        let tabla = self.tabla_escribible(hoja)?;
        let mut fila = vec![Celda::Vacia; tabla.encabezados.len()];
        let mut ubicados = 0;
        for (columna, valor) in valores {
            match tabla.columna(columna) {
                Some(idx) => {
                    fila[idx] = Celda::texto_o_vacia(valor);
                    ubicados += 1;
                }
                None => warn!(hoja, columna, "columna ausente en la hoja; valor omitido"),
            }
        }
        if ubicados == 0 {
            if let Some((columna, _)) = valores.first() {
                return Err(ErrorAlmacen::ColumnaFaltante {
                    hoja: hoja.to_string(),
                    columna: columna.to_string(),
                });
            }
        }
        tabla.filas.push(fila);
        Ok(())
    }

    fn actualizar_celda(&mut self, hoja: &str, fila: usize, columna: &str, valor: &str) -> Result<(), ErrorAlmacen> {
        let tabla = self.tabla_escribible(hoja)?;
        let idx = tabla.columna(columna).ok_or_else(|| ErrorAlmacen::ColumnaFaltante {
            hoja: hoja.to_string(),
            columna: columna.to_string(),
        })?;
        let row = tabla
            .filas
            .get_mut(fila)
            .ok_or_else(|| ErrorAlmacen::FilaFueraDeRango { hoja: hoja.to_string(), fila })?;
        if row.len() <= idx {
            row.resize(idx + 1, Celda::Vacia);
        }
        row[idx] = Celda::texto_o_vacia(valor);
        Ok(())
    }
}
