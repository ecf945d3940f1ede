use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Valor de una celda tal como llega del almacén tabular.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Celda {
    Vacia,
    Texto(String),
    Numero(f64),
    /// Celda con tipo fecha/fecha-hora nativo de la planilla.
    Fecha(NaiveDateTime),
    Booleano(bool),
}

static VACIA: Celda = Celda::Vacia;

impl Celda {
    /// Construye una celda desde texto libre; el texto en blanco es `Vacia`.
    pub fn texto_o_vacia(s: &str) -> Celda {
        if s.trim().is_empty() {
            Celda::Vacia
        } else {
            Celda::Texto(s.to_string())
        }
    }

    pub fn es_vacia(&self) -> bool {
        match self {
            Celda::Vacia => true,
            Celda::Texto(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Representación textual recortada. Los números enteros se muestran sin
    /// decimales para que un id `101` leído como `101.0` siga siendo "101".
    pub fn texto(&self) -> String {
        match self {
            Celda::Vacia => String::new(),
            Celda::Texto(s) => s.trim().to_string(),
            Celda::Numero(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", *f as i64)
                } else {
                    format!("{}", f)
                }
            }
            Celda::Fecha(dt) => {
                if dt.time().num_seconds_from_midnight() == 0 {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            Celda::Booleano(b) => b.to_string(),
        }
    }

    /// Valor numérico; acepta texto con coma decimal ("12,5").
    pub fn numero(&self) -> Option<f64> {
        match self {
            Celda::Numero(f) => Some(*f),
            Celda::Texto(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        }
    }
}

/// Instantánea de una hoja: encabezados (fila 1) y filas de datos en orden.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tabla {
    pub encabezados: Vec<String>,
    pub filas: Vec<Vec<Celda>>,
}

impl Tabla {
    pub fn new<S: AsRef<str>>(encabezados: &[S]) -> Self {
        Tabla {
            encabezados: encabezados.iter().map(|h| h.as_ref().to_string()).collect(),
            filas: Vec::new(),
        }
    }

    /// Tabla a partir de filas de texto (`""` se guarda como celda vacía).
    pub fn desde_texto(encabezados: &[&str], filas: &[&[&str]]) -> Self {
        let mut t = Tabla::new(encabezados);
        for fila in filas {
            t.filas.push(fila.iter().map(|v| Celda::texto_o_vacia(v)).collect());
        }
        t
    }

    pub fn con_fila(mut self, fila: Vec<Celda>) -> Self {
        self.filas.push(fila);
        self
    }

    /// Índice de la columna cuyo encabezado, sin espacios en los extremos,
    /// coincide exactamente con `nombre`.
    pub fn columna(&self, nombre: &str) -> Option<usize> {
        let clave = nombre.trim();
        self.encabezados.iter().position(|h| h.trim() == clave)
    }

    /// Celda en (fila, columna); fuera de rango se lee como vacía.
    pub fn celda(&self, fila: usize, col: usize) -> &Celda {
        self.filas
            .get(fila)
            .and_then(|r| r.get(col))
            .unwrap_or(&VACIA)
    }

    pub fn len(&self) -> usize {
        self.filas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filas.is_empty()
    }
}
