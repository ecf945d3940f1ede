//! Tipos de error por capa.
//!
//! - `ErrorFecha`: fallo de normalización de una fecha (nunca se propaga
//!   como pánico; el llamador decide si omite el registro o aborta).
//! - `ErrorAlmacen`: fallos del colaborador tabular (hojas, lectura, escritura).
//! - `ErrorCalculo`: resultado "sin reporte" de un cálculo de cobertura.
//! - `ErrorAccion`: fallos de las acciones de escritura (crear/anular).

use chrono::NaiveDate;
use thiserror::Error;

/// Motivo por el que un valor no pudo convertirse en fecha.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorFecha {
    #[error("celda vacía")]
    Vacia,
    #[error("formato de fecha no reconocido: '{0}'")]
    Formato(String),
    #[error("el valor no es una fecha: {0}")]
    TipoNoSoportado(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorAlmacen {
    #[error("no existe la hoja '{0}' en el almacén")]
    HojaFaltante(String),
    #[error("no se pudo leer '{origen}': {detalle}")]
    Lectura { origen: String, detalle: String },
    #[error("no se pudo escribir en '{hoja}': {detalle}")]
    Escritura { hoja: String, detalle: String },
    #[error("la hoja '{hoja}' no tiene columna '{columna}'")]
    ColumnaFaltante { hoja: String, columna: String },
    #[error("fila {fila} fuera de rango en la hoja '{hoja}'")]
    FilaFueraDeRango { hoja: String, fila: usize },
}

/// Un cálculo de cobertura que no produce reporte.
///
/// Sólo `Configuracion` es fatal; el resto se resuelve por curso (el operador
/// elige otro curso o corrige los datos).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorCalculo {
    #[error("error de configuración: {0}")]
    Configuracion(#[from] ErrorAlmacen),
    #[error("la tabla de cursos está vacía")]
    SinCursos,
    #[error("la tabla '{tabla}' no tiene la columna requerida '{columna}'")]
    ColumnaFaltante { tabla: String, columna: String },
    #[error("curso '{0}' no encontrado")]
    CursoNoEncontrado(String),
    #[error("fecha inválida en '{campo}' del curso '{curso}': {causa}")]
    FechaInvalida {
        curso: String,
        campo: String,
        causa: ErrorFecha,
    },
    #[error("el inicio ({inicio}) es posterior al fin ({fin}); no se puede programar")]
    RangoInvertido { inicio: NaiveDate, fin: NaiveDate },
}

impl ErrorCalculo {
    pub fn es_fatal(&self) -> bool {
        matches!(self, ErrorCalculo::Configuracion(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorAccion {
    #[error("datos inválidos: {0}")]
    Validacion(String),
    #[error("interrupción '{0}' no encontrada")]
    NoEncontrada(String),
    #[error("la interrupción '{0}' ya está cancelada")]
    YaCancelada(String),
    #[error(transparent)]
    Almacen(#[from] ErrorAlmacen),
}
