// Estructuras de datos principales

use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::excel::Celda;

/// Horas pedagógicas que aporta cada día hábil sin interrupción.
pub const HORAS_PEDAGOGICAS_POR_DIA: u32 = 6;

/// Curso tal como figura en la hoja CURSOS. Las fechas quedan en bruto:
/// se normalizan en cada cálculo.
#[derive(Debug, Clone, Serialize)]
pub struct Curso {
    pub id: String,
    pub inicio: Celda,
    pub fin: Celda,
}

#[derive(Debug, Clone, Serialize)]
pub struct Materia {
    /// `None` cuando la hoja no tiene columna `Curso`.
    pub curso: Option<String>,
    pub horas_totales: f64,
}

/// Alcance de una interrupción: todos los cursos o uno en particular.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo", content = "curso", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alcance {
    #[default]
    Global,
    Especifico(String),
}

impl Alcance {
    pub fn aplica_a(&self, curso_id: &str) -> bool {
        match self {
            Alcance::Global => true,
            Alcance::Especifico(curso) => curso == curso_id,
        }
    }

    /// Valor de la columna `Alcance`.
    pub fn etiqueta(&self) -> &'static str {
        match self {
            Alcance::Global => "GLOBAL",
            Alcance::Especifico(_) => "ESPECIFICO",
        }
    }

    /// Valor de la columna `Afectados` (vacío para GLOBAL).
    pub fn afectados(&self) -> &str {
        match self {
            Alcance::Global => "",
            Alcance::Especifico(curso) => curso,
        }
    }
}

/// Ciclo de vida: `Activa -> Cancelada`, sin vuelta atrás.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoInterrupcion {
    Activa,
    Cancelada,
}

impl EstadoInterrupcion {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoInterrupcion::Activa => "ACTIVO",
            EstadoInterrupcion::Cancelada => "CANCELADO",
        }
    }

    /// Interpreta el texto de la columna `Estado`. Una celda vacía no es
    /// un estado.
    pub fn desde_etiqueta(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVO" | "ACTIVA" => Some(EstadoInterrupcion::Activa),
            "CANCELADO" | "CANCELADA" | "ANULADO" | "ANULADA" => Some(EstadoInterrupcion::Cancelada),
            _ => None,
        }
    }
}

/// Interrupción ya normalizada: fechas válidas y `inicio <= fin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interrupcion {
    pub id: String,
    pub nombre: String,
    pub inicio: NaiveDate,
    pub fin: NaiveDate,
    pub tipo: String,
    pub alcance: Alcance,
    pub estado: EstadoInterrupcion,
    pub justificacion: String,
}

impl Interrupcion {
    /// Intervalo cerrado en ambos extremos.
    pub fn contiene(&self, fecha: NaiveDate) -> bool {
        self.inicio <= fecha && fecha <= self.fin
    }

    pub fn esta_activa(&self) -> bool {
        self.estado == EstadoInterrupcion::Activa
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccionAuditoria {
    Crear,
    Anular,
    Otra(String),
}

impl AccionAuditoria {
    pub fn etiqueta(&self) -> &str {
        match self {
            AccionAuditoria::Crear => "CREAR",
            AccionAuditoria::Anular => "ANULAR",
            AccionAuditoria::Otra(s) => s,
        }
    }

    pub fn desde_etiqueta(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "CREAR" | "CREATE" => AccionAuditoria::Crear,
            "ANULAR" | "CANCEL" => AccionAuditoria::Anular,
            _ => AccionAuditoria::Otra(s.trim().to_string()),
        }
    }
}

impl Serialize for AccionAuditoria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.etiqueta())
    }
}

/// Fila de HISTORIAL_CAMBIOS. Sólo se agregan, nunca se modifican.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistroAuditoria {
    pub timestamp: String,
    pub usuario: String,
    pub accion: AccionAuditoria,
    pub id_evento: String,
    pub justificacion: String,
}

/// Clasificación de un día del calendario del curso.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstadoDia {
    Clase,
    FinDeSemana,
    /// Lleva el nombre de la primera interrupción que cubre el día.
    Interrumpido(String),
}

impl EstadoDia {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoDia::Clase => "CLASE",
            EstadoDia::FinDeSemana => "FIN_DE_SEMANA",
            EstadoDia::Interrumpido(_) => "INTERRUMPIDO",
        }
    }
}

impl fmt::Display for EstadoDia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstadoDia::Interrumpido(nombre) => write!(f, "INTERRUMPIDO: {}", nombre),
            otro => f.write_str(otro.etiqueta()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaCalendario {
    pub fecha: NaiveDate,
    pub estado: EstadoDia,
}

impl Serialize for DiaCalendario {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let evento = match &self.estado {
            EstadoDia::Interrumpido(nombre) => Some(nombre.as_str()),
            _ => None,
        };
        let mut st = serializer.serialize_struct("DiaCalendario", 3)?;
        st.serialize_field("fecha", &self.fecha)?;
        st.serialize_field("estado", self.estado.etiqueta())?;
        st.serialize_field("evento", &evento)?;
        st.end()
    }
}

/// Resultado de un cálculo de cobertura, listo para la capa de presentación.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReporteCobertura {
    pub curso_id: String,
    pub inicio: NaiveDate,
    pub fin: NaiveDate,
    pub dias_totales: u32,
    pub dias_clase: u32,
    pub dias_fin_de_semana: u32,
    pub dias_perdidos: u32,
    pub horas_disponibles: u32,
    pub horas_requeridas: f64,
    /// Porcentaje entero en [0, 100].
    pub cobertura: u8,
    pub bitacora: Vec<DiaCalendario>,
    pub advertencias: Vec<String>,
}
