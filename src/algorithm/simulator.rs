//! Simulación día a día del calendario de un curso.
//!
//! Para cada fecha de `[inicio, fin]` (ambos incluidos):
//! 1. sábado o domingo (índice >= 5 con lunes = 0) => `FinDeSemana`;
//! 2. si alguna interrupción cubre la fecha => `Interrumpido` con el nombre
//!    de la primera en orden del filtro, y suma un día perdido;
//! 3. si no => `Clase`, que aporta `HORAS_PEDAGOGICAS_POR_DIA`.
//!
//! El fin de semana tiene prioridad: un sábado dentro de una interrupción no
//! cuenta como día perdido.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::ErrorCalculo;
use crate::models::{DiaCalendario, EstadoDia, Interrupcion, HORAS_PEDAGOGICAS_POR_DIA};

/// Métricas acumuladas de una pasada por el calendario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Simulacion {
    pub bitacora: Vec<DiaCalendario>,
    pub dias_perdidos: u32,
    pub horas_disponibles: u32,
    pub dias_clase: u32,
    pub dias_fin_de_semana: u32,
}

impl Simulacion {
    pub fn dias_totales(&self) -> u32 {
        self.bitacora.len() as u32
    }
}

pub fn es_fin_de_semana(fecha: NaiveDate) -> bool {
    fecha.weekday().num_days_from_monday() >= 5
}

/// Clasifica una fecha frente a las interrupciones ya filtradas.
pub fn classify_day(fecha: NaiveDate, interrupciones: &[&Interrupcion]) -> EstadoDia {
    if es_fin_de_semana(fecha) {
        return EstadoDia::FinDeSemana;
    }
    match interrupciones.iter().find(|i| i.contiene(fecha)) {
        Some(i) => EstadoDia::Interrumpido(i.nombre.clone()),
        None => EstadoDia::Clase,
    }
}

/// Recorre el rango y acumula días perdidos y horas disponibles.
///
/// Un rango invertido no se trata como "cero días de clase": se informa
/// como `ErrorCalculo::RangoInvertido`.
pub fn simulate_schedule(
    inicio: NaiveDate,
    fin: NaiveDate,
    interrupciones: &[&Interrupcion],
) -> Result<Simulacion, ErrorCalculo> {
    if inicio > fin {
        return Err(ErrorCalculo::RangoInvertido { inicio, fin });
    }

    let total = (fin - inicio).num_days() as usize + 1;
    let mut sim = Simulacion {
        bitacora: Vec::with_capacity(total),
        ..Simulacion::default()
    };

    for fecha in inicio.iter_days().take(total) {
        let estado = classify_day(fecha, interrupciones);
        match &estado {
            EstadoDia::Clase => {
                sim.dias_clase += 1;
                sim.horas_disponibles += HORAS_PEDAGOGICAS_POR_DIA;
            }
            EstadoDia::FinDeSemana => sim.dias_fin_de_semana += 1,
            EstadoDia::Interrumpido(_) => sim.dias_perdidos += 1,
        }
        sim.bitacora.push(DiaCalendario { fecha, estado });
    }

    debug!(
        %inicio,
        %fin,
        dias = total,
        perdidos = sim.dias_perdidos,
        horas = sim.horas_disponibles,
        "simulación completada"
    );
    Ok(sim)
}
