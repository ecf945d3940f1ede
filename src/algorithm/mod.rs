// Módulo de alto nivel para el cálculo de cobertura de un curso.
// Flujo: snapshot -> fechas del curso -> filtro de interrupciones ->
// simulación día a día -> cobertura -> reporte.
pub mod coverage;
pub mod dates;
pub mod filters;
pub mod report;
pub mod simulator;

pub use coverage::{compute_coverage, required_hours};
pub use dates::normalize_date;
pub use filters::filter_interruptions;
pub use report::assemble_report;
pub use simulator::{classify_day, simulate_schedule, Simulacion};

use tracing::info;

use crate::error::ErrorCalculo;
use crate::excel::{columnas, hojas, leer_snapshot, AlmacenTabular, Snapshot};
use crate::models::ReporteCobertura;

/// Calcula el reporte de cobertura de `curso_id` sobre una instantánea.
///
/// Todo fallo de datos vuelve como `Err` (sin reporte); no hay pánicos.
pub fn calcular_cobertura(snapshot: &Snapshot, curso_id: &str) -> Result<ReporteCobertura, ErrorCalculo> {
    if let Some(columna) = snapshot.columnas_faltantes_cursos.first() {
        return Err(ErrorCalculo::ColumnaFaltante {
            tabla: hojas::CURSOS.to_string(),
            columna: columna.clone(),
        });
    }
    if snapshot.cursos.is_empty() {
        return Err(ErrorCalculo::SinCursos);
    }
    let curso = snapshot
        .curso(curso_id)
        .ok_or_else(|| ErrorCalculo::CursoNoEncontrado(curso_id.trim().to_string()))?;

    let inicio = normalize_date(&curso.inicio).map_err(|causa| ErrorCalculo::FechaInvalida {
        curso: curso.id.clone(),
        campo: columnas::INICIO_CLASES.to_string(),
        causa,
    })?;
    let fin = normalize_date(&curso.fin).map_err(|causa| ErrorCalculo::FechaInvalida {
        curso: curso.id.clone(),
        campo: columnas::FIN_CLASES.to_string(),
        causa,
    })?;

    let aplicables = filter_interruptions(&snapshot.interrupciones, &curso.id);
    let sim = simulate_schedule(inicio, fin, &aplicables)?;

    let horas_requeridas = required_hours(&snapshot.materias, &curso.id);
    let cobertura = compute_coverage(sim.horas_disponibles, horas_requeridas);

    info!(
        curso = %curso.id,
        interrupciones = aplicables.len(),
        perdidos = sim.dias_perdidos,
        horas = sim.horas_disponibles,
        cobertura,
        "cobertura calculada"
    );

    Ok(assemble_report(
        &curso.id,
        inicio,
        fin,
        sim,
        horas_requeridas,
        cobertura,
        snapshot.advertencias.clone(),
    ))
}

/// Relee el almacén y calcula. Cada llamada trabaja con su propia instantánea;
/// una hoja ausente o ilegible vuelve como `ErrorCalculo::Configuracion`.
pub fn calcular_cobertura_desde(almacen: &dyn AlmacenTabular, curso_id: &str) -> Result<ReporteCobertura, ErrorCalculo> {
    let snapshot = leer_snapshot(almacen)?;
    calcular_cobertura(&snapshot, curso_id)
}
