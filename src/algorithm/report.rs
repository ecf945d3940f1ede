use chrono::NaiveDate;

use crate::algorithm::simulator::Simulacion;
use crate::models::ReporteCobertura;

/// Empaqueta la simulación y la cobertura en el reporte final. No calcula nada.
pub fn assemble_report(
    curso_id: &str,
    inicio: NaiveDate,
    fin: NaiveDate,
    sim: Simulacion,
    horas_requeridas: f64,
    cobertura: u8,
    advertencias: Vec<String>,
) -> ReporteCobertura {
    ReporteCobertura {
        curso_id: curso_id.to_string(),
        inicio,
        fin,
        dias_totales: sim.dias_totales(),
        dias_clase: sim.dias_clase,
        dias_fin_de_semana: sim.dias_fin_de_semana,
        dias_perdidos: sim.dias_perdidos,
        horas_disponibles: sim.horas_disponibles,
        horas_requeridas,
        cobertura,
        bitacora: sim.bitacora,
        advertencias,
    }
}
