use crate::models::Materia;

/// Porcentaje entero de las horas requeridas que cubren las horas
/// disponibles: `min(100, floor(H / R * 100))`.
///
/// Sin requerimiento (`R <= 0`, sin materias o sin columna de horas) el
/// curso se considera cubierto al 100%.
pub fn compute_coverage(horas_disponibles: u32, horas_requeridas: f64) -> u8 {
    if horas_requeridas.is_nan() || horas_requeridas <= 0.0 {
        return 100;
    }
    let pct = (horas_disponibles as f64 / horas_requeridas * 100.0).floor();
    pct.clamp(0.0, 100.0) as u8
}

/// Suma de `Horas_Totales` de las materias del curso.
pub fn required_hours(materias: &[Materia], curso_id: &str) -> f64 {
    let curso_id = curso_id.trim();
    materias
        .iter()
        .filter(|m| m.curso.as_deref() == Some(curso_id))
        .map(|m| m.horas_totales)
        .sum()
}
