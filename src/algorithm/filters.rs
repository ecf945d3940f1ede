//! Filtro de interrupciones aplicables a un curso.
//!
//! Una interrupción aplica cuando está activa y su alcance es global o
//! específico del curso. El orden de la colección se conserva: el simulador
//! usa la primera coincidencia para nombrar un día interrumpido.

use crate::models::Interrupcion;

pub fn filter_interruptions<'a>(interrupciones: &'a [Interrupcion], curso_id: &str) -> Vec<&'a Interrupcion> {
    let curso_id = curso_id.trim();
    interrupciones
        .iter()
        .filter(|i| i.esta_activa() && i.alcance.aplica_a(curso_id))
        .collect()
}
