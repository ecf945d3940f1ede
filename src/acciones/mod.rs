//! Acciones del operador que escriben en el almacén.
//!
//! - `registrar_interrupcion`: agrega una interrupción en estado ACTIVO.
//! - `anular_interrupcion`: única transición del ciclo de vida
//!   (ACTIVO -> CANCELADO); las filas nunca se borran.
//!
//! Cada acción deja una fila en HISTORIAL_CAMBIOS. Si esa escritura falla,
//! la acción principal igual queda hecha y el fallo vuelve como advertencia.

pub mod auditoria;

pub use auditoria::{leer_historial, registrar_auditoria, FORMATO_TIMESTAMP};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::algorithm::normalize_date;
use crate::error::{ErrorAccion, ErrorAlmacen};
use crate::excel::{columnas, hojas, AlmacenTabular, Celda};
use crate::models::{AccionAuditoria, Alcance, EstadoInterrupcion};

/// Datos que entrega el operador para crear una interrupción.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NuevaInterrupcion {
    /// Si viene vacío se genera `EVT-AAAAMMDDHHMMSS`.
    #[serde(default)]
    pub id: String,
    pub nombre: String,
    /// Texto de fecha; se acepta DD/MM/AAAA o AAAA-MM-DD.
    pub fecha_inicio: String,
    pub fecha_fin: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub alcance: Alcance,
    pub justificacion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultadoAccion {
    pub id_evento: String,
    /// Presente cuando el historial no pudo registrarse.
    pub advertencia: Option<String>,
}

fn requerido(valor: &str, campo: &str) -> Result<(), ErrorAccion> {
    if valor.trim().is_empty() {
        return Err(ErrorAccion::Validacion(format!("'{}' es obligatorio", campo)));
    }
    Ok(())
}

/// Registra la auditoría sin bloquear la acción principal.
fn auditar(
    almacen: &mut dyn AlmacenTabular,
    usuario: &str,
    accion: AccionAuditoria,
    id_evento: &str,
    justificacion: &str,
    ahora: NaiveDateTime,
) -> Option<String> {
    match registrar_auditoria(almacen, usuario, &accion, id_evento, justificacion, ahora) {
        Ok(_) => None,
        Err(e) => {
            warn!(evento = id_evento, error = %e, "la acción se guardó pero no se pudo registrar la auditoría");
            Some(format!("la acción se guardó, pero el historial no se registró: {}", e))
        }
    }
}

pub fn registrar_interrupcion(
    almacen: &mut dyn AlmacenTabular,
    nueva: NuevaInterrupcion,
    usuario: &str,
    ahora: NaiveDateTime,
) -> Result<ResultadoAccion, ErrorAccion> {
    requerido(usuario, "usuario")?;
    requerido(&nueva.nombre, "nombre")?;
    requerido(&nueva.justificacion, "justificacion")?;

    let inicio = normalize_date(&Celda::texto_o_vacia(&nueva.fecha_inicio))
        .map_err(|e| ErrorAccion::Validacion(format!("fecha_inicio: {}", e)))?;
    let fin = normalize_date(&Celda::texto_o_vacia(&nueva.fecha_fin))
        .map_err(|e| ErrorAccion::Validacion(format!("fecha_fin: {}", e)))?;
    if inicio > fin {
        return Err(ErrorAccion::Validacion(format!(
            "la fecha de inicio ({}) es posterior a la de fin ({})",
            inicio, fin
        )));
    }
    if let Alcance::Especifico(curso) = &nueva.alcance {
        requerido(curso, "curso afectado")?;
    }

    let id_evento = if nueva.id.trim().is_empty() {
        format!("EVT-{}", ahora.format("%Y%m%d%H%M%S"))
    } else {
        nueva.id.trim().to_string()
    };

    let existentes = almacen.leer_tabla(hojas::INTERRUPCIONES)?;
    if let Some(col) = existentes.columna(columnas::ID_EVENTO) {
        if (0..existentes.len()).any(|f| existentes.celda(f, col).texto() == id_evento) {
            return Err(ErrorAccion::Validacion(format!("ya existe una interrupción '{}'", id_evento)));
        }
    }

    almacen.agregar_fila(
        hojas::INTERRUPCIONES,
        &[
            (columnas::ID_EVENTO, id_evento.clone()),
            (columnas::NOMBRE_EVENTO, nueva.nombre.trim().to_string()),
            (columnas::FECHA_INICIO, inicio.format("%Y-%m-%d").to_string()),
            (columnas::FECHA_FIN, fin.format("%Y-%m-%d").to_string()),
            (columnas::TIPO, nueva.tipo.trim().to_string()),
            (columnas::ALCANCE, nueva.alcance.etiqueta().to_string()),
            (columnas::AFECTADOS, nueva.alcance.afectados().trim().to_string()),
            (columnas::ESTADO, EstadoInterrupcion::Activa.etiqueta().to_string()),
            (columnas::JUSTIFICACION, nueva.justificacion.trim().to_string()),
        ],
    )?;
    info!(evento = %id_evento, %inicio, %fin, alcance = nueva.alcance.etiqueta(), "interrupción creada");

    let advertencia = auditar(almacen, usuario, AccionAuditoria::Crear, &id_evento, &nueva.justificacion, ahora);
    Ok(ResultadoAccion { id_evento, advertencia })
}

/// Pasa una interrupción de ACTIVO a CANCELADO. Una interrupción cancelada
/// no se reactiva: habría que crear una nueva.
pub fn anular_interrupcion(
    almacen: &mut dyn AlmacenTabular,
    id_evento: &str,
    usuario: &str,
    justificacion: &str,
    ahora: NaiveDateTime,
) -> Result<ResultadoAccion, ErrorAccion> {
    requerido(usuario, "usuario")?;
    requerido(justificacion, "justificacion")?;
    let id_evento = id_evento.trim();

    let t = almacen.leer_tabla(hojas::INTERRUPCIONES)?;
    let faltante = |columna: &str| ErrorAlmacen::ColumnaFaltante {
        hoja: hojas::INTERRUPCIONES.to_string(),
        columna: columna.to_string(),
    };
    let col_id = t.columna(columnas::ID_EVENTO).ok_or_else(|| faltante(columnas::ID_EVENTO))?;
    let col_estado = t.columna(columnas::ESTADO).ok_or_else(|| faltante(columnas::ESTADO))?;

    let fila = (0..t.len())
        .find(|&f| t.celda(f, col_id).texto() == id_evento)
        .ok_or_else(|| ErrorAccion::NoEncontrada(id_evento.to_string()))?;

    let estado_txt = t.celda(fila, col_estado).texto();
    match EstadoInterrupcion::desde_etiqueta(&estado_txt) {
        Some(EstadoInterrupcion::Activa) => {}
        Some(EstadoInterrupcion::Cancelada) => return Err(ErrorAccion::YaCancelada(id_evento.to_string())),
        None => {
            return Err(ErrorAccion::Validacion(format!(
                "estado desconocido '{}' en la interrupción '{}'",
                estado_txt, id_evento
            )));
        }
    }

    almacen.actualizar_celda(
        hojas::INTERRUPCIONES,
        fila,
        columnas::ESTADO,
        EstadoInterrupcion::Cancelada.etiqueta(),
    )?;
    info!(evento = %id_evento, "interrupción anulada");

    let advertencia = auditar(almacen, usuario, AccionAuditoria::Anular, id_evento, justificacion, ahora);
    Ok(ResultadoAccion { id_evento: id_evento.to_string(), advertencia })
}
