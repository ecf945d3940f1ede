//! Historial de cambios (HISTORIAL_CAMBIOS): sólo se agregan filas.

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::ErrorAlmacen;
use crate::excel::{columnas, hojas, AlmacenTabular};
use crate::models::{AccionAuditoria, RegistroAuditoria};

/// Formato de la columna `Timestamp`.
pub const FORMATO_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Agrega una fila al historial. La marca de tiempo se genera aquí, a partir
/// de `ahora`.
pub fn registrar_auditoria(
    almacen: &mut dyn AlmacenTabular,
    usuario: &str,
    accion: &AccionAuditoria,
    id_evento: &str,
    justificacion: &str,
    ahora: NaiveDateTime,
) -> Result<RegistroAuditoria, ErrorAlmacen> {
    let registro = RegistroAuditoria {
        timestamp: ahora.format(FORMATO_TIMESTAMP).to_string(),
        usuario: usuario.trim().to_string(),
        accion: accion.clone(),
        id_evento: id_evento.to_string(),
        justificacion: justificacion.trim().to_string(),
    };

    almacen.agregar_fila(
        hojas::HISTORIAL,
        &[
            (columnas::TIMESTAMP, registro.timestamp.clone()),
            (columnas::USUARIO, registro.usuario.clone()),
            (columnas::ACCION, registro.accion.etiqueta().to_string()),
            (columnas::ID_EVENTO, registro.id_evento.clone()),
            (columnas::JUSTIFICACION, registro.justificacion.clone()),
        ],
    )?;
    info!(
        usuario = %registro.usuario,
        accion = registro.accion.etiqueta(),
        evento = %registro.id_evento,
        "auditoría registrada"
    );
    Ok(registro)
}

/// Historial en el orden en que está guardado.
pub fn leer_historial(almacen: &dyn AlmacenTabular) -> Result<Vec<RegistroAuditoria>, ErrorAlmacen> {
    let t = almacen.leer_tabla(hojas::HISTORIAL)?;
    let col = |nombre: &str| t.columna(nombre);
    let (ts, usuario, accion, evento, justificacion) = (
        col(columnas::TIMESTAMP),
        col(columnas::USUARIO),
        col(columnas::ACCION),
        col(columnas::ID_EVENTO),
        col(columnas::JUSTIFICACION),
    );
    let texto = |fila: usize, c: Option<usize>| c.map(|c| t.celda(fila, c).texto()).unwrap_or_default();

    let mut out = Vec::with_capacity(t.len());
    for fila in 0..t.len() {
        if t.filas[fila].iter().all(|c| c.es_vacia()) {
            continue;
        }
        out.push(RegistroAuditoria {
            timestamp: texto(fila, ts),
            usuario: texto(fila, usuario),
            accion: AccionAuditoria::desde_etiqueta(&texto(fila, accion)),
            id_evento: texto(fila, evento),
            justificacion: texto(fila, justificacion),
        });
    }
    Ok(out)
}
