//! Configuración del proceso, leída desde variables de entorno (y `.env`).
//!
//! - `SPAN_LIBRO`: ruta o nombre del libro (por defecto `SPAN_BD_2026.xlsx`)
//! - `SPAN_DATAFILES_DIR`: carpeta donde buscar el libro cuando `SPAN_LIBRO`
//!   es sólo un nombre (por defecto `datafiles`)
//! - `SPAN_BIND`: dirección del servidor HTTP (por defecto `127.0.0.1:8080`)

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const LIBRO_POR_DEFECTO: &str = "SPAN_BD_2026.xlsx";
pub const DATAFILES_POR_DEFECTO: &str = "datafiles";
pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuracion {
    pub libro: PathBuf,
    pub bind: String,
}

impl Configuracion {
    /// Carga `.env` si existe y lee el entorno del proceso.
    pub fn desde_entorno() -> Self {
        let _ = dotenv::dotenv();
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::desde_variables(|k| std::env::var(k).ok(), &cwd)
    }

    /// Igual que `desde_entorno`, pero con una función de búsqueda explícita.
    pub fn desde_variables<F>(buscar: F, cwd: &Path) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let valor = |k: &str| buscar(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let libro = valor("SPAN_LIBRO").unwrap_or_else(|| LIBRO_POR_DEFECTO.to_string());
        let datafiles = valor("SPAN_DATAFILES_DIR").unwrap_or_else(|| DATAFILES_POR_DEFECTO.to_string());
        let bind = valor("SPAN_BIND").unwrap_or_else(|| BIND_POR_DEFECTO.to_string());

        Configuracion {
            libro: resolver_libro(&libro, &datafiles, cwd),
            bind,
        }
    }
}

/// Una ruta con directorio se usa tal cual. Un nombre suelto se busca en la
/// carpeta de datos, luego en `src/<datafiles>` y por último en `cwd`; si no
/// aparece en ninguna se devuelve la primera opción.
fn resolver_libro(libro: &str, datafiles: &str, cwd: &Path) -> PathBuf {
    let ruta = PathBuf::from(libro);
    if ruta.is_absolute() || ruta.components().count() > 1 {
        return ruta;
    }

    let base = {
        let d = PathBuf::from(datafiles);
        if d.is_absolute() { d } else { cwd.join(d) }
    };
    let candidatos = [base.join(libro), cwd.join("src").join(datafiles).join(libro), cwd.join(libro)];
    for c in &candidatos {
        if c.exists() {
            debug!(libro = %c.display(), "libro encontrado");
            return c.clone();
        }
    }
    let elegido = candidatos[0].clone();
    warn!(libro = %elegido.display(), "no se encontró el libro; se usará esta ruta");
    elegido
}
