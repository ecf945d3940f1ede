//! Módulo `excel`: acceso al almacén tabular externo (el libro SPAN).
//!
//! Submódulos:
//! - `tabla`: `Celda` y `Tabla`, la instantánea de una hoja
//! - `io`: lectura de hojas con calamine
//! - `libro`: `LibroExcel`, almacén sobre un `.xlsx` en disco
//! - `memoria`: `AlmacenMemoria`, almacén en memoria
//! - `snapshot`: normalización de las hojas a registros tipados

mod io;
mod tabla;

pub mod libro;
pub mod memoria;
pub mod snapshot;

pub use libro::LibroExcel;
pub use memoria::AlmacenMemoria;
pub use snapshot::{leer_snapshot, Snapshot};
pub use tabla::{Celda, Tabla};

use crate::error::ErrorAlmacen;

/// Nombres lógicos de las hojas del libro.
pub mod hojas {
    pub const CURSOS: &str = "CURSOS";
    pub const MATERIAS: &str = "MATERIAS";
    pub const INTERRUPCIONES: &str = "INTERRUPCIONES";
    pub const HISTORIAL: &str = "HISTORIAL_CAMBIOS";

    /// Hojas esperadas en el libro (chequeo de conectividad).
    pub const REQUERIDAS: [&str; 4] = [CURSOS, MATERIAS, INTERRUPCIONES, HISTORIAL];
}

/// Encabezados esperados en cada hoja.
pub mod columnas {
    // CURSOS
    pub const ID_CURSO: &str = "ID_Curso";
    pub const INICIO_CLASES: &str = "Inicio_Clases_Real";
    pub const FIN_CLASES: &str = "Fin_Clases_Real";
    // MATERIAS
    pub const CURSO: &str = "Curso";
    pub const HORAS_TOTALES: &str = "Horas_Totales";
    // INTERRUPCIONES
    pub const ID_EVENTO: &str = "ID_Evento";
    pub const NOMBRE_EVENTO: &str = "Nombre_Evento";
    pub const FECHA_INICIO: &str = "Fecha_Inicio";
    pub const FECHA_FIN: &str = "Fecha_Fin";
    pub const TIPO: &str = "Tipo";
    pub const ALCANCE: &str = "Alcance";
    pub const AFECTADOS: &str = "Afectados";
    pub const ESTADO: &str = "Estado";
    pub const JUSTIFICACION: &str = "Justificacion";
    // HISTORIAL_CAMBIOS
    pub const TIMESTAMP: &str = "Timestamp";
    pub const USUARIO: &str = "Usuario";
    pub const ACCION: &str = "Accion";
}

/// Colaborador tabular externo. Dueño de los datos; el núcleo sólo lee
/// instantáneas y pide agregar filas o cambiar el estado de una.
pub trait AlmacenTabular {
    /// Instantánea completa de la hoja `hoja` (encabezados + filas en orden).
    fn leer_tabla(&self, hoja: &str) -> Result<Tabla, ErrorAlmacen>;

    /// Nombres de las hojas disponibles.
    fn hojas(&self) -> Result<Vec<String>, ErrorAlmacen>;

    /// Agrega una fila al final. Cada valor va bajo el encabezado cuyo texto
    /// recortado coincide con la columna; columnas inexistentes se omiten.
    /// Si ninguna coincide devuelve `ColumnaFaltante` y no escribe nada.
    fn agregar_fila(&mut self, hoja: &str, valores: &[(&str, String)]) -> Result<(), ErrorAlmacen>;

    /// Sobrescribe una celda de la fila de datos `fila` (0 = primera tras
    /// los encabezados, que están en la primera fila con algún valor).
    fn actualizar_celda(&mut self, hoja: &str, fila: usize, columna: &str, valor: &str) -> Result<(), ErrorAlmacen>;
}
