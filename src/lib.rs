// Biblioteca raíz del crate `span`.
// Declara los módulos (lectura del libro, cálculo de cobertura, acciones de
// escritura, servidor HTTP) y reexporta los tipos y funciones de uso común.
pub mod acciones;
pub mod algorithm;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod server;

pub use algorithm::{calcular_cobertura, calcular_cobertura_desde};
pub use config::Configuracion;
pub use error::{ErrorAccion, ErrorAlmacen, ErrorCalculo, ErrorFecha};
pub use excel::{AlmacenMemoria, AlmacenTabular, LibroExcel};
pub use models::ReporteCobertura;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
