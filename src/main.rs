// --- SPAN: cobertura de horas pedagógicas (API) ---

use span::{run_server, Configuracion};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // .env primero, para que RUST_LOG también pueda venir de ahí
    let _ = dotenv::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Configuracion::desde_entorno();
    tracing::info!("=== SPAN (API) === http://{}", config.bind);
    run_server(config).await
}
