use anyhow::Result;
use backend::axum_http::http_serve;
use backend::config::config_loader;
use backend::observability;
use infra::memory::{memory_context::MemoryContext, seed};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("backend")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let store = Arc::new(MemoryContext::new());
    seed::demo_data(&store).await?;
    info!("In-memory store is ready");

    http_serve::start(Arc::new(dotenvy_env), store).await?;

    Ok(())
}
