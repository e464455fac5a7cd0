mod export;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with environment filter.
    // Use RUST_LOG env var to control diagnostic log levels, defaulting to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("pd-guard user-data export starting");

    if let Err(e) = export::run().await {
        error!("Export exited with error: {:#}", e);
        std::process::exit(1);
    }

    info!("pd-guard user-data export finished");
}
