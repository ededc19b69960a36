pub mod config;
pub mod models;
pub mod pipeline;
pub mod vocabulary;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for a host embedding the pipeline. Honors RUST_LOG
/// when set.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
