//! Biblioterm - terminal library management system

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblioterm::{
    config::AppConfig,
    persistence::Storage,
    services::Library,
    terminal,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblioterm={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblioterm v{}", env!("CARGO_PKG_VERSION"));

    let storage = Storage::new(config.storage.clone());
    let mut library = Library::new(storage);

    // Books and members must be loaded before loans
    library.load();

    terminal::run(&mut library)?;

    tracing::info!("Goodbye");
    Ok(())
}
