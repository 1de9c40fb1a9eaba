use presale_api::utils::display::DisplayFormatter;
use presale_api::{routes, PresaleConfig, PresaleService};
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting presale API");

    let config = PresaleConfig::from_env()?;
    let service = Arc::new(PresaleService::from_config(config)?);
    let bind_addr = service.config().bind_addr;

    let display = DisplayFormatter::new();
    println!("{}", display.format_config(service.config()));

    // Warm both caches so the first visitor does not pay for the upstream calls.
    let snapshot = service.get_snapshot().await;
    if snapshot.eth_price_usd.is_none() {
        warn!("ETH price unavailable at startup");
    }
    println!("{}", display.format_snapshot(&snapshot));

    let app = routes::router(service);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
