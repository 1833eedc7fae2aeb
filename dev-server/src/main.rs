//! Development server for the admin dashboard UI
//!
//! Serves the in-memory content API on a fixed port and fills it with a
//! realistic dataset, so the UI can be developed without the real backend.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::{mock::DevDataset, telemetry};
use tracing::info;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let subscriber = telemetry::get_subscriber("info");
    telemetry::try_init_subscriber(subscriber);

    let port = match std::env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    info!("🚀 Starting admin API stub");
    let app = test_helpers::spawn_app_on_port(port).await;
    info!("✅ API server running on {}", app.address());

    info!("📊 Setting up development data...");
    let dataset = DevDataset::create(&app).await?;

    info!("🎯 Development server ready!");
    info!("   API: {}/api", app.address());
    info!("   UI:  cd ui && BACKEND_URL={} trunk serve", app.address());
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
