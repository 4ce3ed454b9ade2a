use clap::Parser;
use gantry_server::{app, config, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "gantry-server", about = "API gateway for the ERP, MES, and drone image servers")]
struct Args {
    /// Path to the configuration file (defaults to ./gantry.toml).
    #[arg(long, env = "GANTRY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    let bind = config.server.bind.clone();
    let state = Arc::new(AppState::init(config).await?);
    let app = app(state);

    tracing::info!("gantry-server listening on {}", bind);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
