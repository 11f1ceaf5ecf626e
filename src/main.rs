//! gemini-bridge HTTP server

use clap::Parser;
use gemini_bridge::{
    cli::{Cli, Command, generate_config_template},
    config::Config,
    handlers::{self, AppState},
    telemetry,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(Command::Config { output }) = cli.command {
        let template = generate_config_template();
        match output {
            Some(path) => {
                std::fs::write(&path, template)?;
                eprintln!("Wrote configuration template to {}", path.display());
            }
            None => print!("{}", template),
        }
        return Ok(());
    }

    // .env must be loaded before the environment overrides are read
    let dotenv = dotenvy::dotenv();

    let config = Config::load(cli.config.as_deref())?;

    telemetry::init(&config.observability.log_level);

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
    }

    if config.gemini.api_key().is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /api/chat will answer 500 until it is");
    }

    let addr = config.server.socket_addr()?;
    let model = config.gemini.model().to_string();

    let state = AppState::new(Arc::new(config))?;
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on {} (Gemini model {})", addr, model);
    axum::serve(listener, app).await?;

    Ok(())
}
