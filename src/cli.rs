//! Command-line interface for gemini-bridge

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chat-completion compatible bridge to the Gemini API
#[derive(Parser)]
#[command(name = "gemini-bridge")]
#[command(version)]
#[command(about = "Chat-completion compatible bridge to the Gemini API")]
#[command(
    long_about = "gemini-bridge accepts chat-completion style requests on POST /api/chat, \
    forwards them to Gemini's generateContent endpoint and translates the answer back. \
    Settings come from an optional TOML file and the GEMINI_API_KEY, GEMINI_MODEL, \
    GEMINI_BASE_URL, HOST and PORT environment variables (a .env file is honored)."
)]
pub struct Cli {
    /// Path to an optional configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# gemini-bridge configuration
#
# Every value below is optional. Environment variables override this file:
#   GEMINI_API_KEY, GEMINI_MODEL, GEMINI_BASE_URL, HOST, PORT

[server]
# IP address to bind to (0.0.0.0 for all interfaces, 127.0.0.1 for localhost only)
host = "0.0.0.0"
port = 3000

[gemini]
# Prefer GEMINI_API_KEY in the environment or .env over storing the key here.
# Without a key the server still starts, but /api/chat answers 500.
# api_key = "..."
model = "gemini-2.5-flash"
base_url = "https://generativelanguage.googleapis.com"

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
log_level = "info"
"#
}
