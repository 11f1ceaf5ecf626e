//! Integration tests for the `config` subcommand template
//!
//! Writes the template to disk and loads it back through the same path the
//! server uses at startup.

use gemini_bridge::cli::generate_config_template;
use gemini_bridge::config::{Config, DEFAULT_BASE_URL, DEFAULT_MODEL};
use gemini_bridge::error::AppError;
use std::fs;
use tempfile::TempDir;

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

#[test]
fn test_generated_template_creates_valid_config_file() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config =
        Config::from_file(&config_path).expect("Generated template should load as valid Config");

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.gemini.model(), DEFAULT_MODEL);
    assert_eq!(config.gemini.base_url(), DEFAULT_BASE_URL);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_template_never_ships_an_api_key() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config = Config::from_file(&config_path).expect("template should load");
    assert!(config.gemini.api_key().is_none());
}

#[test]
fn test_template_has_all_sections() {
    let template = generate_config_template();

    assert!(template.contains("[server]"), "Missing [server]");
    assert!(template.contains("[gemini]"), "Missing [gemini]");
    assert!(
        template.contains("[observability]"),
        "Missing [observability]"
    );
    assert!(template.contains("GEMINI_API_KEY"));
}

#[test]
fn test_edited_template_is_validated_on_load() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");

    let edited = generate_config_template().replace("port = 3000", "port = 0");
    fs::write(&config_path, edited).expect("Failed to write template");

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(
        matches!(err, AppError::ConfigValidationFailed { .. }),
        "expected validation failure, got {:?}",
        err
    );
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_missing_file_reports_path() {
    let temp_dir = create_temp_dir();
    let missing = temp_dir.path().join("absent.toml");

    let err = Config::from_file(&missing).unwrap_err();
    assert!(matches!(err, AppError::ConfigFileRead { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
