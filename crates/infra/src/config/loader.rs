//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. A `.env` file in the working directory (if any) is merged into the
//!    process environment; variables already set win
//! 2. If `STOCKDESK_API_BASE_URL` is set, configuration comes from the
//!    environment
//! 3. Otherwise a config file is probed for (JSON or TOML)
//! 4. With neither, built-in defaults are used
//!
//! Every loaded configuration is validated before it is returned.
//!
//! ## Environment Variables
//! - `STOCKDESK_API_BASE_URL`: REST backend base URL (required for env loading)
//! - `STOCKDESK_API_TIMEOUT_SECS`: Request timeout in seconds
//! - `STOCKDESK_API_TOKEN`: Development bearer token
//! - `STOCKDESK_PAGE_SIZE`: Default list page size
//! - `STOCKDESK_LOG_LEVEL`: Log level / filter directive
//! - `STOCKDESK_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./stockdesk.{json,toml}` or `./config.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use stockdesk_domain::{
    ApiConfig, AuthConfig, Config, LoggingConfig, Result, StockDeskError, WorkflowConfig,
};

const ENV_BASE_URL: &str = "STOCKDESK_API_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "STOCKDESK_API_TIMEOUT_SECS";
const ENV_TOKEN: &str = "STOCKDESK_API_TOKEN";
const ENV_PAGE_SIZE: &str = "STOCKDESK_PAGE_SIZE";
const ENV_LOG_LEVEL: &str = "STOCKDESK_LOG_LEVEL";
const ENV_LOG_JSON: &str = "STOCKDESK_LOG_JSON";

const FILE_NAMES: [&str; 4] = ["stockdesk.json", "stockdesk.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `StockDeskError::Config` if a source is present but invalid, or
/// if the resulting configuration fails validation.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "config.dotenv_loaded");
    }

    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("config.loaded_from_env");
            config
        }
        Err(e) => {
            tracing::debug!(error = %e, "config.env_incomplete");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path))?,
                None => {
                    tracing::info!("config.defaults");
                    Config::default()
                }
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `STOCKDESK_API_BASE_URL` must be set; every other variable falls back to
/// its default.
///
/// # Errors
/// Returns `StockDeskError::Config` if the base URL is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(ENV_BASE_URL)?;
    let defaults = Config::default();

    let api = ApiConfig {
        base_url,
        timeout_secs: env_parse(ENV_TIMEOUT_SECS, defaults.api.timeout_secs)?,
    };
    let auth = AuthConfig {
        static_token: std::env::var(ENV_TOKEN).ok().filter(|t| !t.trim().is_empty()),
    };
    let workflow =
        WorkflowConfig { page_size: env_parse(ENV_PAGE_SIZE, defaults.workflow.page_size)? };
    let logging = LoggingConfig {
        level: std::env::var(ENV_LOG_LEVEL).unwrap_or(defaults.logging.level),
        json: env_bool(ENV_LOG_JSON, defaults.logging.json),
    };

    Ok(Config { api, auth, workflow, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `StockDeskError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StockDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            StockDeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "config.loaded_from_file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| StockDeskError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| StockDeskError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StockDeskError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(StockDeskError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        StockDeskError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional numeric environment variable, falling back to `default`
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| StockDeskError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
