//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, loads the file named by `COMPLIANCE_CONFIG_FILE`
//! 3. Otherwise probes multiple paths for config files
//! 4. Supports JSON, TOML and dotenv-style credential files
//!
//! ## Environment Variables
//! - `COMPLIANCE_URL`: Service base URL (required)
//! - `COMPLIANCE_AUTH_TYPE`: `none`, `bearer` or `api_key` (inferred from the
//!   credentials when absent)
//! - `COMPLIANCE_APIKEY`: API key exchanged for access tokens
//! - `COMPLIANCE_AUTH_URL`: Token endpoint for the API key exchange
//! - `COMPLIANCE_BEARER_TOKEN`: Static bearer token
//! - `COMPLIANCE_ACCOUNT_ID`: Account the client operates on
//! - `COMPLIANCE_INSTANCE_ID`: Service instance the client operates on
//! - `COMPLIANCE_MAX_RETRIES`: Retries after the first attempt
//! - `COMPLIANCE_TIMEOUT_SECS`: Per-request timeout in seconds
//!
//! A dotenv file uses the same keys.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./compliance.{json,toml,env}` (current working directory)
//! 2. `./config.{json,toml}` (current working directory)
//! 3. The same names one and two directories up
//! 4. Relative to executable location

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use compliance_domain::constants::DEFAULT_TOKEN_URL;
use compliance_domain::{AuthConfig, ClientConfig, ComplianceError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_FILE_ENV: &str = "COMPLIANCE_CONFIG_FILE";

const FILE_NAMES: &[&str] =
    &["compliance.json", "compliance.toml", "compliance.env", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If required variables
/// are missing, falls back to `COMPLIANCE_CONFIG_FILE` and then to a probed
/// config file.
///
/// # Errors
/// Returns `ComplianceError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            let explicit = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);
            load_from_file(explicit)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ComplianceError::Config` if `COMPLIANCE_URL` is missing or a
/// value is invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    from_vars(|key| std::env::var(key).ok())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files. The
/// format is detected from the file name: `.json`, `.toml`, or `.env` (also
/// any file whose name starts with `.env`).
///
/// # Errors
/// Returns `ComplianceError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ComplianceError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ComplianceError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    if is_dotenv(&config_path) {
        return parse_dotenv(&config_path);
    }

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ComplianceError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse JSON or TOML configuration, detected by file extension.
///
/// # Errors
/// Returns `ComplianceError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: ClientConfig = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ComplianceError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| ComplianceError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => {
            return Err(ComplianceError::Config(format!(
                "Unsupported config format: {}",
                extension
            )))
        }
    };

    config.validate()?;
    Ok(config)
}

fn is_dotenv(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.starts_with(".env") || path.extension().is_some_and(|ext| ext == "env")
}

/// Read a dotenv-style credentials file without touching the process
/// environment.
fn parse_dotenv(path: &Path) -> Result<ClientConfig> {
    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| ComplianceError::Config(format!("Failed to read env file: {}", e)))?;

    let mut vars = HashMap::new();
    for entry in entries {
        let (key, value) =
            entry.map_err(|e| ComplianceError::Config(format!("Invalid env file entry: {}", e)))?;
        vars.insert(key, value);
    }

    from_vars(|key| vars.get(key).cloned())
}

/// Build a config from `COMPLIANCE_*` keys supplied by `lookup`.
fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig> {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let service_url = get("COMPLIANCE_URL").ok_or_else(|| {
        ComplianceError::Config("Missing required environment variable: COMPLIANCE_URL".into())
    })?;

    let api_key = get("COMPLIANCE_APIKEY");
    let bearer_token = get("COMPLIANCE_BEARER_TOKEN");
    let auth_type = get("COMPLIANCE_AUTH_TYPE").map(|t| t.to_ascii_lowercase());

    let auth = match auth_type.as_deref() {
        Some("none" | "noauth") => AuthConfig::None,
        Some("bearer" | "bearertoken" | "bearer_token") => AuthConfig::Bearer {
            token: bearer_token.ok_or_else(|| {
                ComplianceError::Config(
                    "COMPLIANCE_BEARER_TOKEN is required for bearer auth".into(),
                )
            })?,
        },
        Some("api_key" | "apikey" | "iam") => AuthConfig::ApiKey {
            api_key: api_key.ok_or_else(|| {
                ComplianceError::Config("COMPLIANCE_APIKEY is required for api_key auth".into())
            })?,
            token_url: get("COMPLIANCE_AUTH_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
        },
        Some(other) => {
            return Err(ComplianceError::Config(format!("Unsupported auth type: {}", other)));
        }
        None => match (api_key, bearer_token) {
            (Some(api_key), _) => AuthConfig::ApiKey {
                api_key,
                token_url: get("COMPLIANCE_AUTH_URL")
                    .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            },
            (None, Some(token)) => AuthConfig::Bearer { token },
            (None, None) => AuthConfig::None,
        },
    };

    let mut config = ClientConfig::new(service_url, auth);
    config.account_id = get("COMPLIANCE_ACCOUNT_ID");
    config.instance_id = get("COMPLIANCE_INSTANCE_ID");

    if let Some(raw) = get("COMPLIANCE_MAX_RETRIES") {
        config.retry.max_retries = raw
            .parse::<u32>()
            .map_err(|e| ComplianceError::Config(format!("Invalid max retries: {}", e)))?;
    }
    if let Some(raw) = get("COMPLIANCE_TIMEOUT_SECS") {
        config.timeout_secs = raw
            .parse::<u64>()
            .map_err(|e| ComplianceError::Config(format!("Invalid timeout: {}", e)))?;
    }

    config.validate()?;
    Ok(config)
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
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}
