//! Configuration loading
//!
//! Reads [`compliance_domain::ClientConfig`] from environment variables,
//! JSON/TOML files or dotenv-style credential files.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths, CONFIG_FILE_ENV};
