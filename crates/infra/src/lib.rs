//! # Compliance Infrastructure
//!
//! HTTP transport core for the compliance-management client.
//!
//! This crate contains:
//! - A retrying `reqwest` client
//! - Authenticators for bearer tokens and API-key token exchange
//! - [`HttpTransport`], the implementation of the core `Transport` port
//! - Configuration loading from environment variables and files
//! - [`build_service`] to wire everything into a ready service
//!
//! ## Architecture
//! - Implements traits defined in `compliance-core`
//! - Contains all "impure" code (network, environment, files)

pub mod auth;
pub mod builder;
pub mod config;
pub mod errors;
pub mod http;
pub mod transport;

// Re-export commonly used items
pub use auth::{
    ApiKeyAuthenticator, Authenticator, BearerTokenAuthenticator, NoAuthAuthenticator,
};
pub use builder::{build_service, ComplianceClientBuilder};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use transport::HttpTransport;
