//! Client constants
//!
//! Wire-level names and default tuning values shared by the wrapper layer and
//! the transport.

// Path layout: /instances/{instance_id}/{API_VERSION}/...
pub const API_VERSION: &str = "v3";

// Request tracing headers
pub const HEADER_CORRELATION_ID: &str = "X-Correlation-ID";
pub const HEADER_REQUEST_ID: &str = "X-Request-ID";

// Transport defaults
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_RETRIES: u32 = 4;
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 500;
pub const DEFAULT_BACKOFF_CEILING_MS: u64 = 30_000;
pub const USER_AGENT: &str = concat!("compliance-sdk-rust/", env!("CARGO_PKG_VERSION"));

// API-key token exchange
pub const API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
pub const TOKEN_REFRESH_WINDOW_SECS: i64 = 60;
pub const DEFAULT_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";
