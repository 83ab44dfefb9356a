//! # Compliance Domain
//!
//! Typed model layer for the compliance-management API.
//!
//! This crate contains:
//! - Request/response shapes for control libraries, profiles, parameters,
//!   attachments and scans
//! - The client error type and Result definition
//! - Client configuration structures
//! - Wire constants
//!
//! ## Architecture
//! - No dependencies on other workspace crates
//! - Only external dependencies allowed
//! - Pure data structures with serde hooks

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
