//! Transport port and request building blocks

pub mod path;
pub mod ports;

pub use path::ResourcePath;
pub use ports::{ApiRequest, HttpMethod, RawResponse, Transport};
