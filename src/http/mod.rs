//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific
//! business logic: response builders, body decoding, conditional-request
//! validators, and MIME lookup.

pub mod body;
pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use body::{decode, ParsedBody};
pub use response::{
    asset_response, html_response, json_response, not_modified_response, plain_response,
};
