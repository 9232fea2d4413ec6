//! Request handler module
//!
//! The dispatch pipeline and its stages: hardening headers, body decoding,
//! sessions, static assets, and the route table.

pub mod pages;
pub mod pipeline;
pub mod routes;
pub mod security;
pub mod static_assets;

// Re-export main entry point
pub use pipeline::{handle_request, RequestContext};
