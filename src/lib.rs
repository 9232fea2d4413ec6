//! Socket security demo server
//!
//! A deliberately small HTTP service whose manifest is the point: it exists
//! as a scan target for dependency reachability tooling. Requests flow
//! through a fixed pipeline of stages (hardening headers, body decoding,
//! sessions, static assets, route table) and every declared dependency is
//! exercised somewhere on that path.

pub mod clock;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod manifest;
pub mod server;
pub mod session;
