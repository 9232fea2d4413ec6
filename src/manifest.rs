//! Process metadata read from the crate's own manifest.
//!
//! The demo exists to be scanned, so the numbers it reports about itself
//! come straight from the dependency manifest embedded at compile time.

use std::sync::OnceLock;

/// Display name reported by `/api/info`.
pub const APP_NAME: &str = "Socket NodeGoat Demo";

/// Crate version from the build-time manifest.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime version string, from the declared toolchain baseline.
pub const RUNTIME_VERSION: &str = concat!("rust/", env!("CARGO_PKG_RUST_VERSION"));

const MANIFEST: &str = include_str!("../Cargo.toml");

/// Number of declared runtime dependencies.
///
/// Counts the entries of the `[dependencies]` table; dev-dependencies do
/// not count. Parsed once and cached.
pub fn runtime_dependency_count() -> usize {
    static COUNT: OnceLock<usize> = OnceLock::new();
    *COUNT.get_or_init(|| {
        MANIFEST
            .parse::<toml::Table>()
            .ok()
            .and_then(|manifest| {
                manifest
                    .get("dependencies")
                    .and_then(|deps| deps.as_table().map(|table| table.len()))
            })
            .unwrap_or(0)
    })
}
