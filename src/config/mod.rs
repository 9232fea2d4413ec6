// Configuration module entry point
// File-based configuration with defaults, plus the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{AssetsConfig, Config, HttpConfig, LoggingConfig, ServerConfig, SessionConfig};

impl Config {
    /// Load configuration for the running process.
    ///
    /// Reads the optional `config.toml`, fills in defaults, then applies the
    /// `PORT` environment variable, the one documented override.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut cfg = Self::load_from("config")?;
        cfg.server.port = resolve_port(std::env::var("PORT").ok(), cfg.server.port);
        Ok(cfg)
    }

    /// Load configuration from the specified file path (without extension).
    /// A missing file is not an error; defaults apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 4000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("http.max_body_size", 102_400)? // body-parser default
            .set_default("session.cookie_name", "sid")?
            .set_default("session.ttl_secs", 86_400)? // 24 hours
            .set_default("session.sweep_interval_secs", 600)?
            .set_default("assets.root", "public")?
            .build()?;

        settings.try_deserialize()
    }

    /// The socket address the server binds.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}

/// Apply the `PORT` environment override.
///
/// Unset or non-numeric values leave the configured port in place.
fn resolve_port(raw: Option<String>, configured: u16) -> u16 {
    match raw {
        Some(value) => match value.trim().parse() {
            Ok(port) => port,
            Err(_) => {
                crate::logger::log_warning(&format!(
                    "Ignoring non-numeric PORT value '{value}', using {configured}"
                ));
                configured
            }
        },
        None => configured,
    }
}
