// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
    pub session: SessionConfig,
    pub assets: AssetsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads for the runtime; `None` uses one per CPU core
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `info` or `debug`; `debug` adds per-connection accept lines
    pub level: String,
    pub access_log: bool,
    /// `combined`, `common`, or `json`
    pub access_log_format: String,
    /// Access log file path; stdout when unset
    pub access_log_file: Option<String>,
    /// Error log file path; stderr when unset
    pub error_log_file: Option<String>,
}

/// HTTP protocol configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Largest request body accepted, in bytes
    pub max_body_size: u64,
}

/// Session configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Time a session stays valid after creation
    pub ttl_secs: i64,
    /// How often the serve loop sweeps out expired records
    pub sweep_interval_secs: u64,
}

/// Static asset configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory whose files the static stage may serve
    pub root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            workers: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_size: 102_400,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sid".to_string(),
            ttl_secs: 86_400,
            sweep_interval_secs: 600,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: "public".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.workers, None);
        assert_eq!(config.http.max_body_size, 102_400);
        assert_eq!(config.session.cookie_name, "sid");
        assert_eq!(config.session.ttl_secs, 86_400);
        assert_eq!(config.assets.root, "public");
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "combined");
    }
}
