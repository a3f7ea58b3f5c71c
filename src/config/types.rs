// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::store::User;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    /// Seed dataset; the built-in users are served when absent
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (CPU cores when unset)
    #[serde(default)]
    pub workers: Option<usize>,
    /// Listen backlog size
    pub backlog: i32,
}

/// Route mounting configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Versioned prefix the users routes are mounted under
    pub prefix: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound in seconds for serving one connection
    pub request_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}
