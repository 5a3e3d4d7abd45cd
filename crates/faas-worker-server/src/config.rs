//! Worker configuration read from environment variables.
//!
//! - `HANDLER_FUNCTION`: handler identifier (default: `function.handler.handle`)
//! - `WORKER_HOST`: listen address (default: `0.0.0.0`)
//! - `WORKER_PORT`: listen port (default: `8000`)

use faas_worker_core::DEFAULT_HANDLER;

pub const HANDLER_FUNCTION_VAR: &str = "HANDLER_FUNCTION";
pub const HOST_VAR: &str = "WORKER_HOST";
pub const PORT_VAR: &str = "WORKER_PORT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': expected a port number")]
    InvalidPort { var: &'static str, value: String },
}

/// Startup configuration. Read once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub handler_function: String,
    pub host: String,
    pub port: u16,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        WorkerConfig {
            handler_function: DEFAULT_HANDLER.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl WorkerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = WorkerConfig::default();

        let handler_function = lookup(HANDLER_FUNCTION_VAR).unwrap_or(defaults.handler_function);
        let host = lookup(HOST_VAR).unwrap_or(defaults.host);
        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    var: PORT_VAR,
                    value,
                })?,
            None => defaults.port,
        };

        Ok(WorkerConfig {
            handler_function,
            host,
            port,
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
