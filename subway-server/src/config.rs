//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "SUBWAY_BIND_ADDR";

/// Environment variable holding the snapshot file path.
pub const SNAPSHOT_PATH_VAR: &str = "SUBWAY_SNAPSHOT_PATH";

/// Error returned when the environment holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a socket address")]
    InvalidBindAddr { var: &'static str, value: String },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Where to keep the JSON snapshot. `None` keeps everything in memory.
    pub snapshot_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(bind_addr: SocketAddr, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            bind_addr,
            snapshot_path,
        }
    }

    /// Read configuration from the process environment, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR).filter(|v| !v.trim().is_empty()) {
            config.bind_addr =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidBindAddr {
                        var: BIND_ADDR_VAR,
                        value: value.clone(),
                    })?;
        }

        if let Some(value) = lookup(SNAPSHOT_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.snapshot_path = Some(PathBuf::from(value));
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            snapshot_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.snapshot_path, None);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn reads_both_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (SNAPSHOT_PATH_VAR, "/var/lib/subway/state.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(
            config.snapshot_path,
            Some(PathBuf::from("/var/lib/subway/state.json"))
        );
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            ServerConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, " "), (SNAPSHOT_PATH_VAR, "")]))
                .unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn bad_address_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid SUBWAY_BIND_ADDR: \"localhost\" is not a socket address"
        );
    }

    #[test]
    fn custom_config() {
        let addr = SocketAddr::from(([10, 0, 0, 1], 80));
        let config = ServerConfig::new(addr, Some(PathBuf::from("s.json")));

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.snapshot_path, Some(PathBuf::from("s.json")));
    }
}
