//! Runtime configuration.
//!
//! Resolution order, later wins:
//!
//! 1. built-in defaults (`0.0.0.0:8080`, `info`, compact logs)
//! 2. the TOML file named by `APPOINTY_CONFIG` (default `appointy.toml`),
//!    skipped silently when absent
//! 3. `APPOINTY_HOST`, `APPOINTY_PORT`, `APPOINTY_LOG`, `APPOINTY_LOG_FORMAT`
//!
//! `.env` files are honoured through `dotenvy` before step 3.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [log]
//! filter = "info,appointy=debug"
//! format = "json"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_PATH_VAR: &str = "APPOINTY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "appointy.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {key} `{value}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 8080 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` still wins.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "info".into(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl Config {
    /// Loads `.env`, the config file and environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a TOML file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|source| ConfigError::Parse {
                path: path.to_owned(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read { path: path.to_owned(), source }),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `APPOINTY_*` overrides looked up through `var`.
    pub fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = var("APPOINTY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("APPOINTY_PORT") {
            self.server.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue { key: "APPOINTY_PORT", value: port.clone(), reason: e.to_string() }
            })?;
        }
        if let Some(filter) = var("APPOINTY_LOG") {
            self.log.filter = filter;
        }
        if let Some(format) = var("APPOINTY_LOG_FORMAT") {
            self.log.format = match format.to_ascii_lowercase().as_str() {
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "APPOINTY_LOG_FORMAT",
                        value: format,
                        reason: "expected `compact` or `json`".into(),
                    });
                }
            };
        }
        Ok(())
    }

    /// The socket address the server binds to.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                key: "server.host",
                value: self.server.host.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
