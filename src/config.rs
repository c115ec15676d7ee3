//! Configuration for the client and server binaries.
//!
//! Supports both command-line arguments and a TOML configuration file.
//! CLI arguments take precedence over config file values; the file covers
//! the settings the endpoints share (port, log level), while the client's
//! target hostname is CLI-only.

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use crate::protocol;

/// Command-line arguments for the client binary
#[derive(Parser, Debug)]
#[command(name = "oneshot-client")]
#[command(version = "0.1.0")]
#[command(about = "Connect to the exchange server, send one greeting, drain the replies", long_about = None)]
pub struct ClientArgs {
    /// Server hostname or address to connect to
    pub host: String,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to connect on
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Command-line arguments for the server binary
#[derive(Parser, Debug)]
#[command(name = "oneshot-server")]
#[command(version = "0.1.0")]
#[command(about = "Accept one client and acknowledge every chunk it sends", long_about = None)]
pub struct ServerArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Exchange-related configuration
#[derive(Debug, Deserialize)]
pub struct ExchangeConfig {
    /// Port both endpoints use
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    protocol::DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl ClientConfig {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    ///
    /// A usage error (missing or surplus arguments) prints the rendered
    /// usage text and exits with status 1 before any network activity.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = ClientArgs::try_parse().unwrap_or_else(|e| usage_exit(e));
        Self::from_args(cli)
    }

    fn from_args(cli: ClientArgs) -> Result<Self, ConfigError> {
        let toml_config = load_toml(cli.config.as_ref())?;

        Ok(ClientConfig {
            host: cli.host,
            port: cli.port.unwrap_or(toml_config.exchange.port),
            log_level: if cli.log_level != "info" {
                cli.log_level
            } else {
                toml_config.logging.level
            },
        })
    }
}

/// Final resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = ServerArgs::try_parse().unwrap_or_else(|e| usage_exit(e));
        Self::from_args(cli)
    }

    fn from_args(cli: ServerArgs) -> Result<Self, ConfigError> {
        let toml_config = load_toml(cli.config.as_ref())?;

        Ok(ServerConfig {
            port: cli.port.unwrap_or(toml_config.exchange.port),
            log_level: if cli.log_level != "info" {
                cli.log_level
            } else {
                toml_config.logging.level
            },
        })
    }
}

/// Read and parse the TOML file if one was named.
fn load_toml(path: Option<&PathBuf>) -> Result<TomlConfig, ConfigError> {
    match path {
        Some(config_path) => {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents).map_err(|e| ConfigError::TomlParse(config_path.clone(), e))
        }
        None => Ok(TomlConfig::default()),
    }
}

/// Print the rendered usage or error text and terminate.
///
/// clap's own exit path uses status 2 for usage errors; the exchange
/// contract fixes every failure at status 1.
fn usage_exit(err: clap::Error) -> ! {
    let _ = err.print();
    std::process::exit(1);
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    FileRead(PathBuf, std::io::Error),
    TomlParse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::TomlParse(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.exchange.port, 27015);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [exchange]
            port = 28100

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.exchange.port, 28100);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("[logging]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(config.exchange.port, 27015);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_client_requires_host() {
        // Zero positional arguments is a usage error, caught before any
        // network activity.
        assert!(ClientArgs::try_parse_from(["oneshot-client"]).is_err());
    }

    #[test]
    fn test_client_rejects_surplus_args() {
        assert!(ClientArgs::try_parse_from(["oneshot-client", "host-a", "host-b"]).is_err());
    }

    #[test]
    fn test_cli_port_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[exchange]\nport = 28100").unwrap();

        let cli = ClientArgs::try_parse_from([
            "oneshot-client",
            "example.org",
            "--port",
            "28500",
            "--config",
            file.path().to_str().unwrap(),
        ])
        .unwrap();

        let config = ClientConfig::from_args(cli).unwrap();
        assert_eq!(config.host, "example.org");
        assert_eq!(config.port, 28500);
    }

    #[test]
    fn test_file_port_without_cli_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[exchange]\nport = 28100").unwrap();

        let cli = ServerArgs::try_parse_from([
            "oneshot-server",
            "--config",
            file.path().to_str().unwrap(),
        ])
        .unwrap();

        let config = ServerConfig::from_args(cli).unwrap();
        assert_eq!(config.port, 28100);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = ClientArgs::try_parse_from([
            "oneshot-client",
            "example.org",
            "--config",
            "/nonexistent/oneshot.toml",
        ])
        .unwrap();

        match ClientConfig::from_args(cli) {
            Err(ConfigError::FileRead(path, _)) => {
                assert_eq!(path, PathBuf::from("/nonexistent/oneshot.toml"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
