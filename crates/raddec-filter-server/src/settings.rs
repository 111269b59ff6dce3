//! Server settings.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. Optional settings file (`RADDEC_FILTER_SETTINGS`, else the platform default)
//! 3. `RADDEC_FILTER_*` environment variables (e.g. `RADDEC_FILTER_BIND_ADDRESS`)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Environment variable naming the settings file.
pub const SETTINGS_ENV: &str = "RADDEC_FILTER_SETTINGS";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "RADDEC_FILTER";

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Settings for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_address: String,

    /// Filter parameter file (JSON or TOML). Missing file means no criteria.
    pub filter_path: PathBuf,

    /// Production logging (JSON files + compact stdout).
    pub production: bool,

    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Directory for rolling JSON log files in production.
    pub log_dir: PathBuf,
}

impl ServerSettings {
    /// Load settings from the default sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings source is malformed.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .or_else(default_settings_path);
        Self::load_from(path.as_deref())
    }

    /// Load settings using an explicit settings file (which may be absent).
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment override is malformed.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("filter_path", default_filter_path().to_string_lossy().into_owned())?
            .set_default("production", false)?
            .set_default("log_level", "info")?
            .set_default("log_dir", default_log_dir().to_string_lossy().into_owned())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
            .context("Invalid server settings")
    }

    /// Parse the bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if `bind_address` is not a socket address.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))
    }
}

/// Default filter parameter file location.
///
/// On Linux: `/etc/raddec-filter/filter.json`
/// Elsewhere: the platform config directory.
#[must_use]
pub fn default_filter_path() -> PathBuf {
    config_dir().join("filter.json")
}

/// Default production log directory.
///
/// On Linux: `/var/log/raddec-filter`
/// Elsewhere: `logs` under the platform data directory.
#[must_use]
pub fn default_log_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/var/log/raddec-filter")
    }
    #[cfg(not(target_os = "linux"))]
    {
        directories::ProjectDirs::from("", "", "raddec-filter")
            .map_or_else(|| PathBuf::from("./logs"), |dirs| dirs.data_dir().join("logs"))
    }
}

fn default_settings_path() -> Option<PathBuf> {
    Some(config_dir().join("settings.toml"))
}

fn config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/etc/raddec-filter")
    }
    #[cfg(not(target_os = "linux"))]
    {
        directories::ProjectDirs::from("", "", "raddec-filter")
            .map_or_else(|| PathBuf::from("."), |dirs| dirs.config_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ServerSettings::load_from(Some(&dir.path().join("missing.toml"))).unwrap();

        assert_eq!(settings.filter_path, default_filter_path());
        assert_eq!(settings.log_dir, default_log_dir());
        assert!(settings.socket_addr().is_ok());
    }

    #[test]
    fn test_settings_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "bind_address = \"127.0.0.1:4000\"").unwrap();
        writeln!(file, "filter_path = \"/tmp/filter.toml\"").unwrap();
        writeln!(file, "production = true").unwrap();
        writeln!(file, "log_dir = \"/tmp/raddec-logs\"").unwrap();

        let settings = ServerSettings::load_from(Some(file.path())).unwrap();
        assert_eq!(settings.bind_address, "127.0.0.1:4000");
        assert_eq!(settings.filter_path, PathBuf::from("/tmp/filter.toml"));
        assert!(settings.production);
        assert_eq!(settings.log_dir, PathBuf::from("/tmp/raddec-logs"));
        assert_eq!(settings.socket_addr().unwrap().port(), 4000);
    }

    #[test]
    fn test_invalid_bind_address() {
        let settings = ServerSettings {
            bind_address: "not-an-address".to_string(),
            filter_path: PathBuf::from("filter.json"),
            production: false,
            log_level: "info".to_string(),
            log_dir: default_log_dir(),
        };
        assert!(settings.socket_addr().is_err());
    }

    #[test]
    fn test_default_filter_path_is_json() {
        assert_eq!(
            default_filter_path().extension().and_then(|e| e.to_str()),
            Some("json")
        );
    }
}
