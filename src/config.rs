use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Clinicheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen address for the HTTP surface.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

/// Environment variable overriding the reference table directory.
pub const DATA_DIR_ENV: &str = "CLINICHECK_DATA_DIR";

/// Environment variable overriding the listen address.
pub const BIND_ENV: &str = "CLINICHECK_BIND";

/// Upper bound on concurrently tracked sessions; the least recently used
/// one is evicted past this.
pub const MAX_SESSIONS: usize = 1024;

/// Sessions idle longer than this are dropped on the next create.
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Age bounds accepted by the check form.
pub const MIN_AGE_YEARS: u32 = 0;
pub const MAX_AGE_YEARS: u32 = 120;

/// Weight bounds accepted by the check form (kilograms).
pub const MIN_WEIGHT_KG: f64 = 0.0;
pub const MAX_WEIGHT_KG: f64 = 300.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address {0:?}: {1}")]
    InvalidBind(String, String),
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "clinicheck_lib=info,clinicheck=info,tower_http=warn"
}

/// Get the application data directory
/// ~/Clinicheck/ on all platforms. `None` when no home directory is known.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// User-provided reference tables, if any: ~/Clinicheck/data
pub fn user_tables_dir() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join("data"))
}

/// Reference tables bundled with the crate.
pub fn bundled_tables_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(BIND_ENV).ok(),
        )
    }

    /// Resolve configuration from explicit overrides (both optional).
    pub fn from_vars(
        data_dir: Option<String>,
        bind: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match data_dir.filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => user_tables_dir()
                .filter(|dir| dir.is_dir())
                .unwrap_or_else(bundled_tables_dir),
        };

        let bind_raw = bind
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBind(bind_raw.clone(), e.to_string()))?;

        Ok(Self {
            data_dir,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir().unwrap();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Clinicheck"));
    }

    #[test]
    fn bundled_tables_dir_is_resources() {
        assert!(bundled_tables_dir().ends_with("resources"));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = AppConfig::from_vars(Some("/tmp/tables".into()), None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tables"));
    }

    #[test]
    fn default_bind_addr() {
        let config = AppConfig::from_vars(Some("/tmp".into()), None).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn custom_bind_addr() {
        let config =
            AppConfig::from_vars(Some("/tmp".into()), Some("0.0.0.0:9000".into())).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn invalid_bind_addr_rejected() {
        let err = AppConfig::from_vars(Some("/tmp".into()), Some("not-an-addr".into()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind(..)));
    }

    #[test]
    fn app_name_is_clinicheck() {
        assert_eq!(APP_NAME, "Clinicheck");
    }
}
