//! Server configuration from environment variables

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_DRUMROLL_MS: u64 = 3000;
const DEFAULT_MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    /// Directory served for the front-end
    pub static_dir: String,
    /// How long a category's drumroll lasts before the winner is shown
    pub drumroll: Duration,
    pub max_photo_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 6573)),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            drumroll: Duration::from_millis(DEFAULT_DRUMROLL_MS),
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
        }
    }
}

impl AppConfig {
    /// Load config from environment variables, falling back to defaults
    /// (with a warning) for anything missing or malformed.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = parse_or_default("AWARDNIGHT_BIND", defaults.bind);
        let static_dir = std::env::var("AWARDNIGHT_STATIC_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.static_dir);
        let drumroll_ms = parse_or_default("AWARDNIGHT_DRUMROLL_MS", DEFAULT_DRUMROLL_MS);
        let max_photo_bytes =
            parse_or_default("AWARDNIGHT_MAX_PHOTO_BYTES", defaults.max_photo_bytes);

        tracing::info!(
            "Config: bind={}, static_dir={}, drumroll={}ms, max_photo_bytes={}",
            bind,
            static_dir,
            drumroll_ms,
            max_photo_bytes
        );

        Self {
            bind,
            static_dir,
            drumroll: Duration::from_millis(drumroll_ms),
            max_photo_bytes,
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(None),
    }
}

fn parse_or_default<T: FromStr>(var: &'static str, default: T) -> T {
    match parse_var(var) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("{}, using default", e);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "AWARDNIGHT_BIND",
        "AWARDNIGHT_STATIC_DIR",
        "AWARDNIGHT_DRUMROLL_MS",
        "AWARDNIGHT_MAX_PHOTO_BYTES",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = AppConfig::from_env();

        assert_eq!(config.bind, SocketAddr::from(([0, 0, 0, 0], 6573)));
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.drumroll, Duration::from_millis(3000));
        assert_eq!(config.max_photo_bytes, 2 * 1024 * 1024);
    }

    #[test]
    #[serial]
    fn test_reads_env() {
        clear_env();
        std::env::set_var("AWARDNIGHT_BIND", "127.0.0.1:9000");
        std::env::set_var("AWARDNIGHT_STATIC_DIR", " public ");
        std::env::set_var("AWARDNIGHT_DRUMROLL_MS", "500");
        std::env::set_var("AWARDNIGHT_MAX_PHOTO_BYTES", "1024");

        let config = AppConfig::from_env();
        assert_eq!(config.bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.drumroll, Duration::from_millis(500));
        assert_eq!(config.max_photo_bytes, 1024);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_values_fall_back() {
        clear_env();
        std::env::set_var("AWARDNIGHT_DRUMROLL_MS", "soon");
        std::env::set_var("AWARDNIGHT_BIND", "not an address");

        let config = AppConfig::from_env();
        assert_eq!(config.drumroll, Duration::from_millis(3000));
        assert_eq!(config.bind, SocketAddr::from(([0, 0, 0, 0], 6573)));

        let err = parse_var::<u64>("AWARDNIGHT_DRUMROLL_MS").unwrap_err();
        assert_eq!(
            err.to_string(),
            "AWARDNIGHT_DRUMROLL_MS has invalid value \"soon\""
        );

        clear_env();
    }
}
