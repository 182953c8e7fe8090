//! Configuration loading and defaults for the engine's ambient parameters.
//!
//! Configuration is resolved in order of precedence (highest wins):
//!
//! 1. **Environment variables** — `QUESTREAM_LOG_LEVEL`
//! 2. **Config file** — path via `--config <path>`, or `questream.toml` in CWD
//! 3. **Compiled defaults** — see each field's default value below
//!
//! The TOML file mirrors the struct hierarchy:
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [registry]
//! default_snapshot_limit_kind = "unlimited"  # "head" | "tail" | "unlimited"
//! default_snapshot_limit_size = 100
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::limit::SnapshotLimit;

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter level (default `info`). Overridden by `RUST_LOG` env var.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Registry-wide defaults applied when a caller doesn't specify its own.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Truncation kind applied to a `Commit` snapshot when the caller
    /// doesn't specify one (default `unlimited`).
    #[serde(default = "default_snapshot_limit_kind")]
    pub default_snapshot_limit_kind: String,
    /// Size bound used by `head`/`tail` (default 100). Ignored for
    /// `unlimited`.
    #[serde(default = "default_snapshot_limit_size")]
    pub default_snapshot_limit_size: usize,
}

impl RegistryConfig {
    /// Builds the [`SnapshotLimit`] described by this config. An
    /// unrecognized `default_snapshot_limit_kind` falls back to
    /// `Unlimited` rather than failing config load.
    pub fn default_snapshot_limit(&self) -> SnapshotLimit {
        match self.default_snapshot_limit_kind.as_str() {
            "head" => SnapshotLimit::Head(self.default_snapshot_limit_size),
            "tail" => SnapshotLimit::Tail(self.default_snapshot_limit_size),
            _ => SnapshotLimit::Unlimited,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_snapshot_limit_kind() -> String {
    "unlimited".to_string()
}
fn default_snapshot_limit_size() -> usize {
    100
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_snapshot_limit_kind: default_snapshot_limit_kind(),
            default_snapshot_limit_size: default_snapshot_limit_size(),
        }
    }
}

impl Config {
    /// Load configuration with the precedence chain: env vars > file > defaults.
    ///
    /// If `path` is `Some`, reads that file (panics on failure). Otherwise
    /// looks for `questream.toml` in the current directory, falling back to
    /// compiled defaults.
    pub fn load(path: Option<&str>) -> Self {
        let mut config = if let Some(p) = path {
            let content = std::fs::read_to_string(p)
                .unwrap_or_else(|e| panic!("Failed to read config file {p}: {e}"));
            toml::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse config file {p}: {e}"))
        } else if Path::new("questream.toml").exists() {
            let content =
                std::fs::read_to_string("questream.toml").expect("Failed to read questream.toml");
            toml::from_str(&content).expect("Failed to parse questream.toml")
        } else {
            Config { logging: LoggingConfig::default(), registry: RegistryConfig::default() }
        };

        if let Ok(level) = std::env::var("QUESTREAM_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unlimited() {
        let config = RegistryConfig::default();
        assert_eq!(config.default_snapshot_limit(), SnapshotLimit::Unlimited);
    }

    #[test]
    fn unrecognized_kind_falls_back_to_unlimited() {
        let config = RegistryConfig {
            default_snapshot_limit_kind: "bogus".to_string(),
            default_snapshot_limit_size: 10,
        };
        assert_eq!(config.default_snapshot_limit(), SnapshotLimit::Unlimited);
    }

    #[test]
    fn head_and_tail_kinds_carry_size() {
        let config = RegistryConfig {
            default_snapshot_limit_kind: "head".to_string(),
            default_snapshot_limit_size: 7,
        };
        assert_eq!(config.default_snapshot_limit(), SnapshotLimit::Head(7));

        let config = RegistryConfig {
            default_snapshot_limit_kind: "tail".to_string(),
            default_snapshot_limit_size: 7,
        };
        assert_eq!(config.default_snapshot_limit(), SnapshotLimit::Tail(7));
    }
}
