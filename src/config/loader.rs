//! Configuration file loading with precedence handling.
//!
//! Resolution order: Defaults -> Config File -> Env Vars -> CLI Args.

use crate::engine::Granularity;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default lane budget per week row.
pub const DEFAULT_MAX_LANES: usize = 4;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Granularity value not one of week/month/quarter/semester.
    #[error("Invalid granularity in configuration: {0}")]
    InvalidGranularity(#[from] crate::engine::InvalidGranularity),

    /// Lane budget of zero would overflow every item.
    #[error("max_lanes must be >= 1")]
    ZeroMaxLanes,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/calgrid/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default view granularity ("week", "month", "quarter", "semester").
    #[serde(default)]
    pub granularity: Option<String>,

    /// Lane budget per week row.
    #[serde(default)]
    pub max_lanes: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// View granularity at startup.
    pub granularity: Granularity,
    /// Lane budget per week row.
    pub max_lanes: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            max_lanes: DEFAULT_MAX_LANES,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve the default log file path.
///
/// `~/.local/state/calgrid/calgrid.log` on Unix-like systems, or the
/// platform equivalent; falls back to the current directory when no state
/// directory can be determined.
fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("calgrid").join("calgrid.log"))
        .unwrap_or_else(|| PathBuf::from("calgrid.log"))
}

/// Resolve the default config file path (`~/.config/calgrid/config.toml`).
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("calgrid").join("config.toml"))
}

/// Load the config file, honoring an explicit `--config` path.
///
/// An explicit path that cannot be read or parsed is an error; a missing
/// file at the default location is not (returns `None`).
pub fn load_config_with_precedence(
    explicit_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    let (path, required) = match explicit_path {
        Some(path) => (path, true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return Ok(None),
        },
    };

    if !path.exists() {
        if required {
            return Err(ConfigError::ReadError {
                path,
                reason: "file not found".to_string(),
            });
        }
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let parsed = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path,
        reason: e.to_string(),
    })?;

    Ok(Some(parsed))
}

/// Merge a config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let mut config = ResolvedConfig::default();
    let Some(file) = file else {
        return Ok(config);
    };

    if let Some(granularity) = file.granularity {
        config.granularity = granularity.parse()?;
    }
    if let Some(max_lanes) = file.max_lanes {
        if max_lanes == 0 {
            return Err(ConfigError::ZeroMaxLanes);
        }
        config.max_lanes = max_lanes;
    }
    if let Some(log_file_path) = file.log_file_path {
        config.log_file_path = log_file_path;
    }
    Ok(config)
}

/// Apply `CALGRID_GRANULARITY` / `CALGRID_MAX_LANES` environment overrides.
///
/// Unparsable values are ignored rather than fatal; the env var is a
/// convenience layer, not a validated input surface.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var("CALGRID_GRANULARITY") {
        if let Ok(granularity) = value.parse() {
            config.granularity = granularity;
        }
    }
    if let Ok(value) = std::env::var("CALGRID_MAX_LANES") {
        if let Ok(max_lanes) = value.parse::<usize>() {
            if max_lanes >= 1 {
                config.max_lanes = max_lanes;
            }
        }
    }
    config
}

/// Apply CLI argument overrides (highest precedence).
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    granularity: Option<Granularity>,
    max_lanes: Option<usize>,
) -> ResolvedConfig {
    if let Some(granularity) = granularity {
        config.granularity = granularity;
    }
    if let Some(max_lanes) = max_lanes {
        config.max_lanes = max_lanes;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_granularity_is_month() {
        assert_eq!(ResolvedConfig::default().granularity, Granularity::Month);
    }

    #[test]
    fn default_max_lanes_is_four() {
        assert_eq!(ResolvedConfig::default().max_lanes, 4);
    }

    #[test]
    fn merge_none_returns_defaults() {
        let config = merge_config(None).unwrap();
        assert_eq!(config, ResolvedConfig::default());
    }

    #[test]
    fn merge_applies_file_values() {
        let file = ConfigFile {
            granularity: Some("quarter".to_string()),
            max_lanes: Some(6),
            log_file_path: Some(PathBuf::from("/tmp/calgrid.log")),
        };
        let config = merge_config(Some(file)).unwrap();
        assert_eq!(config.granularity, Granularity::Quarter);
        assert_eq!(config.max_lanes, 6);
        assert_eq!(config.log_file_path, PathBuf::from("/tmp/calgrid.log"));
    }

    #[test]
    fn merge_rejects_invalid_granularity() {
        let file = ConfigFile {
            granularity: Some("fortnight".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            merge_config(Some(file)),
            Err(ConfigError::InvalidGranularity(_))
        ));
    }

    #[test]
    fn merge_rejects_zero_max_lanes() {
        let file = ConfigFile {
            max_lanes: Some(0),
            ..Default::default()
        };
        assert_eq!(merge_config(Some(file)), Err(ConfigError::ZeroMaxLanes));
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let config = apply_cli_overrides(
            ResolvedConfig::default(),
            Some(Granularity::Week),
            Some(2),
        );
        assert_eq!(config.granularity, Granularity::Week);
        assert_eq!(config.max_lanes, 2);
    }

    #[test]
    fn cli_none_leaves_config_unchanged() {
        let config = apply_cli_overrides(ResolvedConfig::default(), None, None);
        assert_eq!(config, ResolvedConfig::default());
    }

    #[test]
    fn config_file_parses_from_toml() {
        let file: ConfigFile = toml::from_str(
            r#"
            granularity = "week"
            max_lanes = 3
            "#,
        )
        .unwrap();
        assert_eq!(file.granularity.as_deref(), Some("week"));
        assert_eq!(file.max_lanes, Some(3));
    }

    #[test]
    fn config_file_rejects_unknown_fields() {
        let result: Result<ConfigFile, _> = toml::from_str("lanes = 3");
        assert!(result.is_err());
    }

    #[test]
    fn explicit_missing_config_path_errors() {
        let result = load_config_with_precedence(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
