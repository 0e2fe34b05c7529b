//! CLI configuration management.
//!
//! Consolidates all environment variable reads and merges them with command
//! line overrides.

use std::path::{Path, PathBuf};

use padel_score::{
    engine::constants::{MAX_SETS_TO_WIN, MIN_SETS_TO_WIN},
    settings::AppSettings,
};

/// Configuration loaded from command line arguments and environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Sets needed to win, overriding stored settings when present
    pub sets_to_win: Option<u32>,
    /// Final-set tie-break rule, overriding stored settings when present
    pub final_set_tiebreak: Option<bool>,
    /// Directory for the JSON file store; nothing is persisted without it
    pub store_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// Command line values win over `PADEL_SETS_TO_WIN`,
    /// `PADEL_FINAL_SET_TIEBREAK` and `PADEL_STORE_DIR`.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(
        sets_to_win_override: Option<u32>,
        no_final_tiebreak: bool,
        store_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            sets_to_win_override,
            no_final_tiebreak,
            store_override,
        )
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        sets_to_win_override: Option<u32>,
        no_final_tiebreak: bool,
        store_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let sets_to_win = match sets_to_win_override {
            Some(n) => Some(n),
            None => parse_var(&lookup, "PADEL_SETS_TO_WIN")?,
        };

        let final_set_tiebreak = if no_final_tiebreak {
            Some(false)
        } else {
            parse_var(&lookup, "PADEL_FINAL_SET_TIEBREAK")?
        };

        let store_dir = store_override.or_else(|| {
            lookup("PADEL_STORE_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
        });

        Ok(CliConfig {
            sets_to_win,
            final_set_tiebreak,
            store_dir,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(n) = self.sets_to_win
            && !(MIN_SETS_TO_WIN..=MAX_SETS_TO_WIN).contains(&n)
        {
            return Err(ConfigError::Invalid {
                var: "PADEL_SETS_TO_WIN".to_string(),
                reason: format!("Must be {MIN_SETS_TO_WIN} or {MAX_SETS_TO_WIN}, got {n}"),
            });
        }
        Ok(())
    }

    /// Apply the overrides on top of stored settings
    #[must_use]
    pub fn apply(&self, settings: AppSettings) -> AppSettings {
        AppSettings {
            default_sets_to_win: self.sets_to_win.unwrap_or(settings.default_sets_to_win),
            tiebreak_in_final_set: self
                .final_set_tiebreak
                .unwrap_or(settings.tiebreak_in_final_set),
        }
    }

    /// The store directory, required when resuming a match
    pub fn require_store(&self) -> Result<&Path, ConfigError> {
        self.store_dir
            .as_deref()
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "PADEL_STORE_DIR".to_string(),
                hint: "Pass --store DIR to resume a stored match".to_string(),
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an optional variable, rejecting values that are set but malformed
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("Cannot parse {raw:?}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let config = CliConfig::from_lookup(env(&[]), None, false, None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.apply(AppSettings::default()), AppSettings::default());
    }

    #[test]
    fn test_environment_values() {
        let config = CliConfig::from_lookup(
            env(&[
                ("PADEL_SETS_TO_WIN", "3"),
                ("PADEL_FINAL_SET_TIEBREAK", "false"),
                ("PADEL_STORE_DIR", "/tmp/padel"),
            ]),
            None,
            false,
            None,
        )
        .unwrap();

        assert_eq!(config.sets_to_win, Some(3));
        assert_eq!(config.final_set_tiebreak, Some(false));
        assert_eq!(config.require_store().unwrap(), Path::new("/tmp/padel"));
    }

    #[test]
    fn test_arguments_override_environment() {
        let config = CliConfig::from_lookup(
            env(&[
                ("PADEL_SETS_TO_WIN", "3"),
                ("PADEL_FINAL_SET_TIEBREAK", "true"),
                ("PADEL_STORE_DIR", "/tmp/padel"),
            ]),
            Some(2),
            true,
            Some(PathBuf::from("/var/padel")),
        )
        .unwrap();

        assert_eq!(config.sets_to_win, Some(2));
        assert_eq!(config.final_set_tiebreak, Some(false));
        assert_eq!(config.store_dir, Some(PathBuf::from("/var/padel")));
    }

    #[test]
    fn test_malformed_variable() {
        let err = CliConfig::from_lookup(env(&[("PADEL_SETS_TO_WIN", "two")]), None, false, None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "PADEL_SETS_TO_WIN"));
    }

    #[test]
    fn test_validation_sets_to_win_range() {
        let config = CliConfig {
            sets_to_win: Some(4),
            ..CliConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid { .. }
        ));
    }

    #[test]
    fn test_apply_keeps_stored_values_without_overrides() {
        let stored = AppSettings {
            default_sets_to_win: 3,
            tiebreak_in_final_set: false,
        };
        let config = CliConfig {
            sets_to_win: None,
            final_set_tiebreak: Some(true),
            store_dir: None,
        };

        let applied = config.apply(stored);
        assert_eq!(applied.default_sets_to_win, 3);
        assert!(applied.tiebreak_in_final_set);
    }

    #[test]
    fn test_resume_requires_store() {
        let err = CliConfig::default().require_store().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PADEL_STORE_DIR"));
        assert!(msg.contains("--store"));
    }
}
