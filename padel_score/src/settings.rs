//! Application-level defaults for new matches.

use serde::{Deserialize, Serialize};

use crate::engine::{MatchConfig, TeamThem, TeamUs};

/// Defaults applied when setting up a new match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub default_sets_to_win: u32,
    pub tiebreak_in_final_set: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_sets_to_win: 2,
            tiebreak_in_final_set: true,
        }
    }
}

impl AppSettings {
    /// Build a match configuration for the given teams using these defaults.
    #[must_use]
    pub fn match_config(&self, team_us: TeamUs, team_them: TeamThem) -> MatchConfig {
        MatchConfig {
            team_us,
            team_them,
            sets_to_win: self.default_sets_to_win,
            tiebreak_in_final_set: self.tiebreak_in_final_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_sets_to_win, 2);
        assert!(settings.tiebreak_in_final_set);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"default_sets_to_win": 3}"#).unwrap();
        assert_eq!(settings.default_sets_to_win, 3);
        assert!(settings.tiebreak_in_final_set);
    }

    #[test]
    fn test_match_config_from_settings() {
        let settings = AppSettings {
            default_sets_to_win: 3,
            tiebreak_in_final_set: false,
        };
        let config = settings.match_config(
            TeamUs {
                player_left: "L".to_string(),
                player_right: "R".to_string(),
            },
            TeamThem {
                player1: "A".to_string(),
                player2: "B".to_string(),
            },
        );

        assert_eq!(config.sets_to_win, 3);
        assert!(!config.tiebreak_in_final_set);
        assert_eq!(config.team_them.player2, "B");
    }
}
