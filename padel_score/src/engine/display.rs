//! Human-readable score formatting.
//!
//! Scores read `us-them`, except during advantage: the side holding it is
//! listed first, so either side's advantage reads `A-40`. The holder itself
//! is on [`Game::advantage`].

use super::{
    constants::DEUCE_POINTS,
    models::{Game, Match, SetScoreLine, Team},
};

/// Format one side's point score.
#[must_use]
pub fn format_point_score(score: u32, is_tiebreak: bool) -> String {
    if is_tiebreak {
        return score.to_string();
    }
    score.min(DEUCE_POINTS).to_string()
}

/// Format a game score, e.g. `15-30`, `40-40`, `A-40` or `5-3` in a tie-break.
#[must_use]
pub fn display_score(
    score_us: u32,
    score_them: u32,
    is_deuce: bool,
    advantage: Option<Team>,
    is_tiebreak: bool,
) -> String {
    if is_tiebreak {
        return format!("{score_us}-{score_them}");
    }

    if is_deuce {
        return match advantage {
            Some(_) => "A-40".to_string(),
            None => "40-40".to_string(),
        };
    }

    format!(
        "{}-{}",
        format_point_score(score_us, false),
        format_point_score(score_them, false)
    )
}

impl Game {
    #[must_use]
    pub fn display_score(&self) -> String {
        display_score(
            self.score.us,
            self.score.them,
            self.is_deuce,
            self.advantage,
            self.is_tiebreak,
        )
    }
}

impl Match {
    /// One-line summary such as `Set 2 • 3-1 • 30-15`.
    #[must_use]
    pub fn summary(&self) -> String {
        let Some(set) = self.current_set() else {
            return format!("Match finished: {}", self.final_score);
        };
        let Some(game) = self.current_game() else {
            return format!("Set {}", set.set_number);
        };

        format!(
            "Set {} • {} • {}",
            set.set_number,
            set.score,
            game.display_score()
        )
    }

    /// Game tally of every set played so far.
    #[must_use]
    pub fn sets_scores(&self) -> Vec<SetScoreLine> {
        self.sets
            .iter()
            .map(|set| SetScoreLine {
                set_number: set.set_number,
                us: set.score.us,
                them: set.score.them,
                completed: !set.is_in_progress(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_scores() {
        assert_eq!(display_score(0, 0, false, None, false), "0-0");
        assert_eq!(display_score(15, 30, false, None, false), "15-30");
        assert_eq!(display_score(40, 30, false, None, false), "40-30");
    }

    #[test]
    fn test_deuce_and_advantage() {
        assert_eq!(display_score(40, 40, true, None, false), "40-40");
        assert_eq!(display_score(40, 40, true, Some(Team::Us), false), "A-40");
        assert_eq!(display_score(40, 40, true, Some(Team::Them), false), "A-40");
    }

    #[test]
    fn test_tiebreak_scores() {
        assert_eq!(display_score(3, 2, false, None, true), "3-2");
        assert_eq!(display_score(12, 10, false, None, true), "12-10");
    }

    #[test]
    fn test_format_point_score_caps_regular_games() {
        assert_eq!(format_point_score(45, false), "40");
        assert_eq!(format_point_score(45, true), "45");
    }
}
