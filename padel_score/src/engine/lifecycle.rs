//! Match creation, pause/resume and accessors for the active set and game.

use chrono::Utc;
use log::info;
use uuid::Uuid;

use super::{
    constants::{MATCH_FORMAT_VERSION, MAX_SETS_TO_WIN, MIN_SETS_TO_WIN},
    errors::{ScoreError, ScoreResult},
    models::{Game, Match, MatchConfig, MatchRules, MatchStatus, Set, TeamScore},
};

impl Match {
    /// Create a match in progress with its first set and game in place.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidSetsToWin`] unless `sets_to_win` is 2 or 3.
    pub fn new(config: MatchConfig) -> ScoreResult<Self> {
        if !(MIN_SETS_TO_WIN..=MAX_SETS_TO_WIN).contains(&config.sets_to_win) {
            return Err(ScoreError::InvalidSetsToWin(config.sets_to_win));
        }

        let m = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            completed_at: None,
            status: MatchStatus::InProgress,
            duration: 0,
            paused_at: None,
            team_us: config.team_us,
            team_them: config.team_them,
            rules: MatchRules {
                sets_to_win: config.sets_to_win,
                tiebreak_in_final_set: config.tiebreak_in_final_set,
            },
            current_set: 1,
            sets: vec![Set::new(1)],
            final_score: TeamScore::default(),
            winner: None,
            version: MATCH_FORMAT_VERSION.to_string(),
        };

        info!(
            "Created match {} (first to {} sets, final-set tie-break: {})",
            m.id, m.rules.sets_to_win, m.rules.tiebreak_in_final_set
        );
        Ok(m)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// The set currently being played, `None` once the match is over.
    #[must_use]
    pub fn current_set(&self) -> Option<&Set> {
        self.sets
            .get((self.current_set as usize).wrapping_sub(1))
            .filter(|set| set.is_in_progress())
    }

    /// The game currently being played, `None` once the match is over.
    #[must_use]
    pub fn current_game(&self) -> Option<&Game> {
        let set = self.current_set()?;
        set.games
            .get((set.current_game as usize).wrapping_sub(1))
            .filter(|game| game.is_in_progress())
    }

    /// Pause a match in progress. Returns `false` if it was not in progress.
    pub fn pause(&mut self) -> bool {
        if self.status != MatchStatus::InProgress {
            return false;
        }
        self.status = MatchStatus::Paused;
        self.paused_at = Some(Utc::now());
        info!("Match {} paused", self.id);
        true
    }

    /// Resume a paused match. Returns `false` if it was not paused.
    pub fn resume(&mut self) -> bool {
        if self.status != MatchStatus::Paused {
            return false;
        }
        self.status = MatchStatus::InProgress;
        self.paused_at = None;
        info!("Match {} resumed", self.id);
        true
    }

    /// Add playing time measured by the caller's clock.
    pub fn add_elapsed(&mut self, secs: u64) {
        self.duration = self.duration.saturating_add(secs);
    }
}
