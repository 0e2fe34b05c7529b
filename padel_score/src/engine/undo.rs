//! Exact reversal of the most recently scored point.
//!
//! A game or set boundary is crossed with an empty successor already in
//! place, so the last real point may sit one game or one set back. Undo drops
//! those empty successors, reopens whatever the point completed and restores
//! the game score from the point's `score_before` snapshot.

use log::{debug, info, warn};

use super::models::{Match, MatchStatus, PlayStatus};

/// Where the most recent point lives, relative to the active game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastPoint {
    /// In the active game
    ActiveGame,
    /// In the previous game of the active set; the active game is empty
    PreviousGame,
    /// In the last game of the previous set; the active set is empty
    PreviousSet,
}

impl Match {
    /// Undo the most recently scored point anywhere in the match.
    ///
    /// Returns `false` and leaves the record untouched when no point has been
    /// scored yet.
    pub fn undo_last_point(&mut self) -> bool {
        let Some(location) = self.locate_last_point() else {
            warn!("Match {}: nothing to undo", self.id);
            return false;
        };

        match location {
            LastPoint::ActiveGame => {}
            LastPoint::PreviousGame => {
                if let Some(set) = self.sets.last_mut() {
                    set.games.pop();
                    set.current_game -= 1;
                }
            }
            LastPoint::PreviousSet => {
                self.sets.pop();
                self.current_set -= 1;
            }
        }

        let Some(set) = self.sets.last_mut() else {
            return false;
        };
        let Some(game) = set.games.last_mut() else {
            return false;
        };

        if let (PlayStatus::Completed, Some(game_winner)) = (game.status, game.winner) {
            game.reopen();
            set.score[game_winner] -= 1;
            set.stats.release(&game.stats);
            debug!("Set {}: reopened game {}", set.set_number, game.game_number);

            if let (PlayStatus::Completed, Some(set_winner)) = (set.status, set.winner) {
                set.status = PlayStatus::InProgress;
                set.winner = None;
                set.stats.clear_averages();
                self.final_score[set_winner] -= 1;
                debug!("Match {}: reopened set {}", self.id, set.set_number);

                if self.status == MatchStatus::Completed {
                    self.status = MatchStatus::InProgress;
                    self.winner = None;
                    self.completed_at = None;
                    info!("Match {}: reopened after undo", self.id);
                }
            }
        }

        match game.pop_point() {
            Some(point) => {
                info!(
                    "Match {}: undid point {} of set {} game {} ({})",
                    self.id, point.point_number, set.set_number, game.game_number, point.winner
                );
                true
            }
            None => false,
        }
    }

    fn locate_last_point(&self) -> Option<LastPoint> {
        let set = self.sets.last()?;
        let game = set.games.last()?;
        if !game.points.is_empty() {
            return Some(LastPoint::ActiveGame);
        }

        if set.games.len() > 1 {
            let previous = &set.games[set.games.len() - 2];
            return (!previous.points.is_empty()).then_some(LastPoint::PreviousGame);
        }

        if self.sets.len() > 1 {
            let previous = &self.sets[self.sets.len() - 2];
            return previous
                .games
                .last()
                .filter(|game| !game.points.is_empty())
                .map(|_| LastPoint::PreviousSet);
        }

        None
    }
}
