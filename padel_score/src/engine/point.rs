//! Point resolution inside a single game.

use chrono::Utc;
use log::debug;

use super::{
    constants::{DEUCE_POINTS, TIEBREAK_MIN_LEAD, TIEBREAK_POINTS},
    models::{Game, PlayStatus, Point, ScoreSnapshot, Team, Touches},
};

/// Next value along 0 → 15 → 30 → 40, capped at 40.
#[must_use]
pub fn next_point_value(value: u32) -> u32 {
    match value {
        0 => 15,
        15 => 30,
        _ => DEUCE_POINTS,
    }
}

impl Game {
    /// Record a point won by `winner`, returning whether it won the game.
    ///
    /// Appends the point with its before/after score snapshots and updates
    /// the game statistics. Returns `None` without changing the game if the
    /// touch counters would overflow.
    pub(crate) fn record_point(&mut self, winner: Team, touches: Touches) -> Option<bool> {
        self.stats = self.stats.with_point(touches, winner)?;
        let score_before = self.snapshot();

        let game_won = self.apply_point(winner);

        let point_number = self.points.len() as u32 + 1;
        self.points.push(Point {
            point_number,
            timestamp: Utc::now(),
            touches,
            winner,
            score_before,
            score_after: self.snapshot(),
        });

        debug!(
            "Game {}: point {} to {} ({} -> {})",
            self.game_number,
            point_number,
            winner,
            score_before.score(),
            self.score
        );

        Some(game_won)
    }

    /// Remove the last point and restore the score it was played from.
    ///
    /// Returns `None` when the game holds no points. Completion state is the
    /// caller's concern.
    pub(crate) fn pop_point(&mut self) -> Option<Point> {
        let point = self.points.pop()?;
        self.stats.unrecord(point.touches, point.winner);
        self.restore(point.score_before);
        Some(point)
    }

    pub(crate) fn complete(&mut self, winner: Team) {
        self.status = PlayStatus::Completed;
        self.winner = Some(winner);
    }

    pub(crate) fn reopen(&mut self) {
        self.status = PlayStatus::InProgress;
        self.winner = None;
    }

    /// Apply the point to the score, returning whether it won the game.
    fn apply_point(&mut self, scorer: Team) -> bool {
        if self.is_tiebreak {
            return self.apply_tiebreak_point(scorer);
        }

        let opponent = scorer.opponent();

        // Both early exits look at the score before this point.
        if self.is_deuce && self.advantage == Some(scorer) {
            self.complete(scorer);
            return true;
        }
        if self.score[scorer] == DEUCE_POINTS && self.score[opponent] < DEUCE_POINTS {
            self.complete(scorer);
            return true;
        }

        let was_deuce = self.is_deuce;
        self.score[scorer] = next_point_value(self.score[scorer]);

        if !was_deuce {
            if self.score[scorer] == DEUCE_POINTS && self.score[opponent] == DEUCE_POINTS {
                self.is_deuce = true;
                self.advantage = None;
            }
            return false;
        }

        // Deuce and the scorer did not hold advantage.
        self.advantage = match self.advantage {
            None => Some(scorer),
            Some(_) => None,
        };
        false
    }

    fn apply_tiebreak_point(&mut self, scorer: Team) -> bool {
        self.score[scorer] += 1;

        if self.score.max() >= TIEBREAK_POINTS && self.score.lead() >= TIEBREAK_MIN_LEAD {
            self.complete(scorer);
            return true;
        }
        false
    }

    fn restore(&mut self, snapshot: ScoreSnapshot) {
        self.score = snapshot.score();
        self.is_deuce =
            !self.is_tiebreak && self.score.us == DEUCE_POINTS && self.score.them == DEUCE_POINTS;
        self.advantage = if self.is_deuce {
            snapshot.advantage
        } else {
            None
        };
    }
}
