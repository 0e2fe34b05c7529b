//! Touch tally for the point being played.

use serde::{Deserialize, Serialize};

use super::{
    errors::ScoreResult,
    models::{Match, ScoreUpdate, Team, Touches},
};

/// Which of our two players touched the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Counts touches until the point is scored, then hands them over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchCounter {
    current: Touches,
}

impl TouchCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, side: Side) {
        match side {
            Side::Left => self.current.left = self.current.left.saturating_add(1),
            Side::Right => self.current.right = self.current.right.saturating_add(1),
        }
    }

    #[must_use]
    pub fn current(&self) -> Touches {
        self.current
    }

    /// Return the counted touches and reset to zero.
    pub fn take(&mut self) -> Touches {
        std::mem::take(&mut self.current)
    }
}

impl Match {
    /// Score a point with the touches counted so far.
    ///
    /// The counter is reset only when the point is accepted.
    ///
    /// # Errors
    ///
    /// Same as [`Match::score_point`].
    pub fn score_counted_point(
        &mut self,
        winner: Team,
        counter: &mut TouchCounter,
    ) -> ScoreResult<ScoreUpdate> {
        let touches = counter.current();
        let update = self.score_point(winner, touches.left, touches.right)?;
        counter.take();
        Ok(update)
    }
}
