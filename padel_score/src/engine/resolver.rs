//! Game, set and match resolution for a scored point.
//!
//! Control flows top-down: a point may win a game, a game may win a set and a
//! set may win the match. Each level appends its successor lazily, exactly
//! when the previous one completes.

use chrono::Utc;
use log::{debug, info};

use super::{
    constants::{GAMES_TO_WIN_SET, MIN_GAMES_LEAD},
    errors::{ScoreError, ScoreResult},
    models::{Game, Match, MatchStatus, PlayStatus, ScoreUpdate, Set, Team, Touches},
};

impl Set {
    /// Fold a just-completed game into the set, returning whether it won the
    /// set.
    ///
    /// When the set continues, the next game is appended: a tie-break at 6-6
    /// if `tiebreak_at_six_all`, a regular game otherwise.
    pub(crate) fn resolve_game(&mut self, winner: Team, tiebreak_at_six_all: bool) -> bool {
        let mut won_tiebreak = false;
        if let Some(game) = self.games.last() {
            self.stats.absorb(&game.stats);
            won_tiebreak = game.is_tiebreak;
        }
        self.score[winner] += 1;

        // A tie-break decides the set at 7-6.
        if won_tiebreak
            || (self.score[winner] >= GAMES_TO_WIN_SET && self.score.lead() >= MIN_GAMES_LEAD)
        {
            self.complete(winner);
            info!(
                "Set {} won by {} ({})",
                self.set_number, winner, self.score
            );
            return true;
        }

        let six_all = self.score.us == GAMES_TO_WIN_SET && self.score.them == GAMES_TO_WIN_SET;
        let is_tiebreak = six_all && tiebreak_at_six_all;
        if is_tiebreak {
            debug!("Set {}: 6-6, starting tie-break", self.set_number);
        }

        let next = Game::new(self.games.len() as u32 + 1, is_tiebreak);
        self.current_game = next.game_number;
        self.games.push(next);
        false
    }

    pub(crate) fn complete(&mut self, winner: Team) {
        self.status = PlayStatus::Completed;
        self.winner = Some(winner);
        self.stats.refresh_averages();
    }
}

impl Match {
    /// Score a point for `winner` with the touches counted during it.
    ///
    /// # Errors
    ///
    /// Fails without touching the record when the match is completed or
    /// paused, when no active set or game can be found, or when the touch
    /// counts would overflow the game or set statistics.
    pub fn score_point(
        &mut self,
        winner: Team,
        touches_left: u32,
        touches_right: u32,
    ) -> ScoreResult<ScoreUpdate> {
        match self.status {
            MatchStatus::Completed => return Err(ScoreError::MatchCompleted(self.id)),
            MatchStatus::Paused => return Err(ScoreError::MatchPaused(self.id)),
            MatchStatus::InProgress => {}
        }

        let rules = self.rules;
        let match_id = self.id;
        let set = self
            .sets
            .last_mut()
            .filter(|set| set.is_in_progress())
            .ok_or(ScoreError::NoActiveSet(match_id))?;
        let set_number = set.set_number;
        let tiebreak_at_six_all = rules.tiebreak_at_six_all(set_number);
        let Some(game) = set.games.last_mut().filter(|game| game.is_in_progress()) else {
            return Err(ScoreError::NoActiveGame(set_number));
        };

        let touches = Touches::new(touches_left, touches_right);
        let overflow = ScoreError::TouchOverflow {
            left: touches_left,
            right: touches_right,
        };
        // Set totals must also absorb this game once it completes.
        let fits_set = game
            .stats
            .with_point(touches, winner)
            .is_some_and(|next| set.stats.can_absorb(&next));
        if !fits_set {
            return Err(overflow);
        }
        let Some(game_won) = game.record_point(winner, touches) else {
            return Err(overflow);
        };
        let mut update = ScoreUpdate {
            point_scored: true,
            game_won,
            ..ScoreUpdate::default()
        };
        if !update.game_won {
            return Ok(update);
        }

        debug!("Set {}: game won by {}", set_number, winner);
        update.set_won = set.resolve_game(winner, tiebreak_at_six_all);
        if update.set_won {
            update.match_won = self.resolve_set(winner);
        }

        Ok(update)
    }

    /// Fold a just-completed set into the match, returning whether it won
    /// the match. Otherwise the next set is appended and becomes current.
    fn resolve_set(&mut self, winner: Team) -> bool {
        self.final_score[winner] += 1;

        if self.final_score[winner] >= self.rules.sets_to_win {
            self.status = MatchStatus::Completed;
            self.winner = Some(winner);
            self.completed_at = Some(Utc::now());
            info!(
                "Match {} won by {} ({})",
                self.id, winner, self.final_score
            );
            return true;
        }

        let next = Set::new(self.sets.len() as u32 + 1);
        self.current_set = next.set_number;
        self.sets.push(next);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::TeamScore;

    fn win_game(set: &mut Set, winner: Team, tiebreak_at_six_all: bool) -> bool {
        let game = set.games.last_mut().unwrap();
        let mut won = false;
        while !won {
            won = game.record_point(winner, Touches::default()).unwrap();
        }
        set.resolve_game(winner, tiebreak_at_six_all)
    }

    #[test]
    fn test_set_won_at_six_four() {
        let mut set = Set::new(1);
        for winner in [Team::Us, Team::Them].repeat(4) {
            assert!(!win_game(&mut set, winner, true));
        }
        assert_eq!(set.score, TeamScore::new(4, 4));

        assert!(!win_game(&mut set, Team::Us, true));
        assert!(win_game(&mut set, Team::Us, true));
        assert_eq!(set.winner, Some(Team::Us));
        assert_eq!(set.games.len(), 10);
        assert_eq!(set.current_game, 10);
    }

    #[test]
    fn test_six_five_continues() {
        let mut set = Set::new(1);
        for winner in [Team::Us, Team::Them].repeat(5) {
            win_game(&mut set, winner, true);
        }
        assert!(!win_game(&mut set, Team::Us, true));
        assert_eq!(set.score, TeamScore::new(6, 5));
        assert!(set.is_in_progress());
        assert!(!set.games.last().unwrap().is_tiebreak);
    }

    #[test]
    fn test_six_all_starts_tiebreak() {
        let mut set = Set::new(1);
        for winner in [Team::Us, Team::Them].repeat(6) {
            win_game(&mut set, winner, true);
        }
        assert_eq!(set.score, TeamScore::new(6, 6));
        let game = set.games.last().unwrap();
        assert!(game.is_tiebreak);
        assert_eq!(game.game_number, 13);

        assert!(win_game(&mut set, Team::Them, true));
        assert_eq!(set.score, TeamScore::new(6, 7));
        assert_eq!(set.winner, Some(Team::Them));
        assert_eq!(set.games.len(), 13);
    }

    #[test]
    fn test_advantage_set_without_tiebreak() {
        let mut set = Set::new(3);
        for winner in [Team::Us, Team::Them].repeat(6) {
            win_game(&mut set, winner, false);
        }
        assert!(!set.games.last().unwrap().is_tiebreak);

        assert!(!win_game(&mut set, Team::Them, false));
        assert!(!win_game(&mut set, Team::Us, false));
        assert!(!win_game(&mut set, Team::Us, false));
        assert!(win_game(&mut set, Team::Us, false));
        assert_eq!(set.score, TeamScore::new(9, 7));
    }

    #[test]
    fn test_set_stats_absorb_games() {
        let mut set = Set::new(1);
        let game = set.games.last_mut().unwrap();
        for _ in 0..4 {
            game.record_point(Team::Us, Touches::new(1, 2)).unwrap();
        }
        set.resolve_game(Team::Us, true);

        assert_eq!(set.stats.total_points, 4);
        assert_eq!(set.stats.total_touches, 12);
        assert_eq!(set.stats.points_won, 4);
        assert!((set.stats.avg_touches_per_point).abs() < f64::EPSILON);
    }
}
