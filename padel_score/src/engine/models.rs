//! Match record data models.
//!
//! The record is a plain owned tree (match → sets → games → points). "Current"
//! set and game are tracked with 1-based numbers instead of references so the
//! whole record serializes as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{Index, IndexMut},
};
use uuid::Uuid;

/// Match ID type
pub type MatchId = Uuid;

/// One of the two sides of the court.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Us,
    Them,
}

impl Team {
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::Us => Self::Them,
            Self::Them => Self::Us,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Us => write!(f, "us"),
            Self::Them => write!(f, "them"),
        }
    }
}

/// Match lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    Paused,
    Completed,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::InProgress => write!(f, "in_progress"),
            MatchStatus::Paused => write!(f, "paused"),
            MatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Status of a set or a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayStatus {
    InProgress,
    Completed,
}

/// A `{us, them}` counter pair.
///
/// Used for point scores inside a game, game tallies inside a set and set
/// tallies inside a match.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TeamScore {
    pub us: u32,
    pub them: u32,
}

impl TeamScore {
    #[must_use]
    pub fn new(us: u32, them: u32) -> Self {
        Self { us, them }
    }

    /// Team strictly ahead, if any.
    #[must_use]
    pub fn leader(&self) -> Option<Team> {
        match self.us.cmp(&self.them) {
            std::cmp::Ordering::Greater => Some(Team::Us),
            std::cmp::Ordering::Less => Some(Team::Them),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.us.max(self.them)
    }

    /// Absolute difference between the two sides.
    #[must_use]
    pub fn lead(&self) -> u32 {
        self.us.abs_diff(self.them)
    }
}

impl Index<Team> for TeamScore {
    type Output = u32;

    fn index(&self, team: Team) -> &Self::Output {
        match team {
            Team::Us => &self.us,
            Team::Them => &self.them,
        }
    }
}

impl IndexMut<Team> for TeamScore {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        match team {
            Team::Us => &mut self.us,
            Team::Them => &mut self.them,
        }
    }
}

impl fmt::Display for TeamScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.us, self.them)
    }
}

/// Game score captured around a single point.
///
/// The advantage holder is part of the snapshot: a 40-40 pair alone cannot
/// tell "deuce" from "advantage us" apart.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ScoreSnapshot {
    pub us: u32,
    pub them: u32,
    #[serde(default)]
    pub advantage: Option<Team>,
}

impl ScoreSnapshot {
    #[must_use]
    pub fn score(&self) -> TeamScore {
        TeamScore::new(self.us, self.them)
    }
}

/// Ball touches counted during one point, per player of our team.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Touches {
    pub left: u32,
    pub right: u32,
}

impl Touches {
    #[must_use]
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    /// Touches by both players, `None` if the sum does not fit in `u32`.
    #[must_use]
    pub fn checked_total(&self) -> Option<u32> {
        self.left.checked_add(self.right)
    }
}

/// A scored point. Immutable once appended; only undo removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub point_number: u32,
    pub timestamp: DateTime<Utc>,
    pub touches: Touches,
    pub winner: Team,
    /// Game score immediately before this point was applied
    pub score_before: ScoreSnapshot,
    /// Game score immediately after this point was applied
    pub score_after: ScoreSnapshot,
}

/// Per-game statistics
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameStats {
    pub touches_left: u32,
    pub touches_right: u32,
    pub total_touches: u32,
    pub points_won: u32,
    pub points_lost: u32,
}

impl GameStats {
    /// Stats with one more point recorded, `None` if any counter would
    /// overflow.
    #[must_use]
    pub fn with_point(&self, touches: Touches, winner: Team) -> Option<Self> {
        let mut next = *self;
        next.touches_left = self.touches_left.checked_add(touches.left)?;
        next.touches_right = self.touches_right.checked_add(touches.right)?;
        next.total_touches = self.total_touches.checked_add(touches.checked_total()?)?;
        match winner {
            Team::Us => next.points_won = self.points_won.checked_add(1)?,
            Team::Them => next.points_lost = self.points_lost.checked_add(1)?,
        }
        Some(next)
    }

    /// Reverse of [`GameStats::with_point`] for a point recorded earlier.
    pub(crate) fn unrecord(&mut self, touches: Touches, winner: Team) {
        self.touches_left -= touches.left;
        self.touches_right -= touches.right;
        self.total_touches -= touches.left + touches.right;
        match winner {
            Team::Us => self.points_won -= 1,
            Team::Them => self.points_lost -= 1,
        }
    }
}

/// A single game, either regular (0/15/30/40) or a tie-break (plain count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_number: u32,
    pub status: PlayStatus,
    pub is_tiebreak: bool,
    pub points: Vec<Point>,
    pub score: TeamScore,
    pub is_deuce: bool,
    pub advantage: Option<Team>,
    pub winner: Option<Team>,
    pub stats: GameStats,
}

impl Game {
    /// Create a fresh game at 0-0
    #[must_use]
    pub fn new(game_number: u32, is_tiebreak: bool) -> Self {
        Self {
            game_number,
            status: PlayStatus::InProgress,
            is_tiebreak,
            points: Vec::new(),
            score: TeamScore::default(),
            is_deuce: false,
            advantage: None,
            winner: None,
            stats: GameStats::default(),
        }
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == PlayStatus::InProgress
    }

    #[must_use]
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            us: self.score.us,
            them: self.score.them,
            advantage: self.advantage,
        }
    }
}

/// Per-set statistics, folded in from each game as it completes.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SetStats {
    pub touches_left: u32,
    pub touches_right: u32,
    pub total_touches: u32,
    pub points_won: u32,
    pub points_lost: u32,
    pub total_points: u32,
    /// Only computed once the set is completed
    pub avg_touches_per_point: f64,
    /// Percentage of points won by us; only computed once the set is completed
    pub win_rate: f64,
}

impl SetStats {
    /// Whether folding `game` in keeps every counter within `u32`.
    #[must_use]
    pub fn can_absorb(&self, game: &GameStats) -> bool {
        let points = game.points_won.checked_add(game.points_lost);
        self.touches_left.checked_add(game.touches_left).is_some()
            && self.touches_right.checked_add(game.touches_right).is_some()
            && self.total_touches.checked_add(game.total_touches).is_some()
            && self.points_won.checked_add(game.points_won).is_some()
            && self.points_lost.checked_add(game.points_lost).is_some()
            && points.and_then(|p| self.total_points.checked_add(p)).is_some()
    }

    /// Fold a completed game in; callers check [`SetStats::can_absorb`] first.
    pub(crate) fn absorb(&mut self, game: &GameStats) {
        self.touches_left += game.touches_left;
        self.touches_right += game.touches_right;
        self.total_touches += game.total_touches;
        self.points_won += game.points_won;
        self.points_lost += game.points_lost;
        self.total_points += game.points_won + game.points_lost;
    }

    pub(crate) fn release(&mut self, game: &GameStats) {
        self.touches_left -= game.touches_left;
        self.touches_right -= game.touches_right;
        self.total_touches -= game.total_touches;
        self.points_won -= game.points_won;
        self.points_lost -= game.points_lost;
        self.total_points -= game.points_won + game.points_lost;
    }

    pub(crate) fn refresh_averages(&mut self) {
        if self.total_points > 0 {
            let total = f64::from(self.total_points);
            self.avg_touches_per_point = f64::from(self.total_touches) / total;
            self.win_rate = f64::from(self.points_won) / total * 100.0;
        }
    }

    pub(crate) fn clear_averages(&mut self) {
        self.avg_touches_per_point = 0.0;
        self.win_rate = 0.0;
    }
}

/// A set of games
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub set_number: u32,
    pub status: PlayStatus,
    /// 1-based number of the active game; always equals `games.len()`
    pub current_game: u32,
    pub games: Vec<Game>,
    /// Games won per team
    pub score: TeamScore,
    pub winner: Option<Team>,
    pub stats: SetStats,
}

impl Set {
    /// Create a set holding its first (regular) game
    #[must_use]
    pub fn new(set_number: u32) -> Self {
        Self {
            set_number,
            status: PlayStatus::InProgress,
            current_game: 1,
            games: vec![Game::new(1, false)],
            score: TeamScore::default(),
            winner: None,
            stats: SetStats::default(),
        }
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == PlayStatus::InProgress
    }
}

/// Our team: the tracked players, by court side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamUs {
    pub player_left: String,
    pub player_right: String,
}

/// The opposing team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamThem {
    pub player1: String,
    pub player2: String,
}

/// Scoring rules stored on the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Sets needed to win the match (2 or 3)
    pub sets_to_win: u32,
    /// Whether 6-6 in the deciding set is settled by a tie-break
    pub tiebreak_in_final_set: bool,
}

impl MatchRules {
    /// Number of the last set that can possibly be played.
    #[must_use]
    pub fn final_set_number(&self) -> u32 {
        2 * self.sets_to_win - 1
    }

    /// Whether 6-6 in the given set starts a tie-break.
    #[must_use]
    pub fn tiebreak_at_six_all(&self, set_number: u32) -> bool {
        set_number != self.final_set_number() || self.tiebreak_in_final_set
    }
}

/// Everything needed to start a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub team_us: TeamUs,
    pub team_them: TeamThem,
    pub sets_to_win: u32,
    pub tiebreak_in_final_set: bool,
}

/// Match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: MatchStatus,
    /// Elapsed playing time in seconds, maintained by the caller's clock
    pub duration: u64,
    pub paused_at: Option<DateTime<Utc>>,
    pub team_us: TeamUs,
    pub team_them: TeamThem,
    #[serde(rename = "config")]
    pub rules: MatchRules,
    /// 1-based number of the active set; always equals `sets.len()`
    pub current_set: u32,
    pub sets: Vec<Set>,
    /// Sets won per team
    pub final_score: TeamScore,
    pub winner: Option<Team>,
    pub version: String,
}

/// Outcome of scoring a single point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub point_scored: bool,
    pub game_won: bool,
    pub set_won: bool,
    pub match_won: bool,
}

/// Game tally of one set, for scoreboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScoreLine {
    pub set_number: u32,
    pub us: u32,
    pub them: u32,
    pub completed: bool,
}
