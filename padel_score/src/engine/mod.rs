//! Match score engine.
//!
//! This module provides the padel scoring state machine:
//! - Point resolution with deuce/advantage and tie-break counting
//! - Game and set resolution, including tie-breaks at 6-6
//! - Exact undo of the last point across game and set boundaries
//! - Score display helpers
//!
//! ## Example
//!
//! ```
//! use padel_score::engine::{Match, MatchConfig, Team, TeamThem, TeamUs};
//!
//! let mut m = Match::new(MatchConfig {
//!     team_us: TeamUs { player_left: "Ana".into(), player_right: "Bea".into() },
//!     team_them: TeamThem { player1: "Carla".into(), player2: "Dora".into() },
//!     sets_to_win: 2,
//!     tiebreak_in_final_set: true,
//! })?;
//!
//! m.score_point(Team::Us, 3, 1)?;
//! assert_eq!(m.summary(), "Set 1 • 0-0 • 15-0");
//!
//! assert!(m.undo_last_point());
//! assert_eq!(m.summary(), "Set 1 • 0-0 • 0-0");
//! # Ok::<(), padel_score::engine::ScoreError>(())
//! ```

pub mod constants;
pub mod display;
pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod point;
pub mod resolver;
pub mod touches;
pub mod undo;

pub use display::{display_score, format_point_score};
pub use errors::{ScoreError, ScoreResult};
pub use models::{
    Game, GameStats, Match, MatchConfig, MatchId, MatchRules, MatchStatus, PlayStatus, Point,
    ScoreSnapshot, ScoreUpdate, Set, SetScoreLine, SetStats, Team, TeamScore, TeamThem, TeamUs,
    Touches,
};
pub use touches::{Side, TouchCounter};
