//! # Padel Score
//!
//! A deterministic scoring engine for doubles padel matches, with exact
//! point-by-point undo.
//!
//! The match record is a plain owned tree: a match holds sets, a set holds
//! games, a game holds points. Every scored point flows top-down through four
//! resolvers:
//!
//! - **Point**: 0/15/30/40 with deuce and advantage, or plain tie-break counts
//! - **Game**: set tally, tie-break at 6-6, set won at 6 with a two-game lead
//! - **Set**: match tally, match won at the configured number of sets
//! - **Undo**: pops the last point, reopening whatever it completed
//!
//! Each point keeps a snapshot of the game score it was played from, so undo
//! restores the previous record exactly instead of recomputing it.
//!
//! ## Core Modules
//!
//! - [`engine`]: Match record models, scoring and undo
//! - [`settings`]: Defaults for new matches
//! - [`storage`]: Key-value persistence for the match in play and history
//!
//! ## Example
//!
//! ```
//! use padel_score::{Match, MatchConfig, Team, TeamThem, TeamUs};
//!
//! let mut m = Match::new(MatchConfig {
//!     team_us: TeamUs { player_left: "Ana".into(), player_right: "Bea".into() },
//!     team_them: TeamThem { player1: "Carla".into(), player2: "Dora".into() },
//!     sets_to_win: 2,
//!     tiebreak_in_final_set: true,
//! })?;
//!
//! for _ in 0..4 {
//!     m.score_point(Team::Us, 1, 1)?;
//! }
//! assert_eq!(m.sets[0].score.us, 1);
//! # Ok::<(), padel_score::ScoreError>(())
//! ```

/// Scoring state machine, match record models and undo.
pub mod engine;
pub use engine::{
    Match, MatchConfig, ScoreError, ScoreResult, ScoreUpdate, Team, TeamThem, TeamUs,
    display_score,
};

/// Defaults applied to new matches.
pub mod settings;

/// Persistence around the engine.
pub mod storage;
