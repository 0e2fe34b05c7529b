//! Scoring thresholds for the padel ruleset.

/// Games needed to take a set (with a two-game lead).
pub const GAMES_TO_WIN_SET: u32 = 6;
pub const MIN_GAMES_LEAD: u32 = 2;

/// Points needed to take a tie-break (with a two-point lead).
pub const TIEBREAK_POINTS: u32 = 7;
pub const TIEBREAK_MIN_LEAD: u32 = 2;

/// Highest countable point value in a regular game; 40-40 is deuce.
pub const DEUCE_POINTS: u32 = 40;

/// Allowed values for `sets_to_win`.
pub const MIN_SETS_TO_WIN: u32 = 2;
pub const MAX_SETS_TO_WIN: u32 = 3;

/// Record format version stamped on new matches.
pub const MATCH_FORMAT_VERSION: &str = "1.0.0";
