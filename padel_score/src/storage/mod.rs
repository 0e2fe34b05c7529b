//! Storage module: persistence plumbing around the scoring engine.
//!
//! This module implements:
//! - A small key-value store trait with in-memory and JSON-file backends
//! - A match repository for the current match, match history and settings
//!
//! ## Example
//!
//! ```
//! use padel_score::engine::{Match, Team, TeamThem, TeamUs};
//! use padel_score::settings::AppSettings;
//! use padel_score::storage::{MatchRepository, MemoryStore};
//!
//! let mut repo = MatchRepository::new(MemoryStore::new());
//! let settings = repo.settings_or_default()?;
//!
//! let mut m = Match::new(settings.match_config(
//!     TeamUs { player_left: "Ana".into(), player_right: "Bea".into() },
//!     TeamThem { player1: "Carla".into(), player2: "Dora".into() },
//! ))?;
//! m.score_point(Team::Them, 0, 2)?;
//! repo.save_current_match(&m)?;
//!
//! assert_eq!(repo.current_match()?, Some(m));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod errors;
pub mod repository;
pub mod store;

pub use errors::{StorageError, StorageResult};
pub use repository::{MatchRepository, keys};
pub use store::{FileStore, KeyValueStore, MemoryStore};
