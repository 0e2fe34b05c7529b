//! Match repository over a key-value store.
//!
//! The scoring engine never touches storage; callers persist the match record
//! after each mutation if they want durability.

use log::{info, warn};
use serde::{Serialize, de::DeserializeOwned};

use super::{
    errors::{StorageError, StorageResult},
    store::KeyValueStore,
};
use crate::{
    engine::{Match, MatchId, MatchStatus, Team, constants::MATCH_FORMAT_VERSION},
    settings::AppSettings,
};

/// Logical keys used by the repository.
pub mod keys {
    pub const SETTINGS: &str = "padeltracker_settings";
    pub const MATCHES: &str = "padeltracker_matches";
    pub const CURRENT_MATCH: &str = "padeltracker_current";
    pub const VERSION: &str = "padeltracker_version";
}

/// Persists the match in play, the match history and app settings.
#[derive(Debug)]
pub struct MatchRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> MatchRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    // ---- Current match ----

    pub fn current_match(&self) -> StorageResult<Option<Match>> {
        self.read(keys::CURRENT_MATCH)
    }

    pub fn save_current_match(&mut self, m: &Match) -> StorageResult<()> {
        self.write(keys::CURRENT_MATCH, m)
    }

    pub fn clear_current_match(&mut self) -> StorageResult<()> {
        self.store.remove(keys::CURRENT_MATCH)
    }

    /// Move the current match into history and clear it.
    ///
    /// Returns the archived match, or `None` if no match was in play.
    pub fn archive_current_match(&mut self) -> StorageResult<Option<Match>> {
        let Some(m) = self.current_match()? else {
            return Ok(None);
        };
        if m.status != MatchStatus::Completed {
            warn!("Archiving match {} while {}", m.id, m.status);
        }

        let mut history = self.matches()?;
        match history.iter_mut().find(|stored| stored.id == m.id) {
            Some(stored) => *stored = m.clone(),
            None => history.push(m.clone()),
        }
        self.write(keys::MATCHES, &history)?;
        self.clear_current_match()?;

        info!("Archived match {}", m.id);
        Ok(Some(m))
    }

    // ---- History ----

    pub fn matches(&self) -> StorageResult<Vec<Match>> {
        Ok(self.read(keys::MATCHES)?.unwrap_or_default())
    }

    pub fn add_match(&mut self, m: &Match) -> StorageResult<()> {
        let mut history = self.matches()?;
        history.push(m.clone());
        self.write(keys::MATCHES, &history)
    }

    /// Replace a stored match with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::MatchNotFound`] if no match has that id.
    pub fn update_match(&mut self, m: &Match) -> StorageResult<()> {
        let mut history = self.matches()?;
        let stored = history
            .iter_mut()
            .find(|stored| stored.id == m.id)
            .ok_or(StorageError::MatchNotFound(m.id))?;
        *stored = m.clone();
        self.write(keys::MATCHES, &history)
    }

    /// Remove a match from history. Returns whether it was present.
    pub fn remove_match(&mut self, id: MatchId) -> StorageResult<bool> {
        let mut history = self.matches()?;
        let before = history.len();
        history.retain(|m| m.id != id);
        let removed = history.len() != before;
        if removed {
            self.write(keys::MATCHES, &history)?;
        }
        Ok(removed)
    }

    pub fn replace_matches(&mut self, matches: &[Match]) -> StorageResult<()> {
        self.write(keys::MATCHES, matches)
    }

    pub fn clear_matches(&mut self) -> StorageResult<()> {
        self.store.remove(keys::MATCHES)
    }

    pub fn match_by_id(&self, id: MatchId) -> StorageResult<Option<Match>> {
        Ok(self.matches()?.into_iter().find(|m| m.id == id))
    }

    pub fn completed_matches(&self) -> StorageResult<Vec<Match>> {
        Ok(self
            .matches()?
            .into_iter()
            .filter(Match::is_completed)
            .collect())
    }

    pub fn total_wins(&self) -> StorageResult<usize> {
        self.count_completed_won_by(Team::Us)
    }

    pub fn total_losses(&self) -> StorageResult<usize> {
        self.count_completed_won_by(Team::Them)
    }

    fn count_completed_won_by(&self, team: Team) -> StorageResult<usize> {
        Ok(self
            .completed_matches()?
            .iter()
            .filter(|m| m.winner == Some(team))
            .count())
    }

    // ---- Settings ----

    pub fn settings(&self) -> StorageResult<Option<AppSettings>> {
        self.read(keys::SETTINGS)
    }

    pub fn save_settings(&mut self, settings: &AppSettings) -> StorageResult<()> {
        self.write(keys::SETTINGS, settings)
    }

    /// Stored settings, writing and returning the defaults when none exist.
    pub fn settings_or_default(&mut self) -> StorageResult<AppSettings> {
        if let Some(settings) = self.settings()? {
            return Ok(settings);
        }
        let settings = AppSettings::default();
        self.save_settings(&settings)?;
        Ok(settings)
    }

    // ---- Version ----

    /// Check the stored format version against the current one.
    ///
    /// A store without a version is stamped with the current version.
    pub fn check_version(&mut self) -> StorageResult<bool> {
        match self.read::<String>(keys::VERSION)? {
            Some(stored) => Ok(stored == MATCH_FORMAT_VERSION),
            None => {
                self.write(keys::VERSION, MATCH_FORMAT_VERSION)?;
                Ok(true)
            }
        }
    }

    /// Remove everything the repository owns.
    pub fn clear_all(&mut self) -> StorageResult<()> {
        for key in [
            keys::SETTINGS,
            keys::MATCHES,
            keys::CURRENT_MATCH,
            keys::VERSION,
        ] {
            self.store.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store::MemoryStore;

    #[test]
    fn test_version_is_stamped_once() {
        let mut repo = MatchRepository::new(MemoryStore::new());
        assert!(repo.check_version().unwrap());

        let store = repo.into_inner();
        assert_eq!(
            store.get(keys::VERSION).unwrap().as_deref(),
            Some("\"1.0.0\"")
        );
    }

    #[test]
    fn test_version_mismatch() {
        let mut store = MemoryStore::new();
        store.set(keys::VERSION, "\"0.9.0\"").unwrap();
        let mut repo = MatchRepository::new(store);
        assert!(!repo.check_version().unwrap());
    }

    #[test]
    fn test_settings_or_default_persists() {
        let mut repo = MatchRepository::new(MemoryStore::new());
        assert!(repo.settings().unwrap().is_none());

        let settings = repo.settings_or_default().unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(repo.settings().unwrap(), Some(AppSettings::default()));
    }

    #[test]
    fn test_corrupt_value_is_reported() {
        let mut store = MemoryStore::new();
        store.set(keys::CURRENT_MATCH, "not json").unwrap();
        let repo = MatchRepository::new(store);

        assert!(matches!(
            repo.current_match(),
            Err(StorageError::Serialization(_))
        ));
    }
}
