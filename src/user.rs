//! # User Registry
//!
//! [`UserStore`] is the in-memory registry of who likes what. It is an
//! ordered association list rather than a hash map: the position of each user
//! is the tie-break order used by the similarity selector and the vote
//! ranking, so it has to be reproducible from run to run.
//!
//! Users keep the position they were first inserted at. Overwriting a user's
//! preferences never moves them; new users are appended.

use crate::artist_set::PreferenceSet;
use serde::Serialize;
use std::fmt;

/// Trailing character that marks a user id as private.
pub const PRIVATE_SUFFIX: char = '$';

/// Whether a user takes part in matching.
///
/// Private users are still counted by the vote tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

/// A user identifier together with its visibility, decided once at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserId {
    name: String,
    visibility: Visibility,
}

impl UserId {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let visibility = if name.ends_with(PRIVATE_SUFFIX) {
            Visibility::Private
        } else {
            Visibility::Public
        };
        Self { name, visibility }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl PartialEq<str> for UserId {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

/// One row of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: UserId,
    pub preferences: PreferenceSet,
}

/// Ordered registry of users and their preference sets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UserStore {
    records: Vec<UserRecord>,
}

impl UserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored preferences for `name`, if the user is known.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PreferenceSet> {
        self.find(name).map(|record| &record.preferences)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Overwrites `name`'s preferences, or appends a new user.
    ///
    /// This is the only mutation the registry supports.
    pub fn upsert(&mut self, name: &str, preferences: PreferenceSet) {
        match self.records.iter_mut().find(|record| record.id == *name) {
            Some(record) => {
                log::debug!("Overwriting preferences for `{name}'");
                record.preferences = preferences;
            }
            None => {
                log::debug!("Registering new user `{name}'");
                self.records.push(UserRecord {
                    id: UserId::new(name),
                    preferences,
                });
            }
        }
    }

    /// Records in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.records.iter()
    }

    fn find(&self, name: &str) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id == *name)
    }
}

impl<'a> IntoIterator for &'a UserStore {
    type Item = &'a UserRecord;
    type IntoIter = std::slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<N: Into<String>> FromIterator<(N, PreferenceSet)> for UserStore {
    fn from_iter<T: IntoIterator<Item = (N, PreferenceSet)>>(iter: T) -> Self {
        let mut store = Self::new();
        for (name, preferences) in iter {
            let name = name.into();
            store.upsert(&name, preferences);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(artists: &[&str]) -> PreferenceSet {
        PreferenceSet::from_unsorted(artists.iter().map(|a| (*a).to_string()).collect())
    }

    #[test]
    fn test_visibility_from_suffix() {
        assert_eq!(UserId::new("alice").visibility(), Visibility::Public);
        assert_eq!(UserId::new("carol$").visibility(), Visibility::Private);
        // Only a trailing marker counts
        assert_eq!(UserId::new("$dave").visibility(), Visibility::Public);
        assert_eq!(UserId::new("").visibility(), Visibility::Public);
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut store = UserStore::new();
        store.upsert("alice", prefs(&["Adele"]));
        store.upsert("bob", prefs(&["Drake"]));
        store.upsert("alice", prefs(&["Coldplay"]));

        let names: Vec<&str> = store.iter().map(|r| r.id.name()).collect();
        assert_eq!(names, vec!["alice", "bob"], "Overwrite must not reorder users");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("alice"), Some(&prefs(&["Coldplay"])));
    }

    #[test]
    fn test_get_unknown_user() {
        let store: UserStore = vec![("alice", prefs(&["Adele"]))].into_iter().collect();
        assert!(store.get("bob").is_none());
        assert!(!store.contains("bob"));
        assert!(store.contains("alice"));
    }

    #[test]
    fn test_from_iter_last_duplicate_wins() {
        let store: UserStore = vec![
            ("alice", prefs(&["Adele"])),
            ("bob", prefs(&["Drake"])),
            ("alice", prefs(&["Muse"])),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("alice"), Some(&prefs(&["Muse"])));
        assert_eq!(store.iter().next().map(|r| r.id.name()), Some("alice"));
    }
}
