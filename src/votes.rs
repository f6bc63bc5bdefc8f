//! # Vote Aggregation
//!
//! Popularity statistics over the whole registry. Every user counts here,
//! private ones included, which is deliberately looser than the matching
//! rules in [`crate::similarity`].
//!
//! A [`VoteTally`] is rebuilt from the registry on every call. Artists keep
//! the order they were first seen in, and ranking is a stable sort on the
//! count, so artists with equal votes come out in discovery order.

use crate::user::{UserId, UserStore};
use serde::Serialize;
use std::collections::HashMap;

/// How many artists the popularity view shows.
pub const DEFAULT_TOP_N: usize = 3;

/// An artist and the number of users who like it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistVotes {
    pub artist: String,
    pub votes: usize,
}

/// Vote counts per artist, in first-discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTally {
    entries: Vec<ArtistVotes>,
}

impl VoteTally {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Votes for `artist`, if anyone likes it.
    #[must_use]
    pub fn get(&self, artist: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.artist == artist)
            .map(|entry| entry.votes)
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ArtistVotes> {
        self.entries.iter()
    }

    /// Entries by descending vote count, ties in discovery order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&ArtistVotes> {
        let mut ranked: Vec<&ArtistVotes> = self.entries.iter().collect();
        // `sort_by` is stable
        ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
        ranked
    }
}

/// Counts one vote per occurrence of each artist across all users.
#[must_use]
pub fn tally(population: &UserStore) -> VoteTally {
    let mut entries: Vec<ArtistVotes> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in population {
        for artist in &record.preferences {
            match index.get(artist.as_str()) {
                Some(&slot) => entries[slot].votes += 1,
                None => {
                    index.insert(artist.as_str(), entries.len());
                    entries.push(ArtistVotes {
                        artist: artist.clone(),
                        votes: 1,
                    });
                }
            }
        }
    }

    log::debug!("Tallied {} distinct artist(s) over {} user(s)", entries.len(), population.len());
    VoteTally { entries }
}

/// The `n` most liked artists. Shorter than `n` when fewer artists exist,
/// empty when nobody likes anything.
#[must_use]
pub fn top_n(tally: &VoteTally, n: usize) -> Vec<String> {
    tally
        .ranked()
        .into_iter()
        .take(n)
        .map(|entry| entry.artist.clone())
        .collect()
}

/// Highest vote count, or `None` for an empty tally.
#[must_use]
pub fn max_count(tally: &VoteTally) -> Option<usize> {
    tally.iter().map(|entry| entry.votes).max()
}

/// The user who likes the most artists.
///
/// Candidates are the public users plus `target`, whatever its visibility.
/// Ties go to the *last* candidate seen, unlike the similarity selector.
/// Returns `None` when there are no candidates at all.
#[must_use]
pub fn most_preferences_user<'a>(target: &str, population: &'a UserStore) -> Option<&'a UserId> {
    let mut most: Option<(&'a UserId, usize)> = None;

    for record in population {
        if !(record.id.is_public() || record.id == *target) {
            continue;
        }
        let count = record.preferences.len();
        if most.map_or(true, |(_, best)| count >= best) {
            most = Some((&record.id, count));
        }
    }

    most.map(|(user, _)| user)
}
