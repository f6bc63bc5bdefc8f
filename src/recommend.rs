//! # Recommendation Engine
//!
//! Ties the selector and the set algebra together: find the closest peer,
//! then suggest whatever that peer likes that the target hasn't listed yet.
//!
//! Everything here is a pure read over the [`UserStore`].

use crate::artist_set::difference;
use crate::similarity::{find_best_match_with, SelectorConfig};
use crate::user::UserStore;
use serde::Serialize;

/// A recommendation together with the peer it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Name of the best-matching peer, if one was found.
    pub peer: Option<String>,
    /// Number of artists shared with the peer.
    pub score: Option<usize>,
    /// Artists the peer likes that the target does not.
    pub artists: Vec<String>,
}

impl Recommendation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}

/// Artists recommended to `target` based on its live preferences.
///
/// Empty when the registry holds fewer than two users or no peer is
/// eligible.
///
/// ```
/// use musicrec::artist_set::PreferenceSet;
/// use musicrec::recommend::recommend;
/// use musicrec::user::UserStore;
///
/// let store: UserStore = vec![
///     ("alice", PreferenceSet::from_entries(["Adele", "Coldplay"])),
///     ("bob", PreferenceSet::from_entries(["Coldplay", "Drake"])),
/// ]
/// .into_iter()
/// .collect();
///
/// let live = PreferenceSet::from_entries(["Adele", "Coldplay"]);
/// assert_eq!(recommend("alice", &live, &store), vec!["Drake".to_string()]);
/// ```
#[must_use]
pub fn recommend(target: &str, target_prefs: &[String], population: &UserStore) -> Vec<String> {
    explain(target, target_prefs, population, &SelectorConfig::default()).artists
}

/// Same as [`recommend`] but also reports which peer was chosen.
#[must_use]
pub fn explain(
    target: &str,
    target_prefs: &[String],
    population: &UserStore,
    config: &SelectorConfig,
) -> Recommendation {
    if population.len() <= 1 {
        log::debug!("Only {} user(s) known, nothing to compare against", population.len());
        return Recommendation::default();
    }

    let Some(best) = find_best_match_with(target, target_prefs, population, config) else {
        return Recommendation::default();
    };

    Recommendation {
        peer: Some(best.user.name().to_string()),
        score: Some(best.score),
        artists: difference(target_prefs, best.prefs.as_slice()),
    }
}
