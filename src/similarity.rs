//! # Similarity Selector
//!
//! Picks the single user whose taste is closest to a target user's.
//!
//! ## Selection Rules
//!
//! 1. Only public users are candidates, plus the target itself whatever its
//!    visibility.
//! 2. A candidate whose whole preference set is already covered by the
//!    target's preferences is dropped, since it has nothing to recommend.
//! 3. The target never matches itself.
//! 4. The score is the number of shared artists ([`match_count`]) against the
//!    target's live preferences. The first candidate in registry order with
//!    the strictly highest score wins.
//!
//! ## Eligibility Basis
//!
//! Rule 2 compares candidates against the target's preferences *as stored in
//! the registry*, while rule 4 scores against the live preferences passed in.
//! When a user has edited their preferences but the registry has not caught
//! up, the two can disagree. [`EligibilityBasis`] makes that choice explicit;
//! the default keeps the stored comparison.

use crate::artist_set::{is_subset, match_count, PreferenceSet};
use crate::user::{UserId, UserStore};
use log::{debug, trace};

/// Which copy of the target's preferences the eligibility filter uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EligibilityBasis {
    /// The registry's stored copy of the target's preferences.
    #[default]
    StoredPreferences,
    /// The live preferences passed to the selector.
    LivePreferences,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorConfig {
    pub eligibility: EligibilityBasis,
}

/// The winning peer, its preferences and how many artists it shares with
/// the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMatch<'a> {
    pub user: &'a UserId,
    pub prefs: &'a PreferenceSet,
    pub score: usize,
}

/// Finds the best-matching peer for `target` using the default
/// [`SelectorConfig`].
///
/// Returns `None` when no candidate survives filtering.
///
/// # Examples
///
/// ```
/// use musicrec::artist_set::PreferenceSet;
/// use musicrec::similarity::find_best_match;
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
/// let best = find_best_match("alice", &live, &store).unwrap();
/// assert_eq!(best.user.name(), "bob");
/// assert_eq!(best.score, 1);
/// ```
#[must_use]
pub fn find_best_match<'a>(
    target: &str,
    target_prefs: &[String],
    population: &'a UserStore,
) -> Option<BestMatch<'a>> {
    find_best_match_with(target, target_prefs, population, &SelectorConfig::default())
}

/// [`find_best_match`] with an explicit configuration.
#[must_use]
pub fn find_best_match_with<'a>(
    target: &str,
    target_prefs: &[String],
    population: &'a UserStore,
    config: &SelectorConfig,
) -> Option<BestMatch<'a>> {
    let basis: &[String] = match config.eligibility {
        EligibilityBasis::StoredPreferences => population
            .get(target)
            .map(|prefs| prefs.as_slice())
            .unwrap_or_default(),
        EligibilityBasis::LivePreferences => target_prefs,
    };

    let mut best: Option<BestMatch<'a>> = None;

    for record in population {
        let is_target = record.id == *target;
        if !(record.id.is_public() || is_target) {
            continue;
        }
        if is_subset(record.preferences.as_slice(), basis) {
            trace!("`{}' brings nothing new, skipping", record.id);
            continue;
        }
        if is_target {
            continue;
        }

        let score = match_count(target_prefs, record.preferences.as_slice());
        trace!("`{}' shares {score} artist(s) with `{target}'", record.id);

        // Strict comparison: on a tie the earlier user stays
        if best.map_or(true, |current| score > current.score) {
            best = Some(BestMatch {
                user: &record.id,
                prefs: &record.preferences,
                score,
            });
        }
    }

    match &best {
        Some(found) => debug!(
            "Best match for `{target}' is `{}' ({} shared)",
            found.user, found.score
        ),
        None => debug!("No eligible match for `{target}'"),
    }

    best
}
