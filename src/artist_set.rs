//! # Artist Set Algebra
//!
//! Merge-style operations over sorted artist lists. Every function in this
//! module walks its inputs once with two cursors, so all of them assume the
//! slices are already sorted ascending (plain `str` ordering). Nothing here
//! sorts or validates; that is the job of [`PreferenceSet`]'s constructors.
//!
//! ## Operations
//!
//! - [`match_count`] - how many artists two users have in common
//! - [`difference`] - what the second list has that the first lacks
//! - [`is_subset`] - whether one list brings nothing new relative to another
//!
//! ## Examples
//!
//! ```
//! use musicrec::artist_set::{difference, match_count};
//!
//! let alice = vec!["Adele".to_string(), "Coldplay".to_string()];
//! let bob = vec!["Coldplay".to_string(), "Drake".to_string()];
//!
//! assert_eq!(match_count(&alice, &bob), 1);
//! assert_eq!(difference(&alice, &bob), vec!["Drake".to_string()]);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Deref;

/// Counts the artists present in both `a` and `b`.
///
/// Linear two-pointer merge, O(|a| + |b|) with no allocation. Returns 0 when
/// either side is empty.
#[must_use]
pub fn match_count<S: AsRef<str>>(a: &[S], b: &[S]) -> usize {
    let (mut i, mut j) = (0, 0);
    let mut matches = 0;

    while i < a.len() && j < b.len() {
        match a[i].as_ref().cmp(b[j].as_ref()) {
            Ordering::Equal => {
                matches += 1;
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }

    matches
}

/// Returns the elements of `b` that are not in `a`, in `b`'s order.
///
/// This is "what does `b` have that `a` lacks", not a symmetric difference.
/// Once `a` runs out, everything left in `b` is kept.
///
/// Re-applying it to its own output is not guaranteed to be a no-op for
/// unsorted input, so callers should only feed it sorted slices.
#[must_use]
pub fn difference<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<String> {
    let mut missing = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].as_ref().cmp(b[j].as_ref()) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => {
                missing.push(b[j].as_ref().to_string());
                j += 1;
            }
        }
    }

    // `a` is exhausted: the tail of `b` is unmatched by definition
    missing.extend(b[j..].iter().map(|artist| artist.as_ref().to_string()));
    missing
}

/// True when every artist in `sub` also appears in `sup`.
///
/// An empty `sub` is a subset of anything. Repeated entries in `sub` are
/// satisfied by a single occurrence in `sup`.
#[must_use]
pub fn is_subset<S: AsRef<str>>(sub: &[S], sup: &[S]) -> bool {
    let mut j = 0;

    for artist in sub {
        let artist = artist.as_ref();
        while j < sup.len() && sup[j].as_ref() < artist {
            j += 1;
        }
        if j == sup.len() || sup[j].as_ref() != artist {
            return false;
        }
    }

    true
}

/// Title-cases a single artist entry.
///
/// A letter directly after another letter is lower-cased, every other letter
/// is upper-cased, and non-letters pass through untouched.
///
/// ```
/// use musicrec::artist_set::title_case;
///
/// assert_eq!(title_case("the beatles"), "The Beatles");
/// assert_eq!(title_case("AC/DC"), "Ac/Dc");
/// ```
#[must_use]
pub fn title_case(entry: &str) -> String {
    let mut out = String::with_capacity(entry.len());
    let mut prev_letter = false;

    for ch in entry.chars() {
        if ch.is_alphabetic() {
            if prev_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }

    out
}

/// A user's liked artists, sorted ascending.
///
/// Constructors decide how much normalization happens; once built the set is
/// read-only and derefs to `[String]` so it can be handed straight to the
/// merge functions above.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceSet(Vec<String>);

impl PreferenceSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Wraps artists the caller guarantees are already sorted.
    #[must_use]
    pub fn from_sorted(artists: Vec<String>) -> Self {
        debug_assert!(
            artists.windows(2).all(|w| w[0] <= w[1]),
            "from_sorted called with unsorted artists"
        );
        Self(artists)
    }

    /// Sorts the given artists. Duplicates are kept.
    #[must_use]
    pub fn from_unsorted(mut artists: Vec<String>) -> Self {
        artists.sort();
        Self(artists)
    }

    /// Builds a set from raw user input: each entry is trimmed and
    /// title-cased, blanks are dropped, the result is sorted and deduplicated.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut artists: Vec<String> = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_string())
            .filter(|entry| !entry.is_empty())
            .map(|entry| title_case(&entry))
            .collect();
        artists.sort();
        artists.dedup();
        Self(artists)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for PreferenceSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[String]> for PreferenceSet {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a PreferenceSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(artists: &[&str]) -> Vec<String> {
        artists.iter().map(|a| (*a).to_string()).collect()
    }

    #[test]
    fn test_match_count_empty_inputs() {
        let empty: Vec<String> = Vec::new();
        let some = set(&["Adele", "Drake"]);

        assert_eq!(match_count(&empty, &some), 0);
        assert_eq!(match_count(&some, &empty), 0);
        assert_eq!(match_count(&empty, &empty), 0);
    }

    #[test]
    fn test_match_count_is_symmetric() {
        let cases = [
            (set(&["Adele", "Coldplay"]), set(&["Coldplay", "Drake"])),
            (set(&["A", "B", "C", "D"]), set(&["B", "D", "E"])),
            (set(&["Muse"]), set(&["Abba", "Blur", "Muse", "Oasis"])),
            (set(&[]), set(&["Queen"])),
        ];

        for (a, b) in &cases {
            assert_eq!(
                match_count(a, b),
                match_count(b, a),
                "match_count should not depend on argument order for {a:?} / {b:?}"
            );
        }
    }

    #[test]
    fn test_match_count_self_is_len() {
        let a = set(&["Abba", "Blur", "Muse", "Oasis", "Queen"]);
        assert_eq!(match_count(&a, &a), a.len(), "A set fully matches itself");
    }

    #[test]
    fn test_match_count_disjoint_interleaved() {
        let a = set(&["A", "C", "E"]);
        let b = set(&["B", "D", "F"]);
        assert_eq!(match_count(&a, &b), 0);
    }

    #[test]
    fn test_difference_edge_cases() {
        let empty: Vec<String> = Vec::new();
        let b = set(&["Blur", "Muse"]);

        assert_eq!(difference(&empty, &b), b, "Empty `a` keeps all of `b`");
        assert!(difference(&b, &empty).is_empty(), "Empty `b` yields nothing");
    }

    #[test]
    fn test_difference_is_not_symmetric() {
        let a = set(&["Adele", "Coldplay"]);
        let b = set(&["Coldplay", "Drake"]);

        assert_eq!(difference(&a, &b), set(&["Drake"]));
        assert_eq!(difference(&b, &a), set(&["Adele"]));
    }

    #[test]
    fn test_difference_keeps_tail_after_a_exhausted() {
        let a = set(&["B"]);
        let b = set(&["A", "B", "C", "D"]);
        assert_eq!(difference(&a, &b), set(&["A", "C", "D"]));
    }

    #[test]
    fn test_difference_is_ordered_subsequence_disjoint_from_a() {
        let a = set(&["Abba", "Cher", "Muse", "Queen"]);
        let b = set(&["Abba", "Blur", "Muse", "Oasis", "Zedd"]);
        let diff = difference(&a, &b);

        // Subsequence of b, preserving order
        let mut it = b.iter();
        for artist in &diff {
            assert!(it.any(|x| x == artist), "{artist} out of order or not in b");
        }
        // Nothing from a survives
        assert!(diff.iter().all(|artist| !a.contains(artist)));
    }

    #[test]
    fn test_difference_plus_common_reconstructs_b() {
        let a = set(&["Abba", "Cher", "Muse"]);
        let b = set(&["Abba", "Blur", "Muse", "Oasis"]);

        let mut rebuilt = difference(&a, &b);
        rebuilt.extend(b.iter().filter(|artist| a.contains(artist)).cloned());
        rebuilt.sort();

        let mut expected = b.clone();
        expected.sort();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_is_subset() {
        let sup = set(&["Abba", "Blur", "Muse"]);

        assert!(is_subset(&set(&[]), &sup), "Empty set is a subset of anything");
        assert!(is_subset(&set(&["Abba", "Muse"]), &sup));
        assert!(is_subset(&sup, &sup));
        assert!(!is_subset(&set(&["Abba", "Cher"]), &sup));
        assert!(!is_subset(&set(&["Zedd"]), &sup));
        assert!(!is_subset(&set(&["Abba"]), &set(&[])));
    }

    #[test]
    fn test_is_subset_with_repeated_entries() {
        let sup = set(&["Abba", "Muse"]);
        assert!(is_subset(&set(&["Abba", "Abba", "Muse"]), &sup));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("the beatles"), "The Beatles");
        assert_eq!(title_case("PINK FLOYD"), "Pink Floyd");
        assert_eq!(title_case("ac/dc"), "Ac/Dc");
        assert_eq!(title_case("blink-182"), "Blink-182");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_preference_set_from_entries_normalizes() {
        let prefs = PreferenceSet::from_entries(["  muse ", "abba", "MUSE", "", "   "]);
        assert_eq!(prefs.as_slice(), set(&["Abba", "Muse"]).as_slice());
    }

    #[test]
    fn test_preference_set_from_unsorted_keeps_duplicates() {
        let prefs = PreferenceSet::from_unsorted(set(&["Muse", "Abba", "Muse"]));
        assert_eq!(prefs.as_slice(), set(&["Abba", "Muse", "Muse"]).as_slice());
    }
}
