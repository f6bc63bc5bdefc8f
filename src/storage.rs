//! # Preference File Storage
//!
//! Reads and writes the flat text file that holds every user's liked
//! artists, one user per line:
//!
//! ```text
//! alice:Adele,Coldplay
//! bob:Coldplay,Drake
//! carol$:Muse
//! ```
//!
//! The format has no escaping, so user names and artists may not contain
//! `:`, `,` or line breaks. Saving refuses such values rather than writing
//! a file that would load back differently.
//!
//! ## Malformed Lines
//!
//! Loading is lenient. A line is skipped with a warning when it has no `:`,
//! an empty user name, or any value that could not be saved again (a second
//! `:`, a `,` in the name, a stray carriage return). `name:` with nothing
//! after the colon is a user who likes nothing yet, which is also what
//! [`PreferenceFile::save`] writes for such users. Empty artist fields and
//! blank lines are ignored.

use crate::artist_set::PreferenceSet;
use crate::user::UserStore;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Separates the user name from the artist list.
pub const FIELD_SEPARATOR: char = ':';
/// Separates artists within the list.
pub const ARTIST_SEPARATOR: char = ',';

/// True if `value` can be written to the store file unchanged.
#[must_use]
pub fn is_storable(value: &str) -> bool {
    !value.contains([FIELD_SEPARATOR, ARTIST_SEPARATOR, '\n', '\r'])
}

/// Handle to the preference file on disk.
#[derive(Debug, Clone)]
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty store file (and its parent directories) if none
    /// exists yet. An existing file is left untouched.
    pub fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory at {}", parent.display())
            })?;
        }

        // `create` without `truncate` keeps any existing contents
        let existed = self.path.exists();
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open store file at {}", self.path.display()))?;

        if !existed {
            info!("Store file did not exist, created empty one at {}", self.path.display());
        }
        Ok(())
    }

    /// Loads every user from the store file, creating it first if missing.
    pub fn load(&self) -> Result<UserStore> {
        self.ensure_exists()?;

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store file at {}", self.path.display()))?;
        let store = parse_store(&contents);

        info!("Loaded {} user(s) from {}", store.len(), self.path.display());
        Ok(store)
    }

    /// Writes the whole registry back to disk.
    ///
    /// The new contents go to a temporary file in the same directory which
    /// then replaces the store, so a failed save leaves the old file intact.
    pub fn save(&self, store: &UserStore) -> Result<()> {
        let contents = format_store(store)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory at {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        tmp.write_all(contents.as_bytes())
            .context("Failed to write preferences to temporary file")?;
        tmp.as_file()
            .sync_all()
            .context("Failed to flush preferences to disk")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace store file at {}", self.path.display()))?;

        info!("Saved {} user(s) to {}", store.len(), self.path.display());
        Ok(())
    }
}

/// Parses a single store line into a user name and its preferences.
///
/// Returns `None` for lines that can't be interpreted, including any line
/// [`format_line`] could not write back (a second `:`, a `,` in the name or
/// a stray carriage return).
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, PreferenceSet)> {
    let (name, artists) = line.split_once(FIELD_SEPARATOR)?;
    if name.is_empty() || !is_storable(name) {
        return None;
    }

    let mut parsed = Vec::new();
    for artist in artists.split(ARTIST_SEPARATOR) {
        if artist.is_empty() {
            continue;
        }
        if !is_storable(artist) {
            return None;
        }
        parsed.push(artist.to_string());
    }

    Some((name, PreferenceSet::from_unsorted(parsed)))
}

/// Parses the full file contents. Malformed lines are logged and skipped.
#[must_use]
pub fn parse_store(contents: &str) -> UserStore {
    let mut store = UserStore::new();

    for (number, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Some((name, preferences)) => {
                if store.contains(name) {
                    warn!(
                        "Line {}: user `{name}' appears more than once, keeping the later entry",
                        number + 1
                    );
                }
                store.upsert(name, preferences);
            }
            None => warn!("Line {}: skipping malformed record `{line}'", number + 1),
        }
    }

    debug!("Parsed {} user(s)", store.len());
    store
}

/// Renders one user as a store line, without the trailing newline.
pub fn format_line(name: &str, preferences: &[String]) -> Result<String> {
    if name.is_empty() || !is_storable(name) {
        bail!(
            "User name `{name}' cannot be stored: it is empty or contains `:`, `,` or a line break"
        );
    }
    if let Some(artist) = preferences.iter().find(|artist| !is_storable(artist)) {
        bail!(
            "Artist `{artist}' liked by `{name}' cannot be stored: \
             it contains `:`, `,` or a line break"
        );
    }

    let mut line = String::from(name);
    line.push(FIELD_SEPARATOR);
    line.push_str(&preferences.join(","));
    Ok(line)
}

/// Renders the full registry in store order.
pub fn format_store(store: &UserStore) -> Result<String> {
    let mut out = String::new();
    for record in store {
        out.push_str(&format_line(record.id.name(), record.preferences.as_slice())?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_line_sorts_artists() {
        let (name, prefs) = parse_line("alice:Coldplay,Adele").unwrap();
        assert_eq!(name, "alice");
        assert_eq!(prefs.as_slice(), ["Adele".to_string(), "Coldplay".to_string()]);
    }

    #[test]
    fn test_parse_line_empty_list_is_valid() {
        let (name, prefs) = parse_line("bob:").unwrap();
        assert_eq!(name, "bob");
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_parse_line_malformed() {
        assert!(parse_line("no separator here").is_none());
        assert!(parse_line(":Adele").is_none(), "Empty user name is rejected");
    }

    #[test]
    fn test_parse_line_rejects_unwritable_values() {
        assert!(parse_line("a:x:y").is_none(), "A second `:` can't be written back");
        assert!(parse_line("carol:Muse:Live,Blur").is_none());
        assert!(parse_line("al,ice:Adele").is_none(), "A `,` in the name can't be written back");
        assert!(parse_line("bob:Drake\r,Muse").is_none());
    }

    #[test]
    fn test_parse_store_round_trips_through_format() {
        let store = parse_store("bob:Coldplay,Drake\ncarol:Muse:Live\nal,ice:Adele\ndave:\n");
        let names: Vec<&str> = store.iter().map(|r| r.id.name()).collect();
        assert_eq!(names, vec!["bob", "dave"]);
        assert!(format_store(&store).is_ok(), "Everything loaded must be savable");
    }

    #[test]
    fn test_parse_line_drops_empty_fields() {
        let (_, prefs) = parse_line("a:Muse,,Abba,").unwrap();
        assert_eq!(prefs.as_slice(), ["Abba".to_string(), "Muse".to_string()]);
    }

    #[test]
    fn test_parse_store_skips_bad_lines() {
        let store = parse_store("alice:Adele\n\ngarbage\nbob:Drake\n");
        let names: Vec<&str> = store.iter().map(|r| r.id.name()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_format_line() {
        let prefs = vec!["Adele".to_string(), "Coldplay".to_string()];
        assert_eq!(format_line("alice", &prefs).unwrap(), "alice:Adele,Coldplay");
        assert_eq!(format_line("bob", &[]).unwrap(), "bob:");
    }

    #[test]
    fn test_format_line_rejects_delimiters() {
        assert!(format_line("a:b", &[]).is_err());
        assert!(format_line("", &[]).is_err());
        assert!(format_line("alice", &["Earth, Wind & Fire".to_string()]).is_err());
    }

    #[test]
    fn test_is_storable() {
        assert!(is_storable("Guns N' Roses"));
        assert!(!is_storable("Crosby, Stills & Nash"));
        assert!(!is_storable("Re:Stage"));
        assert!(!is_storable("two\nlines"));
    }

    #[test]
    fn test_load_creates_missing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("prefs.txt");
        let file = PreferenceFile::new(&path);

        let store = file.load()?;
        assert!(store.is_empty());
        assert!(path.exists(), "Missing store file should be created");
        assert_eq!(fs::read_to_string(&path)?, "");
        Ok(())
    }

    #[test]
    fn test_ensure_exists_keeps_contents() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("prefs.txt");
        fs::write(&path, "alice:Adele\n")?;

        PreferenceFile::new(&path).ensure_exists()?;
        assert_eq!(fs::read_to_string(&path)?, "alice:Adele\n");
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let dir = TempDir::new()?;
        let file = PreferenceFile::new(dir.path().join("prefs.txt"));

        let mut store = UserStore::new();
        store.upsert("bob", PreferenceSet::from_entries(["drake", "coldplay"]));
        store.upsert("carol$", PreferenceSet::new());
        store.upsert("alice", PreferenceSet::from_entries(["adele"]));
        file.save(&store)?;

        assert_eq!(
            fs::read_to_string(file.path())?,
            "bob:Coldplay,Drake\ncarol$:\nalice:Adele\n"
        );
        assert_eq!(file.load()?, store);
        Ok(())
    }

    #[test]
    fn test_failed_save_leaves_file_intact() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("prefs.txt");
        fs::write(&path, "alice:Adele\n")?;

        let mut store = UserStore::new();
        store.upsert("bad:name", PreferenceSet::new());
        assert!(PreferenceFile::new(&path).save(&store).is_err());
        assert_eq!(fs::read_to_string(&path)?, "alice:Adele\n");
        Ok(())
    }
}
