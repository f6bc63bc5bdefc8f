//! # Configuration Module
//!
//! This module handles configuration management and data directory setup for
//! musicrec. It resolves where the preference file lives and carries the few
//! runtime knobs the commands need.
//!
//! ## Data Storage
//!
//! Unless `--store` (or `MUSICREC_STORE`) says otherwise, preferences are kept
//! in the platform-standard data directory:
//! - Linux: `~/.local/share/musicrec/musicrecplus.txt`
//! - macOS: `~/Library/Application Support/musicrec/musicrecplus.txt`
//! - Windows: `%APPDATA%\musicrec\musicrecplus.txt`

use anyhow::{Context, Result};
use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the preference store inside the data directory.
pub const STORE_FILE_NAME: &str = "musicrecplus.txt";

/// Returns the platform-appropriate data directory for musicrec, creating it
/// if needed.
///
/// # Errors
///
/// Fails if the system data directory cannot be determined or the
/// `musicrec` subdirectory cannot be created.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. \
             Pass --store to choose a preference file explicitly."
        )
    })?;

    let app_dir = data_dir.join("musicrec");
    fs::create_dir_all(&app_dir)
        .with_context(|| format!(
            "Failed to create musicrec data directory at {}. Please check file permissions.",
            app_dir.display()
        ))?;

    Ok(app_dir)
}

/// Returns the default preference file path inside [`get_data_dir`].
///
/// ```no_run
/// use musicrec::config::get_store_path;
///
/// let store = get_store_path()?;
/// println!("Preferences live in {}", store.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_store_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(STORE_FILE_NAME))
}

/// Picks the store path: an explicit one made absolute against the current
/// directory, otherwise the default location.
pub fn resolve_store_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            let absolute = path
                .absolutize()
                .with_context(|| format!("Failed to resolve store path {}", path.display()))?;
            Ok(absolute.into_owned())
        }
        None => get_store_path(),
    }
}

/// Configuration for runtime behavior
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Path to the preference file
    pub store_path: PathBuf,
    /// How many artists the popularity views list
    pub top_n: usize,
}

impl RuntimeConfig {
    /// Builds the configuration from the `--store` override and `--count`.
    pub fn new(store: Option<&Path>, top_n: usize) -> Result<Self> {
        Ok(Self {
            store_path: resolve_store_path(store)?,
            top_n,
        })
    }
}
