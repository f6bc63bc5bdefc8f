//! Artist recommendations from the people who share your taste.
//!
//! Core modules:
//! - [`artist_set`] - Merge operations over sorted artist lists
//! - [`similarity`] - Best-matching peer selection
//! - [`recommend`] - Recommendations from the best match
//! - [`votes`] - Popularity tally and rankings
//!
//! ### Supporting Modules
//!
//! - [`user`] - User ids, visibility and the ordered registry
//! - [`storage`] - The flat preference file
//! - [`config`] - Data directory and store path resolution
//! - [`shell`] - Interactive menu session
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use musicrec::storage::PreferenceFile;
//! use musicrec::{recommend, votes};
//!
//! let file = PreferenceFile::new(musicrec::config::get_store_path()?);
//! let store = file.load()?;
//!
//! if let Some(prefs) = store.get("alice") {
//!     for artist in recommend::recommend("alice", prefs, &store) {
//!         println!("{artist}");
//!     }
//! }
//!
//! let top = votes::top_n(&votes::tally(&store), votes::DEFAULT_TOP_N);
//! println!("Most popular: {top:?}");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## How Matching Works
//!
//! Every user has a sorted list of liked artists. To recommend for a user:
//!
//! 1. Public users (ids not ending in `$`) are the candidates.
//! 2. Candidates whose artists are all already liked by the user are dropped.
//! 3. The candidate sharing the most artists wins; ties go to whoever was
//!    registered first.
//! 4. The recommendation is everything the winner likes that the user does
//!    not.
//!
//! Popularity counts every user, private ones included.
//!
//! ## Error Handling
//!
//! Empty registries, missing matches and empty tallies are ordinary results
//! (empty lists or `None`). Only storage failures surface as
//! `anyhow::Error`.

pub mod artist_set;
pub mod cli;
pub mod completion;
pub mod config;
pub mod recommend;
pub mod shell;
pub mod similarity;
pub mod storage;
pub mod user;
pub mod votes;
