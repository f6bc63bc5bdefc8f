//! # Command-Line Interface Module
//!
//! This module defines the command-line interface for musicrec using Clap
//! derive macros.
//!
//! ## Commands
//!
//! - `shell`: Interactive session (the default when no command is given)
//! - `recommend`: Recommendations for a stored user
//! - `popular`: Most liked artists
//! - `how-popular`: Vote count of the most liked artist
//! - `most-likes`: User who likes the most artists
//! - `list`: Every stored user
//!
//! ## Examples
//!
//! ```bash
//! musicrec
//! musicrec --store ./prefs.txt shell --user alice --count 5
//! musicrec recommend alice --verbose
//! musicrec popular --count 5 --json
//! ```

use crate::votes::DEFAULT_TOP_N;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "musicrec")]
#[command(about = "musicrec: artist recommendations from the people who share your taste")]
#[command(version)]
pub struct Args {
    /// Preference file to read and write
    ///
    /// Defaults to `musicrecplus.txt` in the platform data directory.
    /// The file is created if it does not exist.
    #[arg(
        long,
        global = true,
        env = "MUSICREC_STORE",
        value_name = "PATH",
        value_hint = clap::ValueHint::FilePath
    )]
    pub store: Option<PathBuf>,

    /// How many artists the popularity views list
    ///
    /// Applies to `popular` and to the shell's `p` option.
    #[arg(short = 'n', long, global = true, default_value_t = DEFAULT_TOP_N)]
    pub count: usize,

    /// The subcommand to execute; starts the interactive shell when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session
    ///
    /// Prompts for your name, then offers a menu to enter preferences,
    /// get recommendations and look at popularity statistics. Preferences
    /// are saved when entered and again on quit.
    Shell {
        /// Skip the name prompt and use this user
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Recommend artists to a stored user
    ///
    /// Uses the user's stored preferences, finds the public user with the
    /// most artists in common, and lists what that user likes that you
    /// don't.
    Recommend {
        /// Name of the user to recommend for
        user: String,

        /// Also show which user the recommendations came from
        #[arg(short, long)]
        verbose: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most liked artists
    ///
    /// Counts every user, private ones included. Artists with the same
    /// number of likes are listed in the order they were first seen.
    Popular {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how many likes the most popular artist has
    HowPopular,

    /// Show which user likes the most artists
    ///
    /// Considers public users plus the given user, even if private.
    MostLikes {
        /// The user asking
        user: String,
    },

    /// List every stored user
    List {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: musicrec completion bash > ~/.local/share/bash-completion/completions/musicrec
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
