//! # Interactive Shell
//!
//! The menu-driven session behind `musicrec shell`. It owns the registry for
//! the duration of the session, reads commands from any [`BufRead`] and
//! writes everything to any [`Write`], so the same loop serves the terminal
//! and the tests.
//!
//! ## Menu
//!
//! | Key | Action |
//! |-----|--------|
//! | `e` | Enter preferences (saved immediately) |
//! | `r` | Get recommendations |
//! | `p` | Show the most popular artists |
//! | `h` | How popular is the most popular artist |
//! | `m` | Which user likes the most artists |
//! | `q` | Save and quit |
//!
//! End of input is treated as `q`.

use crate::artist_set::PreferenceSet;
use crate::recommend::recommend;
use crate::storage::{is_storable, PreferenceFile};
use crate::user::UserStore;
use crate::votes::{self, DEFAULT_TOP_N};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::io::{BufRead, Write};

const WELCOME: &str = "Welcome to the music recommender system!";
const NAME_PROMPT: &str = "Please enter your name: ";
const ARTIST_PROMPT: &str = "Enter an artist that you like (Enter to finish): ";
const MENU: &str = "Please enter a letter to choose an option:
e - Enter preferences
r - Get recommendations
p - Show most popular artists
h - How popular is the most popular
m - Which user has the most likes
q - Save and quit: ";
const NO_RECOMMENDATIONS: &str = "No recommendations available at this time.";
const NO_ARTISTS: &str = "Sorry, no artists found.";
const NO_USER: &str = "Sorry, no user found.";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    EnterPreferences,
    Recommend,
    PopularArtists,
    HowPopular,
    MostLikes,
    Quit,
}

impl MenuOption {
    /// Parses a menu key. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "e" => Some(Self::EnterPreferences),
            "r" => Some(Self::Recommend),
            "p" => Some(Self::PopularArtists),
            "h" => Some(Self::HowPopular),
            "m" => Some(Self::MostLikes),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// An interactive session for a single user.
pub struct Session<R, W> {
    input: R,
    output: W,
    store: UserStore,
    file: PreferenceFile,
    top_n: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, store: UserStore, file: PreferenceFile) -> Self {
        Self {
            input,
            output,
            store,
            file,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Number of artists the `p` option lists.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Runs the session until the user quits or input ends, and hands back
    /// the final registry.
    ///
    /// When `user` is `None` the name is asked for interactively.
    pub fn run(mut self, user: Option<String>) -> Result<UserStore> {
        writeln!(self.output, "{WELCOME}")?;

        let name = match user {
            Some(name) if name.is_empty() || !is_storable(&name) => {
                bail!("User name `{name}' is empty or contains ':' or ','")
            }
            Some(name) => name,
            None => match self.prompt_name()? {
                Some(name) => name,
                // Nobody to save anything for
                None => return Ok(self.store),
            },
        };
        writeln!(self.output, "Welcome, {name}")?;
        info!("Session started for `{name}'");

        // Start from whatever we already know about this user
        let mut prefs = self.store.get(&name).cloned().unwrap_or_default();

        loop {
            let Some(line) = self.read_line(MENU)? else {
                debug!("Input closed, saving and quitting");
                break;
            };

            match MenuOption::parse(&line) {
                Some(MenuOption::EnterPreferences) => {
                    prefs = self.collect_preferences()?;
                    self.store.upsert(&name, prefs.clone());
                    self.file.save(&self.store)?;
                }
                Some(MenuOption::Recommend) => self.show_recommendations(&name, &prefs)?,
                Some(MenuOption::PopularArtists) => self.show_popular()?,
                Some(MenuOption::HowPopular) => self.show_how_popular()?,
                Some(MenuOption::MostLikes) => self.show_most_likes(&name)?,
                Some(MenuOption::Quit) => break,
                None => debug!("Ignoring unknown option `{}'", line.trim()),
            }
        }

        self.store.upsert(&name, prefs);
        self.file.save(&self.store)?;
        info!("Session for `{name}' saved");
        Ok(self.store)
    }

    /// Reads one line after printing `prompt`. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt_name(&mut self) -> Result<Option<String>> {
        loop {
            let Some(line) = self.read_line(NAME_PROMPT)? else {
                return Ok(None);
            };
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            if !is_storable(name) {
                writeln!(self.output, "Names cannot contain ':' or ','.")?;
                continue;
            }
            return Ok(Some(name.to_string()));
        }
    }

    /// Prompts for artists until an empty entry.
    fn collect_preferences(&mut self) -> Result<PreferenceSet> {
        let mut entries = Vec::new();

        while let Some(line) = self.read_line(ARTIST_PROMPT)? {
            let entry = line.trim();
            if entry.is_empty() {
                break;
            }
            if !is_storable(entry) {
                writeln!(self.output, "Artist names cannot contain ':' or ','.")?;
                continue;
            }
            entries.push(entry.to_string());
        }

        let prefs = PreferenceSet::from_entries(entries);
        debug!("Collected {} artist(s)", prefs.len());
        Ok(prefs)
    }

    fn show_recommendations(&mut self, name: &str, prefs: &PreferenceSet) -> Result<()> {
        let recs = recommend(name, prefs, &self.store);
        if recs.is_empty() {
            writeln!(self.output, "{NO_RECOMMENDATIONS}")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "{name}, based on the users I currently know about, I believe you might like:"
        )?;
        for artist in recs {
            writeln!(self.output, "{artist}")?;
        }
        Ok(())
    }

    fn show_popular(&mut self) -> Result<()> {
        let top = votes::top_n(&votes::tally(&self.store), self.top_n);
        if top.is_empty() {
            writeln!(self.output, "{NO_ARTISTS}")?;
        }
        for artist in top {
            writeln!(self.output, "{artist}")?;
        }
        Ok(())
    }

    fn show_how_popular(&mut self) -> Result<()> {
        match votes::max_count(&votes::tally(&self.store)) {
            Some(count) => writeln!(self.output, "{count}")?,
            None => writeln!(self.output, "{NO_ARTISTS}")?,
        }
        Ok(())
    }

    fn show_most_likes(&mut self, name: &str) -> Result<()> {
        match votes::most_preferences_user(name, &self.store) {
            Some(user) => writeln!(self.output, "{user}")?,
            None => writeln!(self.output, "{NO_USER}")?,
        }
        Ok(())
    }
}
