//! # musicrec - Artist Recommendations
//!
//! musicrec keeps a flat file of which artists each user likes and suggests
//! new artists based on the user whose taste overlaps most with yours.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive session
//! musicrec
//!
//! # One-shot queries against the stored preferences
//! musicrec recommend alice --verbose
//! musicrec --count 5 popular
//! musicrec most-likes alice
//! ```

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use musicrec::cli::{self, Command};
use musicrec::config::RuntimeConfig;
use musicrec::recommend;
use musicrec::shell::Session;
use musicrec::similarity::SelectorConfig;
use musicrec::storage::PreferenceFile;
use musicrec::user::{UserStore, Visibility};
use musicrec::{completion, votes};
use std::path::Path;

/// Main entry point for musicrec.
///
/// Initializes logging, parses command-line arguments, loads the preference
/// file and routes commands.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=debug musicrec` - Enable debug logging
/// - `RUST_LOG=musicrec::similarity=trace musicrec recommend alice` - Per-candidate scores
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config = || RuntimeConfig::new(args.store.as_deref(), args.count);

    match args.command.unwrap_or(Command::Shell { user: None }) {
        // Completions don't touch the store
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(
                completion::shell_to_completion_shell(shell),
                &mut cmd,
                &mut std::io::stdout(),
            );
        }
        Command::Shell { user } => {
            let config = config()?;
            let (file, store) = open_store(&config.store_path)?;
            let stdin = std::io::stdin();
            Session::new(stdin.lock(), std::io::stdout(), store, file)
                .with_top_n(config.top_n)
                .run(user)?;
        }
        Command::Recommend { user, verbose, json } => {
            let (_, store) = open_store(&config()?.store_path)?;
            let Some(prefs) = store.get(&user) else {
                bail!(
                    "Unknown user `{user}'. \
                     Enter some preferences first with `musicrec shell --user {user}`"
                );
            };
            info!("Recommending for `{user}'");
            let rec = recommend::explain(&user, prefs, &store, &SelectorConfig::default());

            if json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else if rec.is_empty() {
                println!("No recommendations available at this time.");
            } else {
                if verbose {
                    if let (Some(peer), Some(score)) = (&rec.peer, rec.score) {
                        println!("Best match: {peer} ({score} artist(s) in common)");
                    }
                }
                println!(
                    "{user}, based on the users I currently know about, I believe you might like:"
                );
                for artist in &rec.artists {
                    println!("{artist}");
                }
            }
        }
        Command::Popular { json } => {
            let config = config()?;
            let (_, store) = open_store(&config.store_path)?;
            let tally = votes::tally(&store);
            if json {
                let ranked: Vec<_> = tally.ranked().into_iter().take(config.top_n).collect();
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                let top = votes::top_n(&tally, config.top_n);
                if top.is_empty() {
                    println!("Sorry, no artists found.");
                }
                for artist in top {
                    println!("{artist}");
                }
            }
        }
        Command::HowPopular => {
            let (_, store) = open_store(&config()?.store_path)?;
            match votes::max_count(&votes::tally(&store)) {
                Some(count) => println!("{count}"),
                None => println!("Sorry, no artists found."),
            }
        }
        Command::MostLikes { user } => {
            let (_, store) = open_store(&config()?.store_path)?;
            match votes::most_preferences_user(&user, &store) {
                Some(found) => println!("{found}"),
                None => println!("Sorry, no user found."),
            }
        }
        Command::List { json } => {
            let (_, store) = open_store(&config()?.store_path)?;
            if json {
                let records: Vec<_> = store.iter().collect();
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &store {
                    let visibility = match record.id.visibility() {
                        Visibility::Public => "public",
                        Visibility::Private => "private",
                    };
                    println!(
                        "{} ({visibility}): {} artist(s)",
                        record.id,
                        record.preferences.len()
                    );
                }
            }
        }
    }

    Ok(())
}

/// Loads the registry, creating the store file if it doesn't exist yet.
fn open_store(path: &Path) -> Result<(PreferenceFile, UserStore)> {
    debug!("Using store at {}", path.display());
    let file = PreferenceFile::new(path);
    let store = file.load()?;
    Ok((file, store))
}
