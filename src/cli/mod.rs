//! Command-line front end: argument parsing and command dispatch.

pub mod cards;
pub mod study;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::deck::{self, load_deck, validate_deck_path};

/// flashdeck - spaced repetition flashcards in the terminal
#[derive(Parser, Debug)]
#[command(name = "flashdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Study a JSON flashcard deck with spaced repetition")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new, empty deck file
    Init {
        /// Path of the deck file to create
        deck: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Review the cards that are due now
    Study {
        /// Deck file (defaults to the configured deck)
        deck: Option<PathBuf>,
    },

    /// Add a card
    Add {
        front: String,
        back: String,
        #[arg(long)]
        deck: Option<PathBuf>,
    },

    /// Change the text of a card
    Edit {
        id: String,
        #[arg(long)]
        front: Option<String>,
        #[arg(long)]
        back: Option<String>,
        #[arg(long)]
        deck: Option<PathBuf>,
    },

    /// Delete a card
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        deck: Option<PathBuf>,
    },

    /// List cards
    List {
        deck: Option<PathBuf>,
        /// Only due cards, in study order
        #[arg(long)]
        due: bool,
    },

    /// Show deck name, description and card counts
    Stats { deck: Option<PathBuf> },
}

fn deck_path(config: &Config, arg: Option<PathBuf>) -> Result<PathBuf> {
    let path = config
        .resolve_deck(arg)
        .ok_or_else(|| anyhow!("No deck given. Pass a deck path or set FLASHDECK_DECK"))?;
    validate_deck_path(&path)?;
    Ok(path)
}

pub fn run(cli: Cli, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Init {
            deck: path,
            name,
            description,
        } => {
            validate_deck_path(&path)?;
            if path.exists() {
                return Err(anyhow!("Refusing to overwrite existing deck {}", path.display()));
            }
            let now = Utc::now();
            let new_deck = deck::create_new_deck(&name, &description, now);
            deck::save_deck(&path, &new_deck, now)?;
            tracing::info!("Created deck '{}' at {}", name, path.display());
            cards::print_stats(&mut out, &new_deck, now)?;
        }
        Commands::Study { deck: arg } => {
            let path = deck_path(config, arg)?;
            let loaded = load_deck(&path)?;
            let options = study::StudyOptions {
                auto_save: config.auto_save,
            };
            study::run_study(&path, loaded, &mut input, &mut out, options, Utc::now)
                .context("Study session failed")?;
        }
        Commands::Add { front, back, deck: arg } => {
            let path = deck_path(config, arg)?;
            cards::add(&path, &front, &back, &mut out, Utc::now())?;
        }
        Commands::Edit {
            id,
            front,
            back,
            deck: arg,
        } => {
            let path = deck_path(config, arg)?;
            cards::edit(&path, &id, front.as_deref(), back.as_deref(), &mut out, Utc::now())?;
        }
        Commands::Delete { id, yes, deck: arg } => {
            let path = deck_path(config, arg)?;
            cards::delete(&path, &id, yes, &mut input, &mut out, Utc::now())?;
        }
        Commands::List { deck: arg, due } => {
            let path = deck_path(config, arg)?;
            let loaded = load_deck(&path)?;
            cards::print_list(&mut out, &loaded, due, Utc::now())?;
        }
        Commands::Stats { deck: arg } => {
            let path = deck_path(config, arg)?;
            let loaded = load_deck(&path)?;
            cards::print_stats(&mut out, &loaded, Utc::now())?;
        }
    }

    Ok(())
}
