//! Deck file loading and saving.
//!
//! A deck is a single pretty-printed JSON document. Saves write a sibling
//! temp file and rename it over the original so a crash mid-write never
//! leaves a truncated deck behind.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Deck;

/// Deck loading and saving errors.
#[derive(Debug)]
pub enum DeckError {
    FileNotFound(String),
    Io(String, String),
    InvalidJson(String, String),
    Save(String, String),
    InvalidExtension(String),
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::FileNotFound(path) => write!(f, "Failed to load deck: File not found: {}", path),
            DeckError::Io(path, err) => write!(f, "Failed to load deck: {} ({})", err, path),
            DeckError::InvalidJson(_, _) => write!(f, "Failed to load deck: Invalid JSON format"),
            DeckError::Save(path, err) => write!(f, "Failed to save deck: {} ({})", err, path),
            DeckError::InvalidExtension(path) => {
                write!(f, "Deck file must have .json extension: {}", path)
            }
        }
    }
}

impl DeckError {
    /// Returns a user-facing error message without exposing filesystem paths.
    pub fn user_message(&self) -> &'static str {
        match self {
            DeckError::FileNotFound(_) => "Deck file not found",
            DeckError::Io(_, _) => "Failed to read deck file",
            DeckError::InvalidJson(_, _) => "Deck file is not valid JSON",
            DeckError::Save(_, _) => "Failed to save deck file",
            DeckError::InvalidExtension(_) => "Deck file must have .json extension",
        }
    }
}

impl std::error::Error for DeckError {}

/// Reject paths that do not end in `.json`.
pub fn validate_deck_path(path: &Path) -> Result<(), DeckError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(()),
        _ => Err(DeckError::InvalidExtension(path.display().to_string())),
    }
}

/// Load a deck from a JSON file.
pub fn load_deck(path: &Path) -> Result<Deck, DeckError> {
    if !path.exists() {
        return Err(DeckError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| DeckError::Io(path.display().to_string(), e.to_string()))?;

    let deck: Deck = serde_json::from_str(&content)
        .map_err(|e| DeckError::InvalidJson(path.display().to_string(), e.to_string()))?;

    tracing::debug!("Loaded deck '{}' with {} cards from {}", deck.name, deck.cards.len(), path.display());
    Ok(deck)
}

/// Write `deck` to `path` with `modified` set to `now`, returning the stamped deck.
pub fn save_deck(path: &Path, deck: &Deck, now: DateTime<Utc>) -> Result<Deck, DeckError> {
    let stamped = Deck {
        modified: now,
        ..deck.clone()
    };

    let save_err = |e: String| DeckError::Save(path.display().to_string(), e);

    let json = serde_json::to_string_pretty(&stamped).map_err(|e| save_err(e.to_string()))?;

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| save_err(e.to_string()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(save_err(e.to_string()));
    }

    tracing::debug!("Saved deck '{}' to {}", stamped.name, path.display());
    Ok(stamped)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
