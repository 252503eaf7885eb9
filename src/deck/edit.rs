//! Card add/edit/delete on an in-memory deck.
//!
//! Every operation returns a new `Deck` and leaves its input alone. Operations
//! that find nothing to change hand back an identical deck, `modified` included.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Card, Deck};

#[derive(Debug, PartialEq, Eq)]
pub enum EditError {
    /// Front or back was blank after trimming
    EmptyField(&'static str),
    CardNotFound(String),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::EmptyField(field) => write!(f, "Card {} must not be empty", field),
            EditError::CardNotFound(id) => write!(f, "Card not found: {}", id),
        }
    }
}

impl std::error::Error for EditError {}

/// Fresh identifier for a new card.
pub fn new_card_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn create_new_deck(name: &str, description: &str, now: DateTime<Utc>) -> Deck {
    Deck {
        name: name.to_string(),
        description: description.to_string(),
        cards: Vec::new(),
        created: now,
        modified: now,
    }
}

fn clean_text(value: &str, field: &'static str) -> Result<String, EditError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EditError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Append a new, never-reviewed card.
pub fn add_card(
    deck: &Deck,
    id: String,
    front: &str,
    back: &str,
    now: DateTime<Utc>,
) -> Result<Deck, EditError> {
    let card = Card::new(id, clean_text(front, "front")?, clean_text(back, "back")?);
    tracing::info!(card_id = %card.id, "Added card");

    let mut cards = deck.cards.clone();
    cards.push(card);
    Ok(Deck {
        cards,
        modified: now,
        ..deck.clone()
    })
}

/// Replace the card with the same id. Unknown ids leave the deck unchanged.
pub fn update_card(deck: &Deck, updated: &Card, now: DateTime<Utc>) -> Deck {
    let Some(index) = deck.cards.iter().position(|c| c.id == updated.id) else {
        tracing::debug!(card_id = %updated.id, "Update skipped, card not in deck");
        return deck.clone();
    };

    let mut cards = deck.cards.clone();
    cards[index] = updated.clone();
    Deck {
        cards,
        modified: now,
        ..deck.clone()
    }
}

/// Change a card's text without touching its schedule.
pub fn edit_card_text(
    deck: &Deck,
    id: &str,
    front: Option<&str>,
    back: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Deck, EditError> {
    let current = deck
        .card(id)
        .ok_or_else(|| EditError::CardNotFound(id.to_string()))?;

    let edited = Card {
        front: match front {
            Some(f) => clean_text(f, "front")?,
            None => current.front.clone(),
        },
        back: match back {
            Some(b) => clean_text(b, "back")?,
            None => current.back.clone(),
        },
        ..current.clone()
    };

    Ok(update_card(deck, &edited, now))
}

/// Remove a card by id. Unknown ids leave the deck unchanged.
pub fn delete_card(deck: &Deck, id: &str, now: DateTime<Utc>) -> Deck {
    let cards: Vec<Card> = deck.cards.iter().filter(|c| c.id != id).cloned().collect();

    if cards.len() == deck.cards.len() {
        return deck.clone();
    }

    tracing::info!(card_id = %id, "Deleted card");
    Deck {
        cards,
        modified: now,
        ..deck.clone()
    }
}
