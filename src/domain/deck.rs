use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::{iso_millis, Card};

/// A named collection of cards, stored as one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
  pub name: String,
  pub description: String,
  pub cards: Vec<Card>,
  #[serde(with = "iso_millis::required")]
  pub created: DateTime<Utc>,
  #[serde(with = "iso_millis::required")]
  pub modified: DateTime<Utc>,
}

impl Deck {
  pub fn card(&self, id: &str) -> Option<&Card> {
    self.cards.iter().find(|c| c.id == id)
  }
}
