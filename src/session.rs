//! Progress through one pass over the due list.
//!
//! The session holds card ids only. Each rating replaces a card in the deck,
//! so the caller resolves ids against the current deck.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Card, Difficulty};
use crate::srs;

#[derive(Debug, Clone)]
pub struct StudySession {
  /// Card ids in study order, fixed when the session starts
  queue: Vec<String>,
  current_index: usize,
  pub cards_reviewed: u32,
  /// Reviews not rated Hard
  pub correct: u32,
  pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
  pub total_due: usize,
  pub cards_reviewed: u32,
  pub correct: u32,
  pub elapsed: Duration,
}

impl StudySession {
  pub fn start(cards: &[Card], now: DateTime<Utc>) -> Self {
    let queue: Vec<String> = srs::select_due(cards, now)
      .into_iter()
      .map(|c| c.id.clone())
      .collect();
    tracing::info!("Study session started with {} due cards", queue.len());

    Self {
      queue,
      current_index: 0,
      cards_reviewed: 0,
      correct: 0,
      started_at: now,
    }
  }

  /// Id of the card to show next, or None when the session is done
  pub fn current(&self) -> Option<&str> {
    self.queue.get(self.current_index).map(String::as_str)
  }

  /// 1-based position for "Card N of M" display
  pub fn position(&self) -> (usize, usize) {
    ((self.current_index + 1).min(self.queue.len()), self.queue.len())
  }

  /// Count the rating for the current card and move to the next one
  pub fn record(&mut self, difficulty: Difficulty) {
    if self.is_complete() {
      return;
    }
    self.cards_reviewed += 1;
    if difficulty.is_correct() {
      self.correct += 1;
    }
    self.current_index += 1;
  }

  /// Move past the current card without counting a review
  pub fn skip(&mut self) {
    if !self.is_complete() {
      self.current_index += 1;
    }
  }

  pub fn is_complete(&self) -> bool {
    self.current_index >= self.queue.len()
  }

  pub fn summary(&self, now: DateTime<Utc>) -> SessionSummary {
    SessionSummary {
      total_due: self.queue.len(),
      cards_reviewed: self.cards_reviewed,
      correct: self.correct,
      elapsed: now - self.started_at,
    }
  }
}
