//! Study-session card selection.
//!
//! Picks the cards that should be shown now and orders them:
//! - previously reviewed cards first, most overdue first
//! - new cards last, in deck order

use chrono::{DateTime, Utc};

use crate::domain::Card;

/// Whether `card` belongs in a study session started at `now`
pub fn is_due(card: &Card, now: DateTime<Utc>) -> bool {
  if card.is_new() {
    return true;
  }

  match card.next_review {
    Some(next) => next <= now,
    None => {
      // Reviewed cards always carry a next_review; treat a missing one as due
      tracing::warn!(card_id = %card.id, interval = card.interval, "Reviewed card has no next review date");
      true
    }
  }
}

/// Due cards in study order. Borrows from `cards`; nothing is copied or mutated.
pub fn select_due(cards: &[Card], now: DateTime<Utc>) -> Vec<&Card> {
  let (new_cards, mut reviewed): (Vec<&Card>, Vec<&Card>) = cards
    .iter()
    .filter(|c| is_due(c, now))
    .partition(|c| c.is_new());

  // Stable: equal due dates keep deck order. Missing dates sort as the epoch.
  reviewed.sort_by_key(|c| c.next_review.unwrap_or(DateTime::UNIX_EPOCH));

  reviewed.extend(new_cards);
  reviewed
}

pub fn due_count(cards: &[Card], now: DateTime<Utc>) -> usize {
  cards.iter().filter(|c| is_due(c, now)).count()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
  }

  fn reviewed(id: &str, interval: f64, next: Option<DateTime<Utc>>) -> Card {
    Card {
      id: id.to_string(),
      front: format!("Question {}", id),
      back: format!("Answer {}", id),
      interval,
      last_reviewed: next.map(|n| n - Duration::days(interval as i64)),
      next_review: next,
    }
  }

  fn new_card(id: &str) -> Card {
    Card::new(id.to_string(), format!("Question {}", id), format!("Answer {}", id))
  }

  fn ids(cards: &[&Card]) -> Vec<String> {
    cards.iter().map(|c| c.id.clone()).collect()
  }

  fn mixed_deck() -> Vec<Card> {
    vec![
      reviewed("1", 1.0, Some(now() - Duration::days(1))),
      reviewed("2", 3.0, Some(now() + Duration::days(2))),
      new_card("3"),
      reviewed("4", 1.0, Some(now())),
    ]
  }

  #[test]
  fn test_select_due_mixed_deck() {
    let cards = mixed_deck();
    let due = select_due(&cards, now());
    assert_eq!(ids(&due), vec!["1", "4", "3"]);
  }

  #[test]
  fn test_overdue_before_new() {
    let cards = mixed_deck();
    let due = select_due(&cards, now());

    let last_reviewed = due.iter().rposition(|c| !c.is_new()).unwrap();
    let first_new = due.iter().position(|c| c.is_new()).unwrap();
    assert!(last_reviewed < first_new);
  }

  #[test]
  fn test_nothing_due() {
    let cards = vec![reviewed("1", 3.0, Some(now() + Duration::days(3)))];
    assert!(select_due(&cards, now()).is_empty());
  }

  #[test]
  fn test_empty_input() {
    assert!(select_due(&[], now()).is_empty());
    assert_eq!(due_count(&[], now()), 0);
  }

  #[test]
  fn test_all_new_keeps_input_order() {
    let cards = vec![new_card("c"), new_card("a"), new_card("b")];
    let due = select_due(&cards, now());
    assert_eq!(ids(&due), vec!["c", "a", "b"]);
  }

  #[test]
  fn test_due_exactly_now_is_included() {
    let card = reviewed("1", 2.0, Some(now()));
    assert!(is_due(&card, now()));
    assert!(!is_due(&card, now() - Duration::seconds(1)));
  }

  #[test]
  fn test_sorted_most_overdue_first() {
    let cards = vec![
      reviewed("a", 1.0, Some(now() - Duration::hours(1))),
      reviewed("b", 1.0, Some(now() - Duration::days(10))),
      new_card("n"),
      reviewed("c", 1.0, Some(now() - Duration::days(3))),
    ];

    let due = select_due(&cards, now());
    assert_eq!(ids(&due), vec!["b", "c", "a", "n"]);

    let dates: Vec<_> = due.iter().filter(|c| !c.is_new()).map(|c| c.next_review).collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
  }

  #[test]
  fn test_equal_due_dates_keep_deck_order() {
    let when = Some(now() - Duration::days(1));
    let cards = vec![reviewed("x", 1.0, when), reviewed("y", 2.0, when), reviewed("z", 1.0, when)];
    let due = select_due(&cards, now());
    assert_eq!(ids(&due), vec!["x", "y", "z"]);
  }

  #[test]
  fn test_missing_next_review_is_most_overdue() {
    let cards = vec![
      reviewed("a", 1.0, Some(now() - Duration::days(30))),
      reviewed("broken", 4.0, None),
      new_card("n"),
    ];

    let due = select_due(&cards, now());
    assert_eq!(ids(&due), vec!["broken", "a", "n"]);
  }

  #[test]
  fn test_new_card_due_even_with_future_date() {
    let mut card = new_card("1");
    card.next_review = Some(now() + Duration::days(5));
    assert!(is_due(&card, now()));
  }

  #[test]
  fn test_returns_references_into_input() {
    let cards = mixed_deck();
    let due = select_due(&cards, now());
    assert!(std::ptr::eq(due[0], &cards[0]));
    assert!(std::ptr::eq(due[2], &cards[2]));
  }

  #[test]
  fn test_input_untouched() {
    let cards = mixed_deck();
    let before = cards.clone();
    let _ = select_due(&cards, now());
    assert_eq!(cards, before);
  }

  #[test]
  fn test_selection_matches_filter() {
    let cards = mixed_deck();
    let due = select_due(&cards, now());

    for card in &cards {
      let expected = card.is_new() || card.next_review.is_none_or(|n| n <= now());
      assert_eq!(due.iter().any(|c| c.id == card.id), expected, "card {}", card.id);
    }
    assert_eq!(due_count(&cards, now()), due.len());
  }
}
