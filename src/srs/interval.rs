use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::domain::{Card, Difficulty};

/// Interval given to a card after its first review, or after a Hard rating
pub const RESET_INTERVAL: f64 = 1.0;

pub const MEDIUM_MULTIPLIER: f64 = 1.5;
pub const EASY_MULTIPLIER: f64 = 2.5;

/// Next interval in days. Fractional results are kept as-is and compound
/// across reviews.
pub fn compute_next_interval(current_interval: f64, difficulty: Difficulty) -> f64 {
  if current_interval == 0.0 {
    return RESET_INTERVAL;
  }

  match difficulty {
    Difficulty::Hard => RESET_INTERVAL,
    Difficulty::Medium => current_interval * MEDIUM_MULTIPLIER,
    Difficulty::Easy => current_interval * EASY_MULTIPLIER,
  }
}

/// Last instant a deck file can store: RFC 3339 years have four digits
pub fn latest_review_date() -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
    .single()
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Stamp a copy of `card` as reviewed at `now` and due `new_interval` days later.
///
/// Only whole days move the due date (time of day is preserved); the
/// fractional part stays in `interval` for the next multiplication. Due dates
/// clamp to [`latest_review_date`].
pub fn apply_schedule(card: &Card, new_interval: f64, now: DateTime<Utc>) -> Card {
  let latest = latest_review_date();
  let next_review = TimeDelta::try_days(new_interval.trunc() as i64)
    .and_then(|days| now.checked_add_signed(days))
    .map_or(latest, |due| due.min(latest));

  Card {
    interval: new_interval,
    last_reviewed: Some(now),
    next_review: Some(next_review),
    ..card.clone()
  }
}

/// Reschedule a card after the user rated it
pub fn update_card_after_review(card: &Card, difficulty: Difficulty, now: DateTime<Utc>) -> Card {
  let new_interval = compute_next_interval(card.interval, difficulty);
  tracing::debug!(
    card_id = %card.id,
    %difficulty,
    old_interval = card.interval,
    new_interval,
    "Rescheduled card"
  );
  apply_schedule(card, new_interval, now)
}
