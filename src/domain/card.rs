use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Self-reported recall difficulty for a reviewed card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Hard,
  Medium,
  Easy,
}

impl Difficulty {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Hard => "hard",
      Self::Medium => "medium",
      Self::Easy => "easy",
    }
  }

  /// Map a study-prompt key (1 = hard, 2 = medium, 3 = easy)
  pub fn from_key(key: &str) -> Option<Self> {
    match key {
      "1" => Some(Self::Hard),
      "2" => Some(Self::Medium),
      "3" => Some(Self::Easy),
      _ => None,
    }
  }

  /// Hard resets the interval, so it does not count as a correct answer
  pub fn is_correct(&self) -> bool {
    !matches!(self, Self::Hard)
  }
}

impl std::fmt::Display for Difficulty {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for Difficulty {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "hard" => Ok(Self::Hard),
      "medium" => Ok(Self::Medium),
      "easy" => Ok(Self::Easy),
      _ => Err(format!("Invalid difficulty: {}", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
  pub id: String,
  pub front: String,
  pub back: String,
  /// Days between the last two reviews; 0 means never reviewed
  pub interval: f64,
  #[serde(with = "iso_millis")]
  pub last_reviewed: Option<DateTime<Utc>>,
  /// None means due immediately
  #[serde(with = "iso_millis")]
  pub next_review: Option<DateTime<Utc>>,
}

impl Card {
  pub fn new(id: String, front: String, back: String) -> Self {
    Self {
      id,
      front,
      back,
      interval: 0.0,
      last_reviewed: None,
      next_review: None,
    }
  }

  /// True until the card completes its first review
  pub fn is_new(&self) -> bool {
    self.interval == 0.0
  }
}

/// Optional instants written as `2024-01-15T12:00:00.000Z`, which is the
/// format existing deck files use. Any RFC 3339 instant is accepted on read.
pub(crate) mod iso_millis {
  use chrono::{DateTime, SecondsFormat, Utc};
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match value {
      Some(dt) => serializer.serialize_some(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw
      .map(|s| {
        DateTime::parse_from_rfc3339(&s)
          .map(|dt| dt.with_timezone(&Utc))
          .map_err(serde::de::Error::custom)
      })
      .transpose()
  }

  /// Non-optional variant for deck-level timestamps
  pub mod required {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
      S: Serializer,
    {
      serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
      D: Deserializer<'de>,
    {
      let raw = String::deserialize(deserializer)?;
      DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
    }
  }
}
