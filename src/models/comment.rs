use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::BookId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> CommentId {
        CommentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Star rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const MAX: Rating = Rating(5);

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::MIN
    }
}

impl TryFrom<u8> for Rating {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Rating::MIN.0..=Rating::MAX.0).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(anyhow::anyhow!("rating must be between 1 and 5, got {}", value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads whatever the store holds under `rate`. Numbers and numeric strings
/// come back as they are, even outside `1..=5`; anything else is `None`.
fn lenient_rate<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// A stored review. Decoded leniently so one malformed entry from the
/// shared store never hides the others.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: CommentId,
    #[serde(default)]
    pub comment: String,
    #[serde(default, deserialize_with = "lenient_rate")]
    pub rate: Option<i64>,
    #[serde(rename = "elementId", default)]
    pub book_id: Option<BookId>,
}

impl Comment {
    pub fn rate_label(&self) -> String {
        match self.rate {
            Some(rate) => rate.to_string(),
            None => String::from("?"),
        }
    }
}

/// Unsaved review form state. Serializes to the store's create payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Draft {
    #[serde(rename = "comment")]
    pub body: String,
    #[serde(rename = "rate")]
    pub rating: Rating,
    #[serde(rename = "elementId")]
    pub book_id: BookId,
}

impl Draft {
    pub fn empty(book_id: BookId) -> Draft {
        Draft {
            body: String::new(),
            rating: Rating::default(),
            book_id,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}
