use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Movie identifier as sent by clients
///
/// The catalog uses integer ids, but clients are not consistent about sending
/// them as JSON numbers, so both shapes are accepted and kept distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

impl MovieId {
    /// Compares ids by their string form, so `101` and `"101"` match.
    ///
    /// Strict comparison is the derived `PartialEq`, under which they do not.
    pub fn matches_loosely(&self, other: &MovieId) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieId::Number(id) => write!(f, "{}", id),
            MovieId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        MovieId::Number(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        MovieId::Text(id.to_string())
    }
}

/// Point-in-time copy of catalog metadata stored in a watchlist
///
/// Every optional field is filled with its default on the way in, so a stored
/// snapshot never has missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSnapshot {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub backdrop_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub poster_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    #[serde(default = "default_media_type", deserialize_with = "null_as_media_type")]
    pub media_type: String,
}

impl MovieSnapshot {
    /// Creates a snapshot with only an id; every other field takes its default
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: String::new(),
            name: String::new(),
            overview: String::new(),
            backdrop_path: String::new(),
            poster_path: String::new(),
            vote_average: 0.0,
            release_date: String::new(),
            adult: false,
            media_type: default_media_type(),
        }
    }
}

fn default_media_type() -> String {
    "movie".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_media_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_media_type))
}
