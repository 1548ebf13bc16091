use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a catalog movie (e.g. "1".."12")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A movie record as shown on a card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Unique identifier within the catalog
    pub id: MovieId,
    pub title: String,
    /// Poster image URL
    pub poster: String,
    /// Release year
    pub year: i32,
    /// Rating on a 0-10 scale
    pub rating: f32,
    /// Genre labels in display order; never empty
    pub genre: Vec<String>,
}

impl Movie {
    /// Exact genre membership, as used when comparing movies with each other
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.iter().any(|g| g == genre)
    }

    /// Case-insensitive genre membership, as used by the category filter
    pub fn in_category(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.genre.iter().any(|g| g.to_lowercase() == label)
    }

    /// Whether this movie shares at least one genre label with `other`
    pub fn shares_genre_with(&self, other: &Movie) -> bool {
        self.genre.iter().any(|g| other.has_genre(g))
    }
}
