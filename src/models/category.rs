use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// The genre filter applied to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    /// No filtering
    #[default]
    All,
    /// Movies carrying this genre label, compared case-insensitively
    Genre(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Category::All
        } else {
            Category::Genre(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Category::All)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::All => write!(f, "all"),
            Category::Genre(label) => write!(f, "{}", label),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::parse(&raw))
    }
}

/// A selectable entry of the category bar
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: &'static str,
    pub name: &'static str,
}
