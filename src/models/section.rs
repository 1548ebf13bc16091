use serde::{Deserialize, Serialize};

use super::Movie;

/// The named rows of the home view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Trending,
    Personalized,
    Recommended,
    NewReleases,
}

impl SectionKind {
    /// Display order on the home view
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Trending,
        SectionKind::Personalized,
        SectionKind::Recommended,
        SectionKind::NewReleases,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Trending => "Trending Now",
            SectionKind::Personalized => "Personalized For You",
            SectionKind::Recommended => "Recommended for You",
            SectionKind::NewReleases => "New Releases",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            SectionKind::Trending => "Most watched movies this week",
            SectionKind::Personalized => "Curated based on your taste and preferences",
            SectionKind::Recommended => "Based on your watching history",
            SectionKind::NewReleases => "Fresh from the cinema",
        }
    }
}

/// A non-empty section ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub subtitle: String,
    pub movies: Vec<Movie>,
}

/// The four subsets derived from the filtered catalog. Never stored;
/// recomputed from the current inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedSections {
    pub trending: Vec<Movie>,
    pub personalized: Vec<Movie>,
    pub recommended: Vec<Movie>,
    pub new_releases: Vec<Movie>,
}

impl DerivedSections {
    pub fn get(&self, kind: SectionKind) -> &[Movie] {
        match kind {
            SectionKind::Trending => &self.trending,
            SectionKind::Personalized => &self.personalized,
            SectionKind::Recommended => &self.recommended,
            SectionKind::NewReleases => &self.new_releases,
        }
    }

    /// Sections in display order, skipping empty ones
    pub fn into_display(self) -> Vec<Section> {
        SectionKind::ALL
            .into_iter()
            .filter(|kind| !self.get(*kind).is_empty())
            .map(|kind| Section {
                kind,
                title: kind.title().to_string(),
                subtitle: kind.subtitle().to_string(),
                movies: self.get(kind).to_vec(),
            })
            .collect()
    }
}
