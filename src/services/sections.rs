use std::collections::HashMap;

use crate::models::{DerivedSections, Movie, PreferenceState};

/// Minimum rating for the trending row
pub const TRENDING_MIN_RATING: f32 = 8.5;
/// Minimum rating for the rating clause of the personalized row
pub const PERSONALIZED_MIN_RATING: f32 = 8.0;
/// First release year counted as a new release
pub const NEW_RELEASE_MIN_YEAR: i32 = 2023;
/// How often a genre must occur among liked movies to count as a favourite
const FAVOURITE_GENRE_MIN_COUNT: usize = 2;

/// Derives the home view sections from the category-filtered catalog.
///
/// Pure function of its inputs. Every rule preserves the order of `filtered`
/// and only liked movies that are themselves in `filtered` are considered.
pub fn derive_sections(filtered: &[Movie], preferences: &PreferenceState) -> DerivedSections {
    let liked: Vec<&Movie> = filtered
        .iter()
        .filter(|m| preferences.is_liked(&m.id))
        .collect();

    DerivedSections {
        trending: trending(filtered),
        personalized: personalized(filtered, &liked, preferences),
        recommended: recommended(filtered, &liked, preferences),
        new_releases: new_releases(filtered),
    }
}

fn trending(filtered: &[Movie]) -> Vec<Movie> {
    filtered
        .iter()
        .filter(|m| m.rating >= TRENDING_MIN_RATING)
        .cloned()
        .collect()
}

/// Liked movies plus every movie sharing a genre with one of them
fn recommended(filtered: &[Movie], liked: &[&Movie], preferences: &PreferenceState) -> Vec<Movie> {
    filtered
        .iter()
        .filter(|m| preferences.is_liked(&m.id) || liked.iter().any(|l| m.shares_genre_with(l)))
        .cloned()
        .collect()
}

/// Movies in a genre that recurs among liked movies, or any unliked movie
/// rated at least 8.0.
///
/// The rating clause admits most of the catalog on its own; that breadth is
/// kept as is.
fn personalized(
    filtered: &[Movie],
    liked: &[&Movie],
    preferences: &PreferenceState,
) -> Vec<Movie> {
    let mut genre_counts: HashMap<&str, usize> = HashMap::new();
    for genre in liked.iter().flat_map(|m| m.genre.iter()) {
        *genre_counts.entry(genre.as_str()).or_default() += 1;
    }

    filtered
        .iter()
        .filter(|m| {
            let favourite_genre = m.genre.iter().any(|g| {
                genre_counts.get(g.as_str()).copied().unwrap_or(0) >= FAVOURITE_GENRE_MIN_COUNT
            });
            let well_rated = m.rating >= PERSONALIZED_MIN_RATING && !preferences.is_liked(&m.id);
            favourite_genre || well_rated
        })
        .cloned()
        .collect()
}

fn new_releases(filtered: &[Movie]) -> Vec<Movie> {
    filtered
        .iter()
        .filter(|m| m.year >= NEW_RELEASE_MIN_YEAR)
        .cloned()
        .collect()
}
