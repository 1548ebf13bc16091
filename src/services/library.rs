use crate::models::{Category, Movie, MovieId, PreferenceState, Reaction, Section};

use super::catalog::{filter_by_category, Catalog};
use super::collections::{self, GenreGroup, ToggleOutcome};
use super::sections::derive_sections;

/// Per-user browsing state: reactions, the active category and the
/// wishlist/watched lists. Starts empty and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    pub preferences: PreferenceState,
    pub active_category: Category,
    pub wishlist: Vec<Movie>,
    pub watched: Vec<Movie>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn like(&mut self, movie_id: MovieId) {
        tracing::debug!(movie_id = %movie_id, "Movie liked");
        self.preferences.like(movie_id);
    }

    pub fn dislike(&mut self, movie_id: MovieId) {
        tracing::debug!(movie_id = %movie_id, "Movie disliked");
        self.preferences.dislike(movie_id);
    }

    pub fn react(&mut self, movie_id: MovieId, reaction: Reaction) {
        match reaction {
            Reaction::Liked => self.like(movie_id),
            Reaction::Disliked => self.dislike(movie_id),
        }
    }

    pub fn set_category(&mut self, category: Category) {
        tracing::debug!(category = %category, "Active category changed");
        self.active_category = category;
    }

    pub fn toggle_wishlist(&mut self, movie: &Movie) -> ToggleOutcome {
        let outcome = collections::toggle(&mut self.wishlist, movie);
        tracing::debug!(movie_id = %movie.id, outcome = ?outcome, "Wishlist toggled");
        outcome
    }

    pub fn toggle_watched(&mut self, movie: &Movie) -> ToggleOutcome {
        let outcome = collections::toggle(&mut self.watched, movie);
        tracing::debug!(movie_id = %movie.id, outcome = ?outcome, "Watched list toggled");
        outcome
    }

    pub fn is_wishlisted(&self, movie_id: &MovieId) -> bool {
        collections::contains(&self.wishlist, movie_id)
    }

    /// The catalog narrowed to the active category
    pub fn visible_movies(&self, catalog: &Catalog) -> Vec<Movie> {
        filter_by_category(catalog.movies(), &self.active_category)
    }

    /// Non-empty home view sections for the current state
    pub fn sections(&self, catalog: &Catalog) -> Vec<Section> {
        let filtered = self.visible_movies(catalog);
        derive_sections(&filtered, &self.preferences).into_display()
    }

    pub fn wishlist_by_genre(&self) -> Vec<GenreGroup> {
        collections::group_by_genre(&self.wishlist)
    }

    pub fn watched_by_genre(&self) -> Vec<GenreGroup> {
        collections::group_by_genre(&self.watched)
    }
}
