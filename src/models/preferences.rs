use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::MovieId;

/// A user's signal on a single movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Liked,
    Disliked,
}

/// Like/dislike signals keyed by movie id.
///
/// A movie holds at most one reaction, so it can never be both liked and
/// disliked. Ids are not checked against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceState {
    reactions: BTreeMap<MovieId, Reaction>,
}

/// Wire view of a [`PreferenceState`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferenceSummary {
    pub liked: Vec<MovieId>,
    pub disliked: Vec<MovieId>,
}

impl PreferenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a movie as liked, replacing any dislike
    pub fn like(&mut self, movie_id: MovieId) {
        self.reactions.insert(movie_id, Reaction::Liked);
    }

    /// Marks a movie as disliked, replacing any like
    pub fn dislike(&mut self, movie_id: MovieId) {
        self.reactions.insert(movie_id, Reaction::Disliked);
    }

    pub fn reaction(&self, movie_id: &MovieId) -> Option<Reaction> {
        self.reactions.get(movie_id).copied()
    }

    pub fn is_liked(&self, movie_id: &MovieId) -> bool {
        self.reaction(movie_id) == Some(Reaction::Liked)
    }

    pub fn is_disliked(&self, movie_id: &MovieId) -> bool {
        self.reaction(movie_id) == Some(Reaction::Disliked)
    }

    pub fn liked(&self) -> impl Iterator<Item = &MovieId> {
        self.with_reaction(Reaction::Liked)
    }

    pub fn disliked(&self) -> impl Iterator<Item = &MovieId> {
        self.with_reaction(Reaction::Disliked)
    }

    fn with_reaction(&self, wanted: Reaction) -> impl Iterator<Item = &MovieId> {
        self.reactions
            .iter()
            .filter(move |(_, reaction)| **reaction == wanted)
            .map(|(id, _)| id)
    }

    pub fn summary(&self) -> PreferenceSummary {
        PreferenceSummary {
            liked: self.liked().cloned().collect(),
            disliked: self.disliked().cloned().collect(),
        }
    }
}
