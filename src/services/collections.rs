use serde::Serialize;

use crate::models::{Movie, MovieId};

/// Whether a toggle added or removed the movie
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Removes the movie if a record with the same id is present, otherwise
/// appends it.
pub fn toggle(list: &mut Vec<Movie>, movie: &Movie) -> ToggleOutcome {
    if contains(list, &movie.id) {
        list.retain(|m| m.id != movie.id);
        ToggleOutcome::Removed
    } else {
        list.push(movie.clone());
        ToggleOutcome::Added
    }
}

pub fn contains(list: &[Movie], movie_id: &MovieId) -> bool {
    list.iter().any(|m| &m.id == movie_id)
}

/// Movies of one genre on the watched page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenreGroup {
    pub genre: String,
    pub movies: Vec<Movie>,
}

/// Groups movies under each of their genres. A movie appears once per genre
/// it carries; groups come out in first-seen order.
pub fn group_by_genre(movies: &[Movie]) -> Vec<GenreGroup> {
    let mut groups: Vec<GenreGroup> = Vec::new();

    for movie in movies {
        for genre in &movie.genre {
            let index = match groups.iter().position(|g| &g.genre == genre) {
                Some(index) => index,
                None => {
                    groups.push(GenreGroup {
                        genre: genre.clone(),
                        movies: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let group = &mut groups[index];
            if !contains(&group.movies, &movie.id) {
                group.movies.push(movie.clone());
            }
        }
    }

    groups
}
