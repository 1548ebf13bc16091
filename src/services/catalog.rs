use std::sync::OnceLock;

use crate::models::{Category, CategoryOption, Movie, MovieId};

/// Entries of the category bar, in display order
pub const CATEGORIES: [CategoryOption; 5] = [
    CategoryOption { id: "all", name: "All" },
    CategoryOption { id: "action", name: "Action" },
    CategoryOption { id: "drama", name: "Drama" },
    CategoryOption { id: "sci-fi", name: "Sci-Fi" },
    CategoryOption { id: "adventure", name: "Adventure" },
];

/// (id, title, poster, year, rating, genres)
type Entry = (
    &'static str,
    &'static str,
    &'static str,
    i32,
    f32,
    &'static [&'static str],
);

const ENTRIES: [Entry; 12] = [
    ("1", "Inception", "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?auto=format&fit=crop&q=80", 2010, 8.8, &["Action", "Sci-Fi"]),
    ("2", "The Matrix", "https://images.unsplash.com/photo-1536440136628-849c177e76a1?auto=format&fit=crop&q=80", 1999, 8.7, &["Action", "Sci-Fi"]),
    ("3", "Mad Max: Fury Road", "https://images.unsplash.com/photo-1492466245235-0d5b4c2c66d1?auto=format&fit=crop&q=80", 2015, 8.1, &["Action", "Adventure"]),
    ("4", "The Shawshank Redemption", "https://images.unsplash.com/photo-1509347528160-9a9e33742cdb?auto=format&fit=crop&q=80", 1994, 9.3, &["Drama"]),
    ("5", "The Godfather", "https://images.unsplash.com/photo-1485846234645-a62644f84728?auto=format&fit=crop&q=80", 1972, 9.2, &["Crime", "Drama"]),
    ("6", "Oppenheimer", "https://images.unsplash.com/photo-1440404653325-ab127d49abc1?auto=format&fit=crop&q=80", 2023, 8.9, &["Biography", "Drama", "History"]),
    ("7", "Blade Runner 2049", "https://images.unsplash.com/photo-1485846234645-a62644f84728?auto=format&fit=crop&q=80", 2017, 8.0, &["Sci-Fi", "Drama"]),
    ("8", "Interstellar", "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?auto=format&fit=crop&q=80", 2014, 8.6, &["Adventure", "Drama", "Sci-Fi"]),
    ("9", "Dune", "https://images.unsplash.com/photo-1534447677768-be436bb09401?auto=format&fit=crop&q=80", 2024, 8.5, &["Action", "Adventure", "Sci-Fi"]),
    ("10", "The Lord of the Rings", "https://images.unsplash.com/photo-1536440136628-849c177e76a1?auto=format&fit=crop&q=80", 2001, 8.8, &["Adventure", "Fantasy"]),
    ("11", "Avatar: The Way of Water", "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?auto=format&fit=crop&q=80", 2023, 8.0, &["Action", "Adventure", "Sci-Fi"]),
    ("12", "Indiana Jones", "https://images.unsplash.com/photo-1492466245235-0d5b4c2c66d1?auto=format&fit=crop&q=80", 1981, 8.4, &["Action", "Adventure"]),
];

/// The fixed movie catalog, immutable for the life of the process
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Builds a catalog from arbitrary records, keeping their order
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// The compiled-in catalog
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::new(
                ENTRIES
                    .iter()
                    .map(|(id, title, poster, year, rating, genre)| Movie {
                        id: MovieId::from(*id),
                        title: title.to_string(),
                        poster: poster.to_string(),
                        year: *year,
                        rating: *rating,
                        genre: genre.iter().map(|g| g.to_string()).collect(),
                    })
                    .collect(),
            )
        })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, movie_id: &MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| &m.id == movie_id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Narrows the catalog to movies of the given category, preserving order.
///
/// `Category::All` returns every movie. Unknown categories yield nothing.
pub fn filter_by_category(catalog: &[Movie], category: &Category) -> Vec<Movie> {
    match category {
        Category::All => catalog.to_vec(),
        Category::Genre(label) => catalog
            .iter()
            .filter(|movie| movie.in_category(label))
            .cloned()
            .collect(),
    }
}
