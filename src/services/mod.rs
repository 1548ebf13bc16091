pub mod auth;
pub mod catalog;
pub mod collections;
pub mod library;
pub mod sections;

pub use auth::{AuthService, InMemoryUserStore, UserStore};
pub use catalog::{filter_by_category, Catalog, CATEGORIES};
pub use collections::{GenreGroup, ToggleOutcome};
pub use library::Library;
pub use sections::derive_sections;
