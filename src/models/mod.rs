mod category;
mod movie;
mod preferences;
mod section;
mod user;

pub use category::{Category, CategoryOption};
pub use movie::{Movie, MovieId};
pub use preferences::{PreferenceState, PreferenceSummary, Reaction};
pub use section::{DerivedSections, Section, SectionKind};
pub use user::{LoginRequest, LoginResponse, MessageResponse, SignupRequest, User, UserProfile};
