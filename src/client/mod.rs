//! Client side of the app: the account service client, local flag storage
//! and the screen state machine that ties them to a browsing [`Library`].
//!
//! [`Library`]: crate::services::Library

pub mod auth_client;
pub mod flags;
pub mod shell;

pub use auth_client::{AuthClientError, AuthOutcome, AuthProvider, Credentials, HttpAuthClient};
pub use flags::{FlagStore, MemoryFlags};
pub use shell::{AppShell, AuthForm, AuthMode, Page, Screen};
