use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::UserProfile;
use crate::services::{AuthService, Catalog, Library};

/// Browsing state of one logged-in user
#[derive(Debug, Clone)]
pub struct BrowsingSession {
    pub user: UserProfile,
    pub library: Library,
    pub opened_at: DateTime<Utc>,
    /// Refreshed on every request that touches the session
    pub last_seen: DateTime<Utc>,
}

impl BrowsingSession {
    fn new(user: UserProfile, now: DateTime<Utc>) -> Self {
        Self {
            user,
            library: Library::new(),
            opened_at: now,
            last_seen: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen > ttl
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: &'static Catalog,
    pub auth: AuthService,
    /// Idle time after which a session is dropped
    pub session_ttl: Duration,
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
#[derive(Default)]
pub struct AppStateInner {
    pub sessions: HashMap<Uuid, BrowsingSession>,
}

impl AppStateInner {
    /// Drops sessions idle for longer than `ttl`, returning how many went
    fn evict_expired(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(now, ttl));
        before - self.sessions.len()
    }

    fn live_session(
        &mut self,
        id: Uuid,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> AppResult<&mut BrowsingSession> {
        if self
            .sessions
            .get(&id)
            .is_some_and(|session| session.is_expired(now, ttl))
        {
            self.sessions.remove(&id);
            tracing::info!(session_id = %id, "Session expired");
        }

        let session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| session_not_found(id))?;
        session.last_seen = now;
        Ok(session)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Built-in catalog, in-memory accounts, no sessions
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_auth(AuthService::in_memory(), config.session_ttl())
    }

    pub fn with_auth(auth: AuthService, session_ttl: Duration) -> Self {
        Self {
            catalog: Catalog::builtin(),
            auth,
            session_ttl,
            inner: Arc::new(RwLock::new(AppStateInner::default())),
        }
    }

    /// Starts a fresh browsing session for the user. Any earlier session of
    /// the same account is replaced, and idle sessions are evicted.
    pub async fn open_session(&self, user: UserProfile) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();

        let mut inner = self.inner.write().await;
        let expired = inner.evict_expired(now, self.session_ttl);
        let before = inner.sessions.len();
        inner.sessions.retain(|_, session| session.user.email != user.email);
        let replaced = before - inner.sessions.len();

        inner.sessions.insert(id, BrowsingSession::new(user, now));
        tracing::info!(
            session_id = %id,
            replaced,
            expired,
            active_sessions = inner.sessions.len(),
            "Session opened"
        );
        id
    }

    /// Drops a session; `false` if it did not exist
    pub async fn close_session(&self, id: Uuid) -> bool {
        let removed = self.inner.write().await.sessions.remove(&id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    /// Runs `f` against a live session
    pub async fn read_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&BrowsingSession) -> T,
    ) -> AppResult<T> {
        let mut inner = self.inner.write().await;
        let session = inner.live_session(id, Utc::now(), self.session_ttl)?;
        Ok(f(session))
    }

    /// Runs `f` against a live session with mutable access
    pub async fn update_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut BrowsingSession) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut inner = self.inner.write().await;
        let session = inner.live_session(id, Utc::now(), self.session_ttl)?;
        f(session)
    }

    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session not found: {}", id))
}
