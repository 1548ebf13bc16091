use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    Category, CategoryOption, LoginRequest, LoginResponse, MessageResponse, Movie, MovieId,
    PreferenceSummary, Reaction, Section, SignupRequest, UserProfile,
};
use crate::services::{auth, filter_by_category, GenreGroup, ToggleOutcome, CATEGORIES};

use super::extract::{AppJson, AppPath, AppQuery};
use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetCategoryRequest {
    pub category: Category,
}

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub category: Category,
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub movie_id: MovieId,
    pub outcome: ToggleOutcome,
    pub movies: Vec<Movie>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Register a new account
pub async fn signup(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    tracing::info!(request_id = %request_id, email = %request.email, "Processing signup");
    let response = state.auth.signup(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticate and open a browsing session
pub async fn login(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    tracing::info!(request_id = %request_id, email = %request.email, "Processing login");
    let user = state.auth.login(request).await?;
    let session_id = state.open_session(user.clone()).await;

    Ok(Json(LoginResponse {
        message: auth::LOGIN_OK.to_string(),
        user,
        session_id: Some(session_id),
    }))
}

/// Get the category bar entries
pub async fn get_categories() -> Json<Vec<CategoryOption>> {
    Json(CATEGORIES.to_vec())
}

/// Get the catalog, optionally narrowed to a category
pub async fn get_movies(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<MoviesQuery>,
) -> Json<Vec<Movie>> {
    let category = query
        .category
        .as_deref()
        .map(Category::parse)
        .unwrap_or_default();
    Json(filter_by_category(state.catalog.movies(), &category))
}

/// Get the non-empty home sections of a session
pub async fn get_sections(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<Json<SectionsResponse>> {
    let catalog = state.catalog;
    let response = state
        .read_session(session_id, |session| SectionsResponse {
            category: session.library.active_category.clone(),
            sections: session.library.sections(catalog),
        })
        .await?;
    Ok(Json(response))
}

/// Switch the active category and return the recomputed sections
pub async fn set_category(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
    AppJson(request): AppJson<SetCategoryRequest>,
) -> AppResult<Json<SectionsResponse>> {
    let catalog = state.catalog;
    let response = state
        .update_session(session_id, |session| {
            session.library.set_category(request.category);
            Ok(SectionsResponse {
                category: session.library.active_category.clone(),
                sections: session.library.sections(catalog),
            })
        })
        .await?;
    Ok(Json(response))
}

async fn react(
    state: &AppState,
    session_id: Uuid,
    movie_id: String,
    reaction: Reaction,
) -> AppResult<Json<PreferenceSummary>> {
    let summary = state
        .update_session(session_id, |session| {
            session.library.react(MovieId::new(movie_id), reaction);
            Ok(session.library.preferences.summary())
        })
        .await?;

    tracing::info!(
        session_id = %session_id,
        reaction = ?reaction,
        liked = summary.liked.len(),
        disliked = summary.disliked.len(),
        "Preference recorded"
    );
    Ok(Json(summary))
}

/// Like a movie. The id is not checked against the catalog.
pub async fn like_movie(
    State(state): State<AppState>,
    AppPath((session_id, movie_id)): AppPath<(Uuid, String)>,
) -> AppResult<Json<PreferenceSummary>> {
    react(&state, session_id, movie_id, Reaction::Liked).await
}

/// Dislike a movie. The id is not checked against the catalog.
pub async fn dislike_movie(
    State(state): State<AppState>,
    AppPath((session_id, movie_id)): AppPath<(Uuid, String)>,
) -> AppResult<Json<PreferenceSummary>> {
    react(&state, session_id, movie_id, Reaction::Disliked).await
}

pub async fn get_preferences(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<Json<PreferenceSummary>> {
    let summary = state
        .read_session(session_id, |session| session.library.preferences.summary())
        .await?;
    Ok(Json(summary))
}

#[derive(Clone, Copy)]
enum MovieList {
    Wishlist,
    Watched,
}

async fn toggle_list(
    state: &AppState,
    session_id: Uuid,
    movie_id: String,
    list: MovieList,
) -> AppResult<Json<ToggleResponse>> {
    let movie_id = MovieId::new(movie_id);
    let movie = state
        .catalog
        .get(&movie_id)
        .ok_or_else(|| AppError::NotFound(format!("Movie not found: {}", movie_id)))?;

    let response = state
        .update_session(session_id, |session| {
            let library = &mut session.library;
            let (outcome, movies) = match list {
                MovieList::Wishlist => (library.toggle_wishlist(movie), &library.wishlist),
                MovieList::Watched => (library.toggle_watched(movie), &library.watched),
            };
            Ok(ToggleResponse {
                movie_id: movie_id.clone(),
                outcome,
                movies: movies.clone(),
            })
        })
        .await?;

    tracing::info!(
        session_id = %session_id,
        movie_id = %movie_id,
        outcome = ?response.outcome,
        "List toggled"
    );
    Ok(Json(response))
}

/// Add the movie to the wishlist, or remove it if already there
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    AppPath((session_id, movie_id)): AppPath<(Uuid, String)>,
) -> AppResult<Json<ToggleResponse>> {
    toggle_list(&state, session_id, movie_id, MovieList::Wishlist).await
}

/// Get wishlisted movies grouped by genre
pub async fn get_wishlist(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<Json<Vec<GenreGroup>>> {
    let groups = state
        .read_session(session_id, |session| session.library.wishlist_by_genre())
        .await?;
    Ok(Json(groups))
}

/// Add the movie to the watched list, or remove it if already there
pub async fn toggle_watched(
    State(state): State<AppState>,
    AppPath((session_id, movie_id)): AppPath<(Uuid, String)>,
) -> AppResult<Json<ToggleResponse>> {
    toggle_list(&state, session_id, movie_id, MovieList::Watched).await
}

/// Get watched movies grouped by genre
pub async fn get_watched(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<Json<Vec<GenreGroup>>> {
    let groups = state
        .read_session(session_id, |session| session.library.watched_by_genre())
        .await?;
    Ok(Json(groups))
}

pub async fn get_profile(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .read_session(session_id, |session| session.user.clone())
        .await?;
    Ok(Json(user))
}

/// Sign out, discarding the session's browsing state
pub async fn sign_out(
    State(state): State<AppState>,
    AppPath(session_id): AppPath<Uuid>,
) -> AppResult<StatusCode> {
    if state.close_session(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "Session not found: {}",
            session_id
        )))
    }
}
