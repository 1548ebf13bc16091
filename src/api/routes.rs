use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Accounts
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// Catalog and session routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/categories", get(handlers::get_categories))
        .route("/movies", get(handlers::get_movies))
        // Browsing sessions
        .route("/sessions/:session_id", delete(handlers::sign_out))
        .route("/sessions/:session_id/profile", get(handlers::get_profile))
        .route("/sessions/:session_id/sections", get(handlers::get_sections))
        .route("/sessions/:session_id/category", put(handlers::set_category))
        .route("/sessions/:session_id/preferences", get(handlers::get_preferences))
        .route(
            "/sessions/:session_id/movies/:movie_id/like",
            post(handlers::like_movie),
        )
        .route(
            "/sessions/:session_id/movies/:movie_id/dislike",
            post(handlers::dislike_movie),
        )
        .route("/sessions/:session_id/wishlist", get(handlers::get_wishlist))
        .route(
            "/sessions/:session_id/wishlist/:movie_id",
            post(handlers::toggle_wishlist),
        )
        .route("/sessions/:session_id/watched", get(handlers::get_watched))
        .route(
            "/sessions/:session_id/watched/:movie_id",
            post(handlers::toggle_watched),
        )
}
