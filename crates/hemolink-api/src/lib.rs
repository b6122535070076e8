//! Hemolink — Axum HTTP API.
//!
//! Thin HTTP shell over the bounded contexts: each route deserializes a
//! request body, builds a command with a fresh correlation id, and calls
//! the context's handler against the repositories in [`state::AppState`].

use axum::Router;

pub mod error;
pub mod routes;
pub mod state;

/// Builds the full application router. The same route structure serves
/// production and integration tests.
pub fn build_router(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/donors", routes::donors::router())
        .nest("/api/v1/addresses", routes::addresses::router())
        .nest("/api/v1/requests", routes::requests::router())
        .nest("/api/v1/matches", routes::matches::router())
        .nest("/api/v1/appointments", routes::appointments::router())
        .nest("/api/v1/posts", routes::posts::router())
        .with_state(app_state)
}
