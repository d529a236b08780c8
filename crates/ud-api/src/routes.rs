//! API routes

use axum::{
    routing::{get, put},
    Router,
};

use crate::extractors::AppState;
use crate::handlers::users;

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/v1/api/users", users_router())
}

fn users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/:id", put(users::update_user).delete(users::delete_user))
}
