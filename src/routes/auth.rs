use axum::{
    routing::{get, post},
    Router,
};

use super::authenticated;
use crate::handlers::auth;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/profile", authenticated(state, get(auth::get_profile)))
}
