pub mod auth;
pub mod matches;
pub mod players;
pub mod reports;
pub mod teams;

use axum::{middleware, routing::MethodRouter};

use crate::middleware::auth::{require_admin, require_auth};
use crate::state::AppState;

/// Restricts a method router to admin bearer tokens.
pub(crate) fn admin_only(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
}

pub(crate) fn authenticated(state: &AppState, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
