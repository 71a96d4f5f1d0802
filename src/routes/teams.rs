use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::admin_only;
use crate::handlers::teams;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(teams::get_teams).merge(admin_only(state, post(teams::create_team))),
        )
        .route(
            "/:id",
            get(teams::get_team)
                .merge(admin_only(state, put(teams::update_team)))
                .merge(admin_only(state, delete(teams::delete_team))),
        )
}
