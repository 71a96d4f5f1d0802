use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::admin_only;
use crate::handlers::matches;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(matches::get_matches).merge(admin_only(state, post(matches::create_match))),
        )
        .route(
            "/:id",
            get(matches::get_match)
                .merge(admin_only(state, put(matches::update_match)))
                .merge(admin_only(state, delete(matches::delete_match))),
        )
        .route("/:id/result", admin_only(state, post(matches::record_result)))
}
