use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::admin_only;
use crate::handlers::players;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(players::get_players).merge(admin_only(state, post(players::create_player))),
        )
        .route(
            "/:id",
            get(players::get_player)
                .merge(admin_only(state, put(players::update_player)))
                .merge(admin_only(state, delete(players::delete_player))),
        )
}
