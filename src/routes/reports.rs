use axum::{routing::get, Router};

use crate::handlers::reports;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches", get(reports::get_match_reports))
        .route("/matches/:id", get(reports::get_match_report))
        .route("/top-scorers", get(reports::get_top_scorers))
        .route("/completed-matches", get(reports::get_completed_matches))
}
