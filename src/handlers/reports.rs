use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use super::parse_id;
use crate::dtos::match_dtos::TopScorersQuery;
use crate::dtos::{ApiResponse, PaginationQuery};
use crate::errors::Result;
use crate::models::goal::TopScorer;
use crate::models::report::MatchReport;
use crate::state::AppState;

pub async fn get_match_reports(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<MatchReport>>>> {
    let pagination = query.pagination();
    let page = state.reports.get_all_match_reports(pagination).await?;
    Ok(Json(ApiResponse::paginated("Match reports retrieved successfully", page, pagination)))
}

pub async fn get_match_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MatchReport>>> {
    let report = state.reports.get_match_report(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Match report retrieved successfully", report)))
}

pub async fn get_top_scorers(
    State(state): State<AppState>,
    Query(query): Query<TopScorersQuery>,
) -> Result<Json<ApiResponse<Vec<TopScorer>>>> {
    let scorers = state.reports.get_top_scorers(query.limit).await?;
    Ok(Json(ApiResponse::ok("Top scorers retrieved successfully", scorers)))
}

pub async fn get_completed_matches(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<MatchReport>>>> {
    let pagination = query.pagination();
    let page = state.reports.get_completed_matches(pagination).await?;
    Ok(Json(ApiResponse::paginated("Completed matches retrieved successfully", page, pagination)))
}
