use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use super::parse_id;
use crate::dtos::match_dtos::{MatchListQuery, MatchRequest, RecordResultBody};
use crate::dtos::ApiResponse;
use crate::errors::Result;
use crate::models::matches::{Match, MatchDetails};
use crate::state::AppState;

pub async fn create_match(
    State(state): State<AppState>,
    Json(payload): Json<MatchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Match>>)> {
    payload.validate()?;
    tracing::info!(
        "POST /matches: {} vs {} on {}",
        payload.home_team_id,
        payload.away_team_id,
        payload.match_date
    );

    let fixture = state.matches.create(payload.into_create()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("Match created successfully", fixture))))
}

pub async fn get_matches(
    State(state): State<AppState>,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<ApiResponse<Vec<Match>>>> {
    let filter = query.filter()?;
    let pagination = query.pagination();
    tracing::debug!("GET /matches with {:?} page {}", filter, pagination.page);

    let page = state.matches.list(filter, pagination).await?;
    Ok(Json(ApiResponse::paginated("Matches retrieved successfully", page, pagination)))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MatchDetails>>> {
    let details = state.matches.get_by_id_with_details(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Match retrieved successfully", details)))
}

pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<ApiResponse<Match>>> {
    payload.validate()?;
    let id = parse_id(&id)?;
    tracing::info!("PUT /matches/{}", id);

    let fixture = state.matches.update(id, payload.into_update()?).await?;
    Ok(Json(ApiResponse::ok("Match updated successfully", fixture)))
}

pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    tracing::info!("DELETE /matches/{}", id);

    state.matches.delete(id).await?;
    Ok(Json(ApiResponse::ok("Match deleted successfully", ())))
}

pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RecordResultBody>,
) -> Result<Json<ApiResponse<MatchDetails>>> {
    payload.validate()?;
    let id = parse_id(&id)?;
    tracing::info!(
        "POST /matches/{}/result: {}-{} with {} goals",
        id,
        payload.home_score,
        payload.away_score,
        payload.goals.len()
    );

    let details = state.matches.record_result(id, payload.into()).await?;
    Ok(Json(ApiResponse::ok("Match result recorded successfully", details)))
}
