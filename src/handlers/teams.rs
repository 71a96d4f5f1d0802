use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use super::parse_id;
use crate::dtos::team_dtos::{TeamListQuery, TeamRequest};
use crate::dtos::ApiResponse;
use crate::errors::Result;
use crate::models::team::{Team, TeamDetails};
use crate::state::AppState;

pub async fn create_team(
    State(state): State<AppState>,
    Json(payload): Json<TeamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Team>>)> {
    payload.validate()?;
    tracing::info!("POST /teams: {}", payload.name);

    let team = state.teams.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("Team created successfully", team))))
}

pub async fn get_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamListQuery>,
) -> Result<Json<ApiResponse<Vec<Team>>>> {
    tracing::debug!("GET /teams with {:?}", query);
    let pagination = query.pagination();

    let page = state.teams.list(query.search.as_deref(), pagination).await?;
    Ok(Json(ApiResponse::paginated("Teams retrieved successfully", page, pagination)))
}

/// Includes the active squad.
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TeamDetails>>> {
    let team = state.teams.get_by_id_with_players(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Team retrieved successfully", team)))
}

pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TeamRequest>,
) -> Result<Json<ApiResponse<Team>>> {
    payload.validate()?;
    let id = parse_id(&id)?;
    tracing::info!("PUT /teams/{}", id);

    let team = state.teams.update(id, payload.into()).await?;
    Ok(Json(ApiResponse::ok("Team updated successfully", team)))
}

pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    tracing::info!("DELETE /teams/{}", id);

    state.teams.delete(id).await?;
    Ok(Json(ApiResponse::ok("Team deleted successfully", ())))
}
