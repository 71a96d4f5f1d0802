use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use super::parse_id;
use crate::dtos::player_dtos::{PlayerListQuery, PlayerRequest};
use crate::dtos::ApiResponse;
use crate::errors::Result;
use crate::models::player::{Player, PlayerDetails};
use crate::state::AppState;

pub async fn create_player(
    State(state): State<AppState>,
    Json(payload): Json<PlayerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Player>>)> {
    payload.validate()?;
    tracing::info!("POST /players: {} #{}", payload.name, payload.jersey_number);

    let player = state.players.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok("Player created successfully", player))))
}

/// `team_id` takes precedence over `search`.
pub async fn get_players(
    State(state): State<AppState>,
    Query(query): Query<PlayerListQuery>,
) -> Result<Json<ApiResponse<Vec<Player>>>> {
    tracing::debug!("GET /players with {:?}", query);
    let pagination = query.pagination();

    let page = match query.team_id.as_deref().filter(|s| !s.is_empty()) {
        Some(team_id) => state.players.list_by_team(parse_id(team_id)?, pagination).await?,
        None => state.players.list(query.search.as_deref(), pagination).await?,
    };
    Ok(Json(ApiResponse::paginated("Players retrieved successfully", page, pagination)))
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlayerDetails>>> {
    let player = state.players.get_by_id_with_team(parse_id(&id)?).await?;
    Ok(Json(ApiResponse::ok("Player retrieved successfully", player)))
}

pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PlayerRequest>,
) -> Result<Json<ApiResponse<Player>>> {
    payload.validate()?;
    let id = parse_id(&id)?;
    tracing::info!("PUT /players/{}", id);

    let player = state.players.update(id, payload.into()).await?;
    Ok(Json(ApiResponse::ok("Player updated successfully", player)))
}

pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    tracing::info!("DELETE /players/{}", id);

    state.players.delete(id).await?;
    Ok(Json(ApiResponse::ok("Player deleted successfully", ())))
}
