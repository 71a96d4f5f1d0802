use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::pagination::Pagination;
use crate::services::player_service::PlayerInput;

/// Position and jersey number are checked by the player service so they map
/// to their own error kinds.
#[derive(Debug, Deserialize, Validate)]
pub struct PlayerRequest {
    pub team_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Player name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 250.0, message = "Height must be between 0 and 250 cm"))]
    pub height: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 200.0, message = "Weight must be between 0 and 200 kg"))]
    pub weight: f64,

    pub position: String,

    pub jersey_number: i32,
}

impl From<PlayerRequest> for PlayerInput {
    fn from(request: PlayerRequest) -> Self {
        PlayerInput {
            team_id: request.team_id,
            name: request.name.trim().to_string(),
            height: request.height,
            weight: request.weight,
            position: request.position.trim().to_lowercase(),
            jersey_number: request.jersey_number,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub team_id: Option<String>,
}

impl PlayerListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}
