use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::team::Team;

pub const MIN_JERSEY_NUMBER: i32 = 1;
pub const MAX_JERSEY_NUMBER: i32 = 99;

pub fn is_valid_jersey_number(jersey_number: i32) -> bool {
    (MIN_JERSEY_NUMBER..=MAX_JERSEY_NUMBER).contains(&jersey_number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPosition {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl PlayerPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerPosition::Forward => "forward",
            PlayerPosition::Midfielder => "midfielder",
            PlayerPosition::Defender => "defender",
            PlayerPosition::Goalkeeper => "goalkeeper",
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerPosition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(PlayerPosition::Forward),
            "midfielder" => Ok(PlayerPosition::Midfielder),
            "defender" => Ok(PlayerPosition::Defender),
            "goalkeeper" => Ok(PlayerPosition::Goalkeeper),
            other => Err(AppError::InvalidPosition(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub height: f64, // cm
    pub weight: f64, // kg
    pub position: PlayerPosition,
    pub jersey_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn new(
        team_id: Uuid,
        name: impl Into<String>,
        position: PlayerPosition,
        jersey_number: i32,
    ) -> Self {
        let now = Utc::now();
        Player {
            id: Uuid::new_v4(),
            team_id,
            name: name.into(),
            height: 0.0,
            weight: 0.0,
            position,
            jersey_number,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDetails {
    #[serde(flatten)]
    pub player: Player,
    pub team: Option<Team>,
}

/// A player with the number of goals credited to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerGoalCount {
    pub player: Player,
    pub goal_count: i64,
}
