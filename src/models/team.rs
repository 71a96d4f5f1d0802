use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::player::Player;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
    pub founded_year: i32,
    pub address: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: impl Into<String>, founded_year: i32, city: impl Into<String>) -> Self {
        let now = Utc::now();
        Team {
            id: Uuid::new_v4(),
            name: name.into(),
            logo: String::new(),
            founded_year,
            address: String::new(),
            city: city.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Team with its active squad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDetails {
    #[serde(flatten)]
    pub team: Team,
    pub players: Vec<Player>,
}
