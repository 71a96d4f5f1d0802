//! Stored shapes of the domain records.
//!
//! Ids are kept as hyphenated strings and match dates as `YYYY-MM-DD`, so range
//! filters and sorts compare lexically in the same order as the typed values.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::goal::{Goal, TopScorer};
use crate::models::matches::{Match, MatchStatus};
use crate::models::player::{Player, PlayerPosition};
use crate::models::team::Team;
use crate::models::user::{User, UserRole};

pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::internal(format!("stored id '{}' is invalid: {}", raw, e)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub logo: String,
    pub founded_year: i32,
    pub address: String,
    pub city: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<&Team> for TeamDocument {
    fn from(team: &Team) -> Self {
        TeamDocument {
            id: team.id.to_string(),
            name: team.name.clone(),
            logo: team.logo.clone(),
            founded_year: team.founded_year,
            address: team.address.clone(),
            city: team.city.clone(),
            created_at: team.created_at,
            updated_at: team.updated_at,
            is_deleted: false,
        }
    }
}

impl TryFrom<TeamDocument> for Team {
    type Error = AppError;

    fn try_from(doc: TeamDocument) -> Result<Self> {
        Ok(Team {
            id: parse_id(&doc.id)?,
            name: doc.name,
            logo: doc.logo,
            founded_year: doc.founded_year,
            address: doc.address,
            city: doc.city,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub position: PlayerPosition,
    pub jersey_number: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<&Player> for PlayerDocument {
    fn from(player: &Player) -> Self {
        PlayerDocument {
            id: player.id.to_string(),
            team_id: player.team_id.to_string(),
            name: player.name.clone(),
            height: player.height,
            weight: player.weight,
            position: player.position,
            jersey_number: player.jersey_number,
            created_at: player.created_at,
            updated_at: player.updated_at,
            is_deleted: false,
        }
    }
}

impl TryFrom<PlayerDocument> for Player {
    type Error = AppError;

    fn try_from(doc: PlayerDocument) -> Result<Self> {
        Ok(Player {
            id: parse_id(&doc.id)?,
            team_id: parse_id(&doc.team_id)?,
            name: doc.name,
            height: doc.height,
            weight: doc.weight,
            position: doc.position,
            jersey_number: doc.jersey_number,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub match_date: NaiveDate,
    pub match_time: String,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: MatchStatus,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<&Match> for MatchDocument {
    fn from(fixture: &Match) -> Self {
        MatchDocument {
            id: fixture.id.to_string(),
            match_date: fixture.match_date,
            match_time: fixture.match_time.clone(),
            home_team_id: fixture.home_team_id.to_string(),
            away_team_id: fixture.away_team_id.to_string(),
            home_score: fixture.home_score,
            away_score: fixture.away_score,
            status: fixture.status,
            created_at: fixture.created_at,
            updated_at: fixture.updated_at,
            is_deleted: false,
        }
    }
}

impl TryFrom<MatchDocument> for Match {
    type Error = AppError;

    fn try_from(doc: MatchDocument) -> Result<Self> {
        Ok(Match {
            id: parse_id(&doc.id)?,
            match_date: doc.match_date,
            match_time: doc.match_time,
            home_team_id: parse_id(&doc.home_team_id)?,
            away_team_id: parse_id(&doc.away_team_id)?,
            home_score: doc.home_score,
            away_score: doc.away_score,
            status: doc.status,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub match_id: String,
    pub player_id: String,
    pub team_id: String,
    pub minute: i32,
    pub is_own_goal: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<&Goal> for GoalDocument {
    fn from(goal: &Goal) -> Self {
        GoalDocument {
            id: goal.id.to_string(),
            match_id: goal.match_id.to_string(),
            player_id: goal.player_id.to_string(),
            team_id: goal.team_id.to_string(),
            minute: goal.minute,
            is_own_goal: goal.is_own_goal,
            created_at: goal.created_at,
            is_deleted: false,
        }
    }
}

impl TryFrom<GoalDocument> for Goal {
    type Error = AppError;

    fn try_from(doc: GoalDocument) -> Result<Self> {
        Ok(Goal {
            id: parse_id(&doc.id)?,
            match_id: parse_id(&doc.match_id)?,
            player_id: parse_id(&doc.player_id)?,
            team_id: parse_id(&doc.team_id)?,
            minute: doc.minute,
            is_own_goal: doc.is_own_goal,
            created_at: doc.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        UserDocument {
            id: user.id.to_string(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = AppError;

    fn try_from(doc: UserDocument) -> Result<Self> {
        Ok(User {
            id: parse_id(&doc.id)?,
            email: doc.email,
            password_hash: doc.password_hash,
            name: doc.name,
            role: doc.role,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

/// Output row of the top-scorer aggregation.
#[derive(Debug, Deserialize)]
pub struct TopScorerRow {
    pub player_id: String,
    pub player_name: String,
    pub team_id: String,
    #[serde(default)]
    pub team_name: String,
    pub goal_count: i64,
}

impl TryFrom<TopScorerRow> for TopScorer {
    type Error = AppError;

    fn try_from(row: TopScorerRow) -> Result<Self> {
        Ok(TopScorer {
            player_id: parse_id(&row.player_id)?,
            player_name: row.player_name,
            team_id: parse_id(&row.team_id)?,
            team_name: row.team_name,
            goal_count: row.goal_count,
        })
    }
}
