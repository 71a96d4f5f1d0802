use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::matches::MatchStatus;
use crate::models::pagination::Pagination;
use crate::services::match_service::{
    CreateMatchRequest, GoalInput, MatchFilter, RecordResultRequest, UpdateMatchRequest,
};

fn parse_status(raw: Option<&str>) -> Result<Option<MatchStatus>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase().parse())
        .transpose()
}

/// Body of both create and update; update treats a missing status as unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct MatchRequest {
    pub match_date: NaiveDate,

    #[validate(length(min = 4, max = 5, message = "Match time must be HH:MM"))]
    pub match_time: String,

    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub status: Option<String>,
}

impl MatchRequest {
    pub fn into_create(self) -> Result<CreateMatchRequest> {
        Ok(CreateMatchRequest {
            status: parse_status(self.status.as_deref())?,
            match_date: self.match_date,
            match_time: self.match_time,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
        })
    }

    pub fn into_update(self) -> Result<UpdateMatchRequest> {
        Ok(UpdateMatchRequest {
            status: parse_status(self.status.as_deref())?,
            match_date: self.match_date,
            match_time: self.match_time,
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoalRequest {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub minute: i32,
    #[serde(default)]
    pub is_own_goal: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordResultBody {
    #[validate(range(min = 0, message = "Home score must not be negative"))]
    pub home_score: i32,

    #[validate(range(min = 0, message = "Away score must not be negative"))]
    pub away_score: i32,

    #[serde(default)]
    pub goals: Vec<GoalRequest>,
}

impl From<RecordResultBody> for RecordResultRequest {
    fn from(body: RecordResultBody) -> Self {
        RecordResultRequest {
            home_score: body.home_score,
            away_score: body.away_score,
            goals: body
                .goals
                .into_iter()
                .map(|g| GoalInput {
                    player_id: g.player_id,
                    team_id: g.team_id,
                    minute: g.minute,
                    is_own_goal: g.is_own_goal,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub team_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl MatchListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }

    /// The first filter present wins: team, then status, then date range.
    pub fn filter(&self) -> Result<MatchFilter> {
        if let Some(team_id) = self.team_id.as_deref().filter(|s| !s.is_empty()) {
            return Ok(MatchFilter::Team(Uuid::parse_str(team_id)?));
        }
        if let Some(status) = parse_status(self.status.as_deref())? {
            return Ok(MatchFilter::Status(status));
        }
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) => Ok(MatchFilter::DateRange(
                NaiveDate::parse_from_str(start, "%Y-%m-%d")?,
                NaiveDate::parse_from_str(end, "%Y-%m-%d")?,
            )),
            (None, None) => Ok(MatchFilter::All),
            _ => Err(AppError::invalid_data("start_date and end_date must be given together")),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TopScorersQuery {
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> MatchListQuery {
        MatchListQuery::default()
    }

    #[test]
    fn team_filter_wins_over_the_others() {
        let team_id = Uuid::new_v4();
        let q = MatchListQuery {
            team_id: Some(team_id.to_string()),
            status: Some("completed".to_string()),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-12-31".to_string()),
            ..query()
        };
        assert_eq!(q.filter().unwrap(), MatchFilter::Team(team_id));
    }

    #[test]
    fn status_filter_is_case_insensitive() {
        let q = MatchListQuery {
            status: Some("Ongoing".to_string()),
            ..query()
        };
        assert_eq!(q.filter().unwrap(), MatchFilter::Status(MatchStatus::Ongoing));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let q = MatchListQuery {
            status: Some("postponed".to_string()),
            ..query()
        };
        assert!(matches!(q.filter(), Err(AppError::InvalidMatchStatus(_))));
    }

    #[test]
    fn half_open_date_range_is_rejected() {
        let q = MatchListQuery {
            start_date: Some("2024-01-01".to_string()),
            ..query()
        };
        assert!(matches!(q.filter(), Err(AppError::ValidationError(_))));
        assert_eq!(query().filter().unwrap(), MatchFilter::All);
    }

    #[test]
    fn negative_score_fails_validation() {
        let body = RecordResultBody {
            home_score: -1,
            away_score: 0,
            goals: vec![],
        };
        assert!(body.validate().is_err());
    }
}
