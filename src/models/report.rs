use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::goal::GoalDetails;
use crate::models::matches::{MatchResult, MatchStatus};

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
    pub logo: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchTopScorer {
    pub player_id: Uuid,
    pub player_name: String,
    pub goal_count: i64,
}

/// Read-only projection of a match and its derived facts.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub match_id: Uuid,
    pub match_date: NaiveDate,
    pub match_time: String,
    pub status: MatchStatus,
    pub home_team: Option<TeamSummary>,
    pub away_team: Option<TeamSummary>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub result: MatchResult,
    pub result_display: String,
    pub goals: Vec<GoalDetails>,
    pub top_scorer: Option<MatchTopScorer>,
    /// Wins over completed matches up to and including this match's date.
    pub home_team_total_wins: i64,
    pub away_team_total_wins: i64,
}
