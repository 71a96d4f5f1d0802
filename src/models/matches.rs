use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::goal::GoalDetails;
use crate::models::team::Team;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Ongoing => "ongoing",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        }
    }

    /// Transitions reachable through a plain update.
    ///
    /// Completion is reserved for result recording (see [`MatchStatus::can_record_result`]),
    /// so no row of this table leads into `Completed` except `Completed` itself.
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        use MatchStatus::*;

        if *self == next {
            return true;
        }

        matches!(
            (*self, next),
            (Scheduled, Ongoing) | (Scheduled, Cancelled) | (Ongoing, Cancelled) | (Cancelled, Scheduled)
        )
    }

    /// A result may be recorded for a pending match, or re-recorded as a correction.
    pub fn can_record_result(&self) -> bool {
        !matches!(self, MatchStatus::Cancelled)
    }

    pub fn transition_to(self, next: MatchStatus) -> Result<MatchStatus, AppError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(AppError::InvalidStatusTransition { from: self, to: next })
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "ongoing" => Ok(MatchStatus::Ongoing),
            "completed" => Ok(MatchStatus::Completed),
            "cancelled" => Ok(MatchStatus::Cancelled),
            other => Err(AppError::InvalidMatchStatus(other.to_string())),
        }
    }
}

/// Derived outcome of a match. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    HomeWin,
    AwayWin,
    Draw,
    NotPlayed,
}

impl MatchResult {
    pub fn from_scores(home_score: Option<i32>, away_score: Option<i32>) -> Self {
        match (home_score, away_score) {
            (Some(home), Some(away)) if home > away => MatchResult::HomeWin,
            (Some(home), Some(away)) if away > home => MatchResult::AwayWin,
            (Some(_), Some(_)) => MatchResult::Draw,
            _ => MatchResult::NotPlayed,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MatchResult::HomeWin => "Home Team Win",
            MatchResult::AwayWin => "Away Team Win",
            MatchResult::Draw => "Draw",
            MatchResult::NotPlayed => "Not Played",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub match_date: NaiveDate,
    pub match_time: String,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn new(
        match_date: NaiveDate,
        match_time: impl Into<String>,
        home_team_id: Uuid,
        away_team_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4(),
            match_date,
            match_time: match_time.into(),
            home_team_id,
            away_team_id,
            home_score: None,
            away_score: None,
            status: MatchStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn result(&self) -> MatchResult {
        MatchResult::from_scores(self.home_score, self.away_score)
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Sets both scores at once and completes the match.
    pub fn complete_with(&mut self, home_score: i32, away_score: i32) {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.status = MatchStatus::Completed;
        self.updated_at = Utc::now();
    }
}

/// A match with its teams and goals resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetails {
    #[serde(flatten)]
    pub fixture: Match,
    pub home_team: Option<Team>,
    pub away_team: Option<Team>,
    pub goals: Vec<GoalDetails>,
}

impl MatchDetails {
    pub fn result(&self) -> MatchResult {
        self.fixture.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [MatchStatus; 4] = [
        MatchStatus::Scheduled,
        MatchStatus::Ongoing,
        MatchStatus::Completed,
        MatchStatus::Cancelled,
    ];

    #[test]
    fn result_is_a_function_of_the_scores() {
        assert_eq!(MatchResult::from_scores(None, None), MatchResult::NotPlayed);
        assert_eq!(MatchResult::from_scores(Some(3), Some(1)), MatchResult::HomeWin);
        assert_eq!(MatchResult::from_scores(Some(1), Some(3)), MatchResult::AwayWin);
        assert_eq!(MatchResult::from_scores(Some(2), Some(2)), MatchResult::Draw);
        assert_eq!(MatchResult::from_scores(Some(2), None), MatchResult::NotPlayed);
    }

    #[test]
    fn result_serializes_as_snake_case() {
        let json = serde_json::to_string(&MatchResult::HomeWin).unwrap();
        assert_eq!(json, "\"home_win\"");
        assert_eq!(MatchResult::NotPlayed.display_name(), "Not Played");
    }

    #[test]
    fn new_match_is_scheduled_without_scores() {
        let home = Uuid::new_v4();
        let away = Uuid::new_v4();
        let fixture = Match::new(NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(), "19:30", home, away);

        assert_eq!(fixture.status, MatchStatus::Scheduled);
        assert_eq!(fixture.home_score, None);
        assert_eq!(fixture.away_score, None);
        assert_eq!(fixture.result(), MatchResult::NotPlayed);
        assert!(fixture.involves(home));
        assert!(fixture.involves(away));
    }

    #[test]
    fn complete_with_sets_both_scores() {
        let mut fixture = Match::new(
            NaiveDate::from_ymd_opt(2024, 8, 17).unwrap(),
            "19:30",
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
        fixture.complete_with(0, 0);

        assert_eq!(fixture.status, MatchStatus::Completed);
        assert_eq!((fixture.home_score, fixture.away_score), (Some(0), Some(0)));
        assert_eq!(fixture.result(), MatchResult::Draw);
    }

    #[test]
    fn status_parses_known_literals_only() {
        for status in ALL_STATUSES {
            assert_eq!(status.as_str().parse::<MatchStatus>().unwrap(), status);
        }
        assert!(matches!(
            "finished".parse::<MatchStatus>(),
            Err(AppError::InvalidMatchStatus(_))
        ));
    }

    #[test]
    fn update_transitions_follow_the_table() {
        use MatchStatus::*;

        assert!(Scheduled.can_transition_to(Ongoing));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Ongoing.can_transition_to(Cancelled));
        assert!(Cancelled.can_transition_to(Scheduled));

        assert!(!Ongoing.can_transition_to(Scheduled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Scheduled));
        assert!(!Cancelled.can_transition_to(Ongoing));

        // completion only happens through result recording
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!Ongoing.can_transition_to(Completed));

        for status in ALL_STATUSES {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn cancelled_matches_cannot_take_a_result() {
        assert!(MatchStatus::Scheduled.can_record_result());
        assert!(MatchStatus::Ongoing.can_record_result());
        assert!(MatchStatus::Completed.can_record_result());
        assert!(!MatchStatus::Cancelled.can_record_result());
    }

    #[test]
    fn transition_to_reports_both_ends() {
        let err = MatchStatus::Completed
            .transition_to(MatchStatus::Ongoing)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidStatusTransition {
                from: MatchStatus::Completed,
                to: MatchStatus::Ongoing
            }
        ));
    }
}
