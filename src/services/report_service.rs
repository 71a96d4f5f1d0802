// src/services/report_service.rs
use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::try_join_all;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::goal::{rank_top_scorers, GoalDetails, TopScorer};
use crate::models::matches::{Match, MatchDetails};
use crate::models::pagination::{Page, Pagination};
use crate::models::report::{MatchReport, MatchTopScorer, TeamSummary};
use crate::models::team::Team;
use crate::repositories::{GoalRepository, MatchRepository};

/// Read-only projections over recorded matches.
pub struct ReportService {
    matches: Arc<dyn MatchRepository>,
    goals: Arc<dyn GoalRepository>,
}

fn summarize(team: &Team) -> TeamSummary {
    TeamSummary {
        id: team.id,
        name: team.name.clone(),
        logo: team.logo.clone(),
        city: team.city.clone(),
    }
}

/// Most goals in the match; ties go to whoever scored first.
fn match_top_scorer(goals: &[GoalDetails]) -> Option<MatchTopScorer> {
    let mut tally: HashMap<Uuid, (i64, i32, Option<String>)> = HashMap::new();
    for details in goals {
        let entry = tally
            .entry(details.goal.player_id)
            .or_insert((0, details.goal.minute, details.player_name.clone()));
        entry.0 += 1;
        entry.1 = entry.1.min(details.goal.minute);
    }

    tally
        .into_iter()
        .max_by(|(a_id, a), (b_id, b)| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| b_id.cmp(a_id))
        })
        .map(|(player_id, (goal_count, _, player_name))| MatchTopScorer {
            player_id,
            player_name: player_name.unwrap_or_default(),
            goal_count,
        })
}

impl ReportService {
    pub fn new(matches: Arc<dyn MatchRepository>, goals: Arc<dyn GoalRepository>) -> Self {
        Self { matches, goals }
    }

    /// `limit` is clamped the same way page limits are.
    pub async fn get_top_scorers(&self, limit: Option<i64>) -> Result<Vec<TopScorer>> {
        let limit = Pagination::new(None, limit).limit;

        let mut scorers = self.goals.get_top_scorers(limit).await?;
        rank_top_scorers(&mut scorers);
        scorers.truncate(limit as usize);

        tracing::debug!("Top scorers computed: {} rows (limit {})", scorers.len(), limit);
        Ok(scorers)
    }

    pub async fn get_match_report(&self, match_id: Uuid) -> Result<MatchReport> {
        let details = self
            .matches
            .find_by_id_with_details(match_id)
            .await?
            .ok_or(AppError::MatchNotFound)?;

        self.build_report(details).await
    }

    pub async fn get_all_match_reports(&self, pagination: Pagination) -> Result<Page<MatchReport>> {
        let page = self.matches.list(pagination).await?;
        self.reports_for(page).await
    }

    pub async fn get_completed_matches(&self, pagination: Pagination) -> Result<Page<MatchReport>> {
        let page = self.matches.get_completed_matches(pagination).await?;
        self.reports_for(page).await
    }

    async fn reports_for(&self, page: Page<Match>) -> Result<Page<MatchReport>> {
        let reports = try_join_all(page.items.iter().map(|fixture| self.get_match_report(fixture.id))).await?;
        Ok(Page::new(reports, page.total))
    }

    async fn total_wins(&self, team_id: Uuid, fixture: &Match) -> Result<i64> {
        let home = self.matches.get_team_win_count(team_id, true, fixture.match_date).await?;
        let away = self.matches.get_team_win_count(team_id, false, fixture.match_date).await?;
        Ok(home + away)
    }

    async fn build_report(&self, details: MatchDetails) -> Result<MatchReport> {
        let result = details.result();
        let fixture = details.fixture;

        let home_team_total_wins = self.total_wins(fixture.home_team_id, &fixture).await?;
        let away_team_total_wins = self.total_wins(fixture.away_team_id, &fixture).await?;

        Ok(MatchReport {
            match_id: fixture.id,
            match_date: fixture.match_date,
            match_time: fixture.match_time,
            status: fixture.status,
            home_team: details.home_team.as_ref().map(summarize),
            away_team: details.away_team.as_ref().map(summarize),
            home_score: fixture.home_score,
            away_score: fixture.away_score,
            result,
            result_display: result.display_name().to_string(),
            top_scorer: match_top_scorer(&details.goals),
            goals: details.goals,
            home_team_total_wins,
            away_team_total_wins,
        })
    }
}
