//! Persistence contracts the services depend on.
//!
//! Lookups return `Ok(None)` when a record does not resolve; services turn that
//! into the matching `*NotFound` error. Soft-deleted records are invisible to
//! every operation except the detail projections, which keep resolving deleted
//! teams and players so historical matches still render.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::goal::{Goal, TopScorer};
use crate::models::matches::{Match, MatchDetails, MatchStatus};
use crate::models::pagination::{Page, Pagination};
use crate::models::player::{Player, PlayerDetails, PlayerGoalCount};
use crate::models::team::{Team, TeamDetails};
use crate::models::user::User;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, team: &Team) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>>;
    async fn find_by_id_with_players(&self, id: Uuid) -> Result<Option<TeamDetails>>;
    async fn update(&self, team: &Team) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn list(&self, pagination: Pagination) -> Result<Page<Team>>;
    async fn search(&self, query: &str, pagination: Pagination) -> Result<Page<Team>>;
    async fn exists(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn create(&self, player: &Player) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Player>>;
    async fn find_by_id_with_team(&self, id: Uuid) -> Result<Option<PlayerDetails>>;
    async fn update(&self, player: &Player) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn list(&self, pagination: Pagination) -> Result<Page<Player>>;
    async fn list_by_team(&self, team_id: Uuid, pagination: Pagination) -> Result<Page<Player>>;
    async fn search(&self, query: &str, pagination: Pagination) -> Result<Page<Player>>;
    async fn exists(&self, id: Uuid) -> Result<bool>;
    async fn is_jersey_number_taken(
        &self,
        team_id: Uuid,
        jersey_number: i32,
        exclude_player_id: Option<Uuid>,
    ) -> Result<bool>;
    async fn get_top_scorers(&self, limit: u64) -> Result<Vec<PlayerGoalCount>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create(&self, fixture: &Match) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>>;
    async fn find_by_id_with_details(&self, id: Uuid) -> Result<Option<MatchDetails>>;
    async fn update(&self, fixture: &Match) -> Result<()>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn list(&self, pagination: Pagination) -> Result<Page<Match>>;
    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        pagination: Pagination,
    ) -> Result<Page<Match>>;
    async fn list_by_team(&self, team_id: Uuid, pagination: Pagination) -> Result<Page<Match>>;
    async fn list_by_status(&self, status: MatchStatus, pagination: Pagination) -> Result<Page<Match>>;
    async fn get_completed_matches(&self, pagination: Pagination) -> Result<Page<Match>>;
    async fn exists(&self, id: Uuid) -> Result<bool>;
    /// Completed matches on or before `up_to` that `team_id` won on the given side.
    async fn get_team_win_count(&self, team_id: Uuid, is_home: bool, up_to: NaiveDate) -> Result<i64>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GoalRepository: Send + Sync {
    async fn create(&self, goal: &Goal) -> Result<()>;
    async fn create_batch(&self, goals: Vec<Goal>) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Goal>>;
    async fn find_by_match_id(&self, match_id: Uuid) -> Result<Vec<Goal>>;
    async fn find_by_player_id(&self, player_id: Uuid) -> Result<Vec<Goal>>;
    async fn delete_by_match_id(&self, match_id: Uuid) -> Result<()>;
    /// Ranked by goal count descending, then player id ascending.
    async fn get_top_scorers(&self, limit: u64) -> Result<Vec<TopScorer>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<()>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Writes staged by one result recording. Nothing is visible until `commit`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultTransaction: Send {
    async fn update_match(&mut self, fixture: &Match) -> Result<()>;
    async fn delete_goals_by_match(&mut self, match_id: Uuid) -> Result<()>;
    async fn insert_goals(&mut self, goals: Vec<Goal>) -> Result<()>;
    async fn commit(&mut self) -> Result<()>;
    async fn rollback(&mut self) -> Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn ResultTransaction>>;
}

/// Every repository of one backend, shared across requests.
#[derive(Clone)]
pub struct Store {
    pub teams: Arc<dyn TeamRepository>,
    pub players: Arc<dyn PlayerRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub goals: Arc<dyn GoalRepository>,
    pub users: Arc<dyn UserRepository>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
}
