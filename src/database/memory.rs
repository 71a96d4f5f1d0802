//! Record store kept in process memory.
//!
//! Every table lives behind one `RwLock`, so a committed result transaction is
//! applied in a single critical section.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::goal::{rank_top_scorers, Goal, GoalDetails, TopScorer};
use crate::models::matches::{Match, MatchDetails, MatchResult, MatchStatus};
use crate::models::pagination::{Page, Pagination};
use crate::models::player::{Player, PlayerDetails, PlayerGoalCount};
use crate::models::team::{Team, TeamDetails};
use crate::models::user::User;
use crate::repositories::{
    GoalRepository, MatchRepository, PlayerRepository, ResultTransaction, Store, TeamRepository,
    UnitOfWork, UserRepository,
};

#[derive(Debug, Clone)]
struct Row<T> {
    record: T,
    deleted: bool,
}

impl<T> Row<T> {
    fn new(record: T) -> Self {
        Row {
            record,
            deleted: false,
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    teams: HashMap<Uuid, Row<Team>>,
    players: HashMap<Uuid, Row<Player>>,
    matches: HashMap<Uuid, Row<Match>>,
    goals: HashMap<Uuid, Row<Goal>>,
    users: HashMap<Uuid, User>,
}

impl Tables {
    fn active<T: Clone>(rows: &HashMap<Uuid, Row<T>>) -> impl Iterator<Item = &T> {
        rows.values().filter(|row| !row.deleted).map(|row| &row.record)
    }

    fn team_name(&self, id: Uuid) -> Option<String> {
        self.teams.get(&id).map(|row| row.record.name.clone())
    }

    fn player_name(&self, id: Uuid) -> Option<String> {
        self.players.get(&id).map(|row| row.record.name.clone())
    }

    fn goal_details(&self, match_id: Uuid) -> Vec<GoalDetails> {
        let mut goals: Vec<GoalDetails> = Self::active(&self.goals)
            .filter(|goal| goal.match_id == match_id)
            .map(|goal| GoalDetails {
                goal: goal.clone(),
                player_name: self.player_name(goal.player_id),
                team_name: self.team_name(goal.team_id),
            })
            .collect();
        goals.sort_by(|a, b| {
            a.goal
                .minute
                .cmp(&b.goal.minute)
                .then_with(|| a.goal.created_at.cmp(&b.goal.created_at))
        });
        goals
    }
}

fn page_of<T: Clone>(mut items: Vec<T>, order: impl FnMut(&T, &T) -> Ordering, pagination: Pagination) -> Page<T> {
    items.sort_by(order);
    let total = items.len() as u64;
    Page::new(pagination.slice(&items), total)
}

fn newest_first<T>(created: impl Fn(&T) -> (chrono::DateTime<Utc>, Uuid)) -> impl FnMut(&T, &T) -> Ordering {
    move |a: &T, b: &T| created(b).cmp(&created(a))
}

fn latest_fixture_first(a: &Match, b: &Match) -> Ordering {
    b.match_date
        .cmp(&a.match_date)
        .then_with(|| b.match_time.cmp(&a.match_time))
        .then_with(|| a.id.cmp(&b.id))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_store(self) -> Store {
        let shared = Arc::new(self);
        Store {
            teams: shared.clone(),
            players: shared.clone(),
            matches: shared.clone(),
            goals: shared.clone(),
            users: shared.clone(),
            unit_of_work: shared,
        }
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn create(&self, team: &Team) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.teams.insert(team.id, Row::new(team.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teams
            .get(&id)
            .filter(|row| !row.deleted)
            .map(|row| row.record.clone()))
    }

    async fn find_by_id_with_players(&self, id: Uuid) -> Result<Option<TeamDetails>> {
        let tables = self.tables.read().await;
        let Some(team) = tables.teams.get(&id).filter(|row| !row.deleted) else {
            return Ok(None);
        };

        let mut players: Vec<Player> = Tables::active(&tables.players)
            .filter(|player| player.team_id == id)
            .cloned()
            .collect();
        players.sort_by_key(|player| player.jersey_number);

        Ok(Some(TeamDetails {
            team: team.record.clone(),
            players,
        }))
    }

    async fn update(&self, team: &Team) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.teams.get_mut(&team.id).filter(|row| !row.deleted) {
            Some(row) => {
                row.record = team.clone();
                Ok(())
            }
            None => Err(AppError::TeamNotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.teams.get_mut(&id).filter(|row| !row.deleted) {
            Some(row) => {
                row.deleted = true;
                Ok(())
            }
            None => Err(AppError::TeamNotFound),
        }
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Team>> {
        let tables = self.tables.read().await;
        let teams = Tables::active(&tables.teams).cloned().collect();
        Ok(page_of(teams, newest_first(|t: &Team| (t.created_at, t.id)), pagination))
    }

    async fn search(&self, query: &str, pagination: Pagination) -> Result<Page<Team>> {
        let tables = self.tables.read().await;
        let teams = Tables::active(&tables.teams)
            .filter(|team| contains_ignore_case(&team.name, query))
            .cloned()
            .collect();
        Ok(page_of(teams, newest_first(|t: &Team| (t.created_at, t.id)), pagination))
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.teams.get(&id).is_some_and(|row| !row.deleted))
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn create(&self, player: &Player) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.players.insert(player.id, Row::new(player.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Player>> {
        let tables = self.tables.read().await;
        Ok(tables
            .players
            .get(&id)
            .filter(|row| !row.deleted)
            .map(|row| row.record.clone()))
    }

    async fn find_by_id_with_team(&self, id: Uuid) -> Result<Option<PlayerDetails>> {
        let tables = self.tables.read().await;
        let Some(player) = tables.players.get(&id).filter(|row| !row.deleted) else {
            return Ok(None);
        };
        let team = tables
            .teams
            .get(&player.record.team_id)
            .map(|row| row.record.clone());

        Ok(Some(PlayerDetails {
            player: player.record.clone(),
            team,
        }))
    }

    async fn update(&self, player: &Player) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.players.get_mut(&player.id).filter(|row| !row.deleted) {
            Some(row) => {
                row.record = player.clone();
                Ok(())
            }
            None => Err(AppError::PlayerNotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.players.get_mut(&id).filter(|row| !row.deleted) {
            Some(row) => {
                row.deleted = true;
                Ok(())
            }
            None => Err(AppError::PlayerNotFound),
        }
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Player>> {
        let tables = self.tables.read().await;
        let players = Tables::active(&tables.players).cloned().collect();
        Ok(page_of(players, newest_first(|p: &Player| (p.created_at, p.id)), pagination))
    }

    async fn list_by_team(&self, team_id: Uuid, pagination: Pagination) -> Result<Page<Player>> {
        let tables = self.tables.read().await;
        let players = Tables::active(&tables.players)
            .filter(|player| player.team_id == team_id)
            .cloned()
            .collect();
        Ok(page_of(
            players,
            |a: &Player, b: &Player| a.jersey_number.cmp(&b.jersey_number),
            pagination,
        ))
    }

    async fn search(&self, query: &str, pagination: Pagination) -> Result<Page<Player>> {
        let tables = self.tables.read().await;
        let players = Tables::active(&tables.players)
            .filter(|player| contains_ignore_case(&player.name, query))
            .cloned()
            .collect();
        Ok(page_of(players, newest_first(|p: &Player| (p.created_at, p.id)), pagination))
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.players.get(&id).is_some_and(|row| !row.deleted))
    }

    async fn is_jersey_number_taken(
        &self,
        team_id: Uuid,
        jersey_number: i32,
        exclude_player_id: Option<Uuid>,
    ) -> Result<bool> {
        let tables = self.tables.read().await;
        let taken = Tables::active(&tables.players).any(|player| {
            player.team_id == team_id
                && player.jersey_number == jersey_number
                && Some(player.id) != exclude_player_id
        });
        Ok(taken)
    }

    async fn get_top_scorers(&self, limit: u64) -> Result<Vec<PlayerGoalCount>> {
        let scorers = GoalRepository::get_top_scorers(self, limit).await?;
        let tables = self.tables.read().await;

        Ok(scorers
            .into_iter()
            .filter_map(|scorer| {
                tables.players.get(&scorer.player_id).map(|row| PlayerGoalCount {
                    player: row.record.clone(),
                    goal_count: scorer.goal_count,
                })
            })
            .collect())
    }
}

#[async_trait]
impl MatchRepository for MemoryStore {
    async fn create(&self, fixture: &Match) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.matches.insert(fixture.id, Row::new(fixture.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>> {
        let tables = self.tables.read().await;
        Ok(tables
            .matches
            .get(&id)
            .filter(|row| !row.deleted)
            .map(|row| row.record.clone()))
    }

    async fn find_by_id_with_details(&self, id: Uuid) -> Result<Option<MatchDetails>> {
        let tables = self.tables.read().await;
        let Some(row) = tables.matches.get(&id).filter(|row| !row.deleted) else {
            return Ok(None);
        };
        let fixture = row.record.clone();

        Ok(Some(MatchDetails {
            home_team: tables.teams.get(&fixture.home_team_id).map(|r| r.record.clone()),
            away_team: tables.teams.get(&fixture.away_team_id).map(|r| r.record.clone()),
            goals: tables.goal_details(id),
            fixture,
        }))
    }

    async fn update(&self, fixture: &Match) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.matches.get_mut(&fixture.id).filter(|row| !row.deleted) {
            Some(row) => {
                row.record = fixture.clone();
                Ok(())
            }
            None => Err(AppError::MatchNotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        match tables.matches.get_mut(&id).filter(|row| !row.deleted) {
            Some(row) => {
                row.deleted = true;
                Ok(())
            }
            None => Err(AppError::MatchNotFound),
        }
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Match>> {
        let tables = self.tables.read().await;
        let matches = Tables::active(&tables.matches).cloned().collect();
        Ok(page_of(matches, latest_fixture_first, pagination))
    }

    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        pagination: Pagination,
    ) -> Result<Page<Match>> {
        let tables = self.tables.read().await;
        let matches = Tables::active(&tables.matches)
            .filter(|fixture| fixture.match_date >= start && fixture.match_date <= end)
            .cloned()
            .collect();
        Ok(page_of(matches, latest_fixture_first, pagination))
    }

    async fn list_by_team(&self, team_id: Uuid, pagination: Pagination) -> Result<Page<Match>> {
        let tables = self.tables.read().await;
        let matches = Tables::active(&tables.matches)
            .filter(|fixture| fixture.involves(team_id))
            .cloned()
            .collect();
        Ok(page_of(matches, latest_fixture_first, pagination))
    }

    async fn list_by_status(&self, status: MatchStatus, pagination: Pagination) -> Result<Page<Match>> {
        let tables = self.tables.read().await;
        let matches = Tables::active(&tables.matches)
            .filter(|fixture| fixture.status == status)
            .cloned()
            .collect();
        Ok(page_of(matches, latest_fixture_first, pagination))
    }

    async fn get_completed_matches(&self, pagination: Pagination) -> Result<Page<Match>> {
        self.list_by_status(MatchStatus::Completed, pagination).await
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.matches.get(&id).is_some_and(|row| !row.deleted))
    }

    async fn get_team_win_count(&self, team_id: Uuid, is_home: bool, up_to: NaiveDate) -> Result<i64> {
        let tables = self.tables.read().await;
        let wins = Tables::active(&tables.matches)
            .filter(|fixture| fixture.status == MatchStatus::Completed && fixture.match_date <= up_to)
            .filter(|fixture| match (is_home, fixture.result()) {
                (true, MatchResult::HomeWin) => fixture.home_team_id == team_id,
                (false, MatchResult::AwayWin) => fixture.away_team_id == team_id,
                _ => false,
            })
            .count();
        Ok(wins as i64)
    }
}

#[async_trait]
impl GoalRepository for MemoryStore {
    async fn create(&self, goal: &Goal) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.goals.insert(goal.id, Row::new(goal.clone()));
        Ok(())
    }

    async fn create_batch(&self, goals: Vec<Goal>) -> Result<()> {
        let mut tables = self.tables.write().await;
        for goal in goals {
            tables.goals.insert(goal.id, Row::new(goal));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Goal>> {
        let tables = self.tables.read().await;
        Ok(tables
            .goals
            .get(&id)
            .filter(|row| !row.deleted)
            .map(|row| row.record.clone()))
    }

    async fn find_by_match_id(&self, match_id: Uuid) -> Result<Vec<Goal>> {
        let tables = self.tables.read().await;
        Ok(tables
            .goal_details(match_id)
            .into_iter()
            .map(|details| details.goal)
            .collect())
    }

    async fn find_by_player_id(&self, player_id: Uuid) -> Result<Vec<Goal>> {
        let tables = self.tables.read().await;
        let mut goals: Vec<Goal> = Tables::active(&tables.goals)
            .filter(|goal| goal.player_id == player_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.minute.cmp(&b.minute)));
        Ok(goals)
    }

    async fn delete_by_match_id(&self, match_id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        for row in tables.goals.values_mut() {
            if row.record.match_id == match_id {
                row.deleted = true;
            }
        }
        Ok(())
    }

    async fn get_top_scorers(&self, limit: u64) -> Result<Vec<TopScorer>> {
        let tables = self.tables.read().await;

        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for goal in Tables::active(&tables.goals) {
            *counts.entry(goal.player_id).or_insert(0) += 1;
        }

        let mut scorers: Vec<TopScorer> = counts
            .into_iter()
            .filter_map(|(player_id, goal_count)| {
                let player = tables.players.get(&player_id).filter(|row| !row.deleted)?;
                Some(TopScorer {
                    player_id,
                    player_name: player.record.name.clone(),
                    team_id: player.record.team_id,
                    team_name: tables.team_name(player.record.team_id).unwrap_or_default(),
                    goal_count,
                })
            })
            .collect();

        rank_top_scorers(&mut scorers);
        scorers.truncate(limit as usize);
        Ok(scorers)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::UserAlreadyExists);
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|user| user.email == email).cloned())
    }
}

enum StagedWrite {
    UpdateMatch(Match),
    DeleteGoals(Uuid),
    InsertGoals(Vec<Goal>),
}

pub struct MemoryTransaction {
    tables: Arc<RwLock<Tables>>,
    staged: Vec<StagedWrite>,
}

#[async_trait]
impl ResultTransaction for MemoryTransaction {
    async fn update_match(&mut self, fixture: &Match) -> Result<()> {
        self.staged.push(StagedWrite::UpdateMatch(fixture.clone()));
        Ok(())
    }

    async fn delete_goals_by_match(&mut self, match_id: Uuid) -> Result<()> {
        self.staged.push(StagedWrite::DeleteGoals(match_id));
        Ok(())
    }

    async fn insert_goals(&mut self, goals: Vec<Goal>) -> Result<()> {
        self.staged.push(StagedWrite::InsertGoals(goals));
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let mut tables = self.tables.write().await;

        // Check every write before applying any of them.
        for write in &self.staged {
            if let StagedWrite::UpdateMatch(fixture) = write {
                if !tables.matches.get(&fixture.id).is_some_and(|row| !row.deleted) {
                    self.staged.clear();
                    return Err(AppError::MatchNotFound);
                }
            }
        }

        for write in self.staged.drain(..) {
            match write {
                StagedWrite::UpdateMatch(fixture) => {
                    tables.matches.insert(fixture.id, Row::new(fixture));
                }
                StagedWrite::DeleteGoals(match_id) => {
                    for row in tables.goals.values_mut() {
                        if row.record.match_id == match_id {
                            row.deleted = true;
                        }
                    }
                }
                StagedWrite::InsertGoals(goals) => {
                    for goal in goals {
                        tables.goals.insert(goal.id, Row::new(goal));
                    }
                }
            }
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.staged.clear();
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn ResultTransaction>> {
        Ok(Box::new(MemoryTransaction {
            tables: self.tables.clone(),
            staged: Vec::new(),
        }))
    }
}
