// src/services/player_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::pagination::{Page, Pagination};
use crate::models::player::{is_valid_jersey_number, Player, PlayerDetails, PlayerPosition};
use crate::repositories::{PlayerRepository, TeamRepository};

#[derive(Debug, Clone)]
pub struct PlayerInput {
    pub team_id: Uuid,
    pub name: String,
    pub height: f64,
    pub weight: f64,
    pub position: String,
    pub jersey_number: i32,
}

pub struct PlayerService {
    players: Arc<dyn PlayerRepository>,
    teams: Arc<dyn TeamRepository>,
}

impl PlayerService {
    pub fn new(players: Arc<dyn PlayerRepository>, teams: Arc<dyn TeamRepository>) -> Self {
        Self { players, teams }
    }

    /// Checks shared by create and update. `current` is excluded from the
    /// jersey clash check.
    async fn validate(&self, input: &PlayerInput, current: Option<Uuid>) -> Result<PlayerPosition> {
        if !self.teams.exists(input.team_id).await? {
            return Err(AppError::TeamNotFound);
        }

        let position: PlayerPosition = input.position.parse()?;

        if !is_valid_jersey_number(input.jersey_number) {
            return Err(AppError::InvalidJerseyNumber);
        }
        if self
            .players
            .is_jersey_number_taken(input.team_id, input.jersey_number, current)
            .await?
        {
            return Err(AppError::JerseyNumberTaken);
        }

        Ok(position)
    }

    pub async fn create(&self, input: PlayerInput) -> Result<Player> {
        let position = self.validate(&input, None).await?;

        let mut player = Player::new(input.team_id, input.name, position, input.jersey_number);
        player.height = input.height;
        player.weight = input.weight;

        self.players.create(&player).await?;
        tracing::info!("Created player {} #{} for team {}", player.name, player.jersey_number, player.team_id);
        Ok(player)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Player> {
        self.players.find_by_id(id).await?.ok_or(AppError::PlayerNotFound)
    }

    pub async fn get_by_id_with_team(&self, id: Uuid) -> Result<PlayerDetails> {
        self.players
            .find_by_id_with_team(id)
            .await?
            .ok_or(AppError::PlayerNotFound)
    }

    pub async fn update(&self, id: Uuid, input: PlayerInput) -> Result<Player> {
        let mut player = self.get_by_id(id).await?;
        let position = self.validate(&input, Some(id)).await?;

        player.team_id = input.team_id;
        player.name = input.name;
        player.height = input.height;
        player.weight = input.weight;
        player.position = position;
        player.jersey_number = input.jersey_number;
        player.updated_at = Utc::now();

        self.players.update(&player).await?;
        tracing::info!("Updated player {}", player.id);
        Ok(player)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.players.exists(id).await? {
            return Err(AppError::PlayerNotFound);
        }
        self.players.delete(id).await?;
        tracing::info!("Deleted player {}", id);
        Ok(())
    }

    pub async fn list(&self, search: Option<&str>, pagination: Pagination) -> Result<Page<Player>> {
        match search.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => self.players.search(query, pagination).await,
            None => self.players.list(pagination).await,
        }
    }

    pub async fn list_by_team(&self, team_id: Uuid, pagination: Pagination) -> Result<Page<Player>> {
        if !self.teams.exists(team_id).await? {
            return Err(AppError::TeamNotFound);
        }
        self.players.list_by_team(team_id, pagination).await
    }
}
