// src/services/team_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::pagination::{Page, Pagination};
use crate::models::team::{Team, TeamDetails};
use crate::repositories::TeamRepository;

#[derive(Debug, Clone)]
pub struct TeamInput {
    pub name: String,
    pub logo: String,
    pub founded_year: i32,
    pub address: String,
    pub city: String,
}

pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    pub async fn create(&self, input: TeamInput) -> Result<Team> {
        let mut team = Team::new(input.name, input.founded_year, input.city);
        team.logo = input.logo;
        team.address = input.address;

        self.teams.create(&team).await?;
        tracing::info!("Created team {} ({})", team.name, team.id);
        Ok(team)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Team> {
        self.teams.find_by_id(id).await?.ok_or(AppError::TeamNotFound)
    }

    pub async fn get_by_id_with_players(&self, id: Uuid) -> Result<TeamDetails> {
        self.teams
            .find_by_id_with_players(id)
            .await?
            .ok_or(AppError::TeamNotFound)
    }

    pub async fn update(&self, id: Uuid, input: TeamInput) -> Result<Team> {
        let mut team = self.get_by_id(id).await?;

        team.name = input.name;
        team.logo = input.logo;
        team.founded_year = input.founded_year;
        team.address = input.address;
        team.city = input.city;
        team.updated_at = Utc::now();

        self.teams.update(&team).await?;
        tracing::info!("Updated team {}", team.id);
        Ok(team)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.teams.exists(id).await? {
            return Err(AppError::TeamNotFound);
        }
        self.teams.delete(id).await?;
        tracing::info!("Deleted team {}", id);
        Ok(())
    }

    pub async fn list(&self, search: Option<&str>, pagination: Pagination) -> Result<Page<Team>> {
        match search.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => self.teams.search(query, pagination).await,
            None => self.teams.list(pagination).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    fn input(name: &str) -> TeamInput {
        TeamInput {
            name: name.to_string(),
            logo: "https://example.com/logo.png".to_string(),
            founded_year: 1927,
            address: "Jl. Merdeka 1".to_string(),
            city: "Malang".to_string(),
        }
    }

    fn service() -> TeamService {
        TeamService::new(MemoryStore::new().into_store().teams)
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let service = service();
        let team = service.create(input("Arema")).await.unwrap();

        let mut changed = input("Arema FC");
        changed.city = "Batu".to_string();
        let updated = service.update(team.id, changed).await.unwrap();

        assert_eq!(updated.name, "Arema FC");
        assert_eq!(updated.city, "Batu");
        assert_eq!(updated.created_at, team.created_at);
        assert_eq!(service.get_by_id(team.id).await.unwrap().name, "Arema FC");
    }

    #[tokio::test]
    async fn deleted_team_is_not_found() {
        let service = service();
        let team = service.create(input("Semen Padang")).await.unwrap();

        service.delete(team.id).await.unwrap();

        assert!(matches!(service.get_by_id(team.id).await, Err(AppError::TeamNotFound)));
        assert!(matches!(service.update(team.id, input("x")).await, Err(AppError::TeamNotFound)));
        assert!(matches!(service.delete(team.id).await, Err(AppError::TeamNotFound)));
    }

    #[tokio::test]
    async fn blank_search_lists_everything() {
        let service = service();
        service.create(input("PSIS Semarang")).await.unwrap();
        service.create(input("PSS Sleman")).await.unwrap();

        assert_eq!(service.list(Some("  "), Pagination::default()).await.unwrap().total, 2);
        assert_eq!(service.list(Some("sleman"), Pagination::default()).await.unwrap().total, 1);
    }
}
