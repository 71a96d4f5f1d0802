use async_trait::async_trait;
use mongodb::bson::doc;
use uuid::Uuid;

use super::{active, contains_filter, find_all, find_page, MongoStore, PlayerDocument, TeamDocument};
use crate::errors::{AppError, Result};
use crate::models::pagination::{Page, Pagination};
use crate::models::player::Player;
use crate::models::team::{Team, TeamDetails};
use crate::repositories::TeamRepository;

#[async_trait]
impl TeamRepository for MongoStore {
    async fn create(&self, team: &Team) -> Result<()> {
        self.teams().insert_one(TeamDocument::from(team)).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>> {
        self.teams()
            .find_one(active(doc! { "_id": id.to_string() }))
            .await?
            .map(Team::try_from)
            .transpose()
    }

    async fn find_by_id_with_players(&self, id: Uuid) -> Result<Option<TeamDetails>> {
        let Some(team) = TeamRepository::find_by_id(self, id).await? else {
            return Ok(None);
        };

        let players: Vec<Player> = find_all::<PlayerDocument, _>(
            &self.players(),
            active(doc! { "team_id": id.to_string() }),
            doc! { "jersey_number": 1 },
        )
        .await?;

        Ok(Some(TeamDetails { team, players }))
    }

    async fn update(&self, team: &Team) -> Result<()> {
        let result = self
            .teams()
            .replace_one(active(doc! { "_id": team.id.to_string() }), TeamDocument::from(team))
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::TeamNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = self
            .teams()
            .update_one(
                active(doc! { "_id": id.to_string() }),
                doc! { "$set": { "is_deleted": true } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::TeamNotFound);
        }
        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Team>> {
        find_page(
            &self.teams(),
            active(doc! {}),
            doc! { "created_at": -1, "_id": -1 },
            pagination,
        )
        .await
    }

    async fn search(&self, query: &str, pagination: Pagination) -> Result<Page<Team>> {
        find_page(
            &self.teams(),
            contains_filter("name", query),
            doc! { "created_at": -1, "_id": -1 },
            pagination,
        )
        .await
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let count = self
            .teams()
            .count_documents(active(doc! { "_id": id.to_string() }))
            .await?;
        Ok(count > 0)
    }
}
