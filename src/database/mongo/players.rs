use async_trait::async_trait;
use mongodb::bson::doc;
use uuid::Uuid;

use super::{active, contains_filter, find_all, find_page, MongoStore, PlayerDocument};
use crate::errors::{AppError, Result};
use crate::models::pagination::{Page, Pagination};
use crate::models::player::{Player, PlayerDetails, PlayerGoalCount};
use crate::models::team::Team;
use crate::repositories::{GoalRepository, PlayerRepository};

#[async_trait]
impl PlayerRepository for MongoStore {
    async fn create(&self, player: &Player) -> Result<()> {
        self.players().insert_one(PlayerDocument::from(player)).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Player>> {
        self.players()
            .find_one(active(doc! { "_id": id.to_string() }))
            .await?
            .map(Player::try_from)
            .transpose()
    }

    async fn find_by_id_with_team(&self, id: Uuid) -> Result<Option<PlayerDetails>> {
        let Some(player) = PlayerRepository::find_by_id(self, id).await? else {
            return Ok(None);
        };

        // Deleted teams still resolve here.
        let team = self
            .teams()
            .find_one(doc! { "_id": player.team_id.to_string() })
            .await?
            .map(Team::try_from)
            .transpose()?;

        Ok(Some(PlayerDetails { player, team }))
    }

    async fn update(&self, player: &Player) -> Result<()> {
        let result = self
            .players()
            .replace_one(active(doc! { "_id": player.id.to_string() }), PlayerDocument::from(player))
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::PlayerNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = self
            .players()
            .update_one(
                active(doc! { "_id": id.to_string() }),
                doc! { "$set": { "is_deleted": true } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::PlayerNotFound);
        }
        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Player>> {
        find_page(
            &self.players(),
            active(doc! {}),
            doc! { "created_at": -1, "_id": -1 },
            pagination,
        )
        .await
    }

    async fn list_by_team(&self, team_id: Uuid, pagination: Pagination) -> Result<Page<Player>> {
        find_page(
            &self.players(),
            active(doc! { "team_id": team_id.to_string() }),
            doc! { "jersey_number": 1 },
            pagination,
        )
        .await
    }

    async fn search(&self, query: &str, pagination: Pagination) -> Result<Page<Player>> {
        find_page(
            &self.players(),
            contains_filter("name", query),
            doc! { "created_at": -1, "_id": -1 },
            pagination,
        )
        .await
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let count = self
            .players()
            .count_documents(active(doc! { "_id": id.to_string() }))
            .await?;
        Ok(count > 0)
    }

    async fn is_jersey_number_taken(
        &self,
        team_id: Uuid,
        jersey_number: i32,
        exclude_player_id: Option<Uuid>,
    ) -> Result<bool> {
        let mut filter = active(doc! {
            "team_id": team_id.to_string(),
            "jersey_number": jersey_number,
        });
        if let Some(excluded) = exclude_player_id {
            filter.insert("_id", doc! { "$ne": excluded.to_string() });
        }

        let count = self.players().count_documents(filter).await?;
        Ok(count > 0)
    }

    async fn get_top_scorers(&self, limit: u64) -> Result<Vec<PlayerGoalCount>> {
        let scorers = GoalRepository::get_top_scorers(self, limit).await?;
        let ids: Vec<String> = scorers.iter().map(|s| s.player_id.to_string()).collect();

        let players: Vec<Player> =
            find_all::<PlayerDocument, _>(&self.players(), doc! { "_id": { "$in": ids } }, doc! {}).await?;

        Ok(scorers
            .into_iter()
            .filter_map(|scorer| {
                players
                    .iter()
                    .find(|player| player.id == scorer.player_id)
                    .map(|player| PlayerGoalCount {
                        player: player.clone(),
                        goal_count: scorer.goal_count,
                    })
            })
            .collect())
    }
}
