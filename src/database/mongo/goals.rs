use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use uuid::Uuid;

use super::documents::TopScorerRow;
use super::{active, find_all, GoalDocument, MongoStore, PLAYERS, TEAMS};
use crate::errors::Result;
use crate::models::goal::{rank_top_scorers, Goal, TopScorer};
use crate::repositories::GoalRepository;

fn top_scorers_pipeline(limit: u64) -> Vec<Document> {
    vec![
        doc! { "$match": { "is_deleted": false } },
        doc! { "$group": { "_id": "$player_id", "goal_count": { "$sum": 1 } } },
        doc! { "$lookup": {
            "from": PLAYERS,
            "localField": "_id",
            "foreignField": "_id",
            "as": "player",
        } },
        doc! { "$unwind": "$player" },
        doc! { "$match": { "player.is_deleted": false } },
        doc! { "$lookup": {
            "from": TEAMS,
            "localField": "player.team_id",
            "foreignField": "_id",
            "as": "team",
        } },
        doc! { "$unwind": { "path": "$team", "preserveNullAndEmptyArrays": true } },
        doc! { "$sort": { "goal_count": -1, "_id": 1 } },
        doc! { "$limit": limit as i64 },
        doc! { "$project": {
            "_id": 0,
            "player_id": "$_id",
            "player_name": "$player.name",
            "team_id": "$player.team_id",
            "team_name": { "$ifNull": ["$team.name", ""] },
            "goal_count": { "$toLong": "$goal_count" },
        } },
    ]
}

#[async_trait]
impl GoalRepository for MongoStore {
    async fn create(&self, goal: &Goal) -> Result<()> {
        self.goals().insert_one(GoalDocument::from(goal)).await?;
        Ok(())
    }

    async fn create_batch(&self, goals: Vec<Goal>) -> Result<()> {
        if goals.is_empty() {
            return Ok(());
        }
        let docs: Vec<GoalDocument> = goals.iter().map(GoalDocument::from).collect();
        self.goals().insert_many(docs).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Goal>> {
        self.goals()
            .find_one(active(doc! { "_id": id.to_string() }))
            .await?
            .map(Goal::try_from)
            .transpose()
    }

    async fn find_by_match_id(&self, match_id: Uuid) -> Result<Vec<Goal>> {
        find_all::<GoalDocument, _>(
            &self.goals(),
            active(doc! { "match_id": match_id.to_string() }),
            doc! { "minute": 1, "created_at": 1 },
        )
        .await
    }

    async fn find_by_player_id(&self, player_id: Uuid) -> Result<Vec<Goal>> {
        find_all::<GoalDocument, _>(
            &self.goals(),
            active(doc! { "player_id": player_id.to_string() }),
            doc! { "created_at": 1, "minute": 1 },
        )
        .await
    }

    async fn delete_by_match_id(&self, match_id: Uuid) -> Result<()> {
        self.goals()
            .update_many(
                active(doc! { "match_id": match_id.to_string() }),
                doc! { "$set": { "is_deleted": true } },
            )
            .await?;
        Ok(())
    }

    async fn get_top_scorers(&self, limit: u64) -> Result<Vec<TopScorer>> {
        let rows: Vec<Document> = self
            .goals()
            .aggregate(top_scorers_pipeline(limit))
            .await?
            .try_collect()
            .await?;

        let mut scorers = rows
            .into_iter()
            .map(|row| {
                let row: TopScorerRow = bson::from_document(row)?;
                TopScorer::try_from(row)
            })
            .collect::<Result<Vec<TopScorer>>>()?;

        rank_top_scorers(&mut scorers);
        Ok(scorers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_ranks_before_limiting() {
        let pipeline = top_scorers_pipeline(3);
        let stages: Vec<&str> = pipeline
            .iter()
            .filter_map(|stage| stage.keys().next().map(String::as_str))
            .collect();

        let sort = stages.iter().position(|s| *s == "$sort").unwrap();
        let limit = stages.iter().position(|s| *s == "$limit").unwrap();
        assert!(sort < limit);
        assert_eq!(pipeline[limit].get_i64("$limit").unwrap(), 3);
    }
}
