use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{ClientSession, Collection};
use uuid::Uuid;

use super::{active, GoalDocument, MatchDocument, MongoStore};
use crate::errors::{AppError, Result};
use crate::models::goal::Goal;
use crate::models::matches::Match;
use crate::repositories::{ResultTransaction, UnitOfWork};

/// Result writes bound to one multi-document transaction.
pub struct MongoTransaction {
    session: ClientSession,
    matches: Collection<MatchDocument>,
    goals: Collection<GoalDocument>,
}

#[async_trait]
impl ResultTransaction for MongoTransaction {
    async fn update_match(&mut self, fixture: &Match) -> Result<()> {
        let result = self
            .matches
            .replace_one(active(doc! { "_id": fixture.id.to_string() }), MatchDocument::from(fixture))
            .session(&mut self.session)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::MatchNotFound);
        }
        Ok(())
    }

    async fn delete_goals_by_match(&mut self, match_id: Uuid) -> Result<()> {
        let result = self
            .goals
            .update_many(
                active(doc! { "match_id": match_id.to_string() }),
                doc! { "$set": { "is_deleted": true } },
            )
            .session(&mut self.session)
            .await?;

        tracing::debug!("Soft-deleted {} goals of match {}", result.modified_count, match_id);
        Ok(())
    }

    async fn insert_goals(&mut self, goals: Vec<Goal>) -> Result<()> {
        if goals.is_empty() {
            return Ok(());
        }
        let docs: Vec<GoalDocument> = goals.iter().map(GoalDocument::from).collect();
        self.goals.insert_many(docs).session(&mut self.session).await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.session.commit_transaction().await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.session.abort_transaction().await?;
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for MongoStore {
    async fn begin(&self) -> Result<Box<dyn ResultTransaction>> {
        let mut session = self.db.client().start_session().await?;
        session.start_transaction().await?;

        Ok(Box::new(MongoTransaction {
            session,
            matches: self.matches(),
            goals: self.goals(),
        }))
    }
}
