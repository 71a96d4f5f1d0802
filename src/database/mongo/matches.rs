use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use mongodb::bson::{doc, Document};
use uuid::Uuid;

use super::{active, find_all, find_page, GoalDocument, MatchDocument, MongoStore, PlayerDocument, TeamDocument};
use crate::errors::{AppError, Result};
use crate::models::goal::{Goal, GoalDetails};
use crate::models::matches::{Match, MatchDetails, MatchStatus};
use crate::models::pagination::{Page, Pagination};
use crate::models::player::Player;
use crate::models::team::Team;
use crate::repositories::MatchRepository;

fn latest_first() -> Document {
    doc! { "match_date": -1, "match_time": -1, "_id": 1 }
}

impl MongoStore {
    async fn resolve_team(&self, id: Uuid) -> Result<Option<Team>> {
        self.teams()
            .find_one(doc! { "_id": id.to_string() })
            .await?
            .map(Team::try_from)
            .transpose()
    }

    async fn goal_details(&self, match_id: Uuid) -> Result<Vec<GoalDetails>> {
        let goals: Vec<Goal> = find_all::<GoalDocument, _>(
            &self.goals(),
            active(doc! { "match_id": match_id.to_string() }),
            doc! { "minute": 1, "created_at": 1 },
        )
        .await?;

        let player_ids: Vec<String> = goals.iter().map(|g| g.player_id.to_string()).collect();
        let team_ids: Vec<String> = goals.iter().map(|g| g.team_id.to_string()).collect();

        let players: HashMap<Uuid, String> =
            find_all::<PlayerDocument, Player>(&self.players(), doc! { "_id": { "$in": player_ids } }, doc! {})
                .await?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect();
        let teams: HashMap<Uuid, String> =
            find_all::<TeamDocument, Team>(&self.teams(), doc! { "_id": { "$in": team_ids } }, doc! {})
                .await?
                .into_iter()
                .map(|t| (t.id, t.name))
                .collect();

        Ok(goals
            .into_iter()
            .map(|goal| GoalDetails {
                player_name: players.get(&goal.player_id).cloned(),
                team_name: teams.get(&goal.team_id).cloned(),
                goal,
            })
            .collect())
    }
}

#[async_trait]
impl MatchRepository for MongoStore {
    async fn create(&self, fixture: &Match) -> Result<()> {
        self.matches().insert_one(MatchDocument::from(fixture)).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Match>> {
        self.matches()
            .find_one(active(doc! { "_id": id.to_string() }))
            .await?
            .map(Match::try_from)
            .transpose()
    }

    async fn find_by_id_with_details(&self, id: Uuid) -> Result<Option<MatchDetails>> {
        let Some(fixture) = MatchRepository::find_by_id(self, id).await? else {
            return Ok(None);
        };

        Ok(Some(MatchDetails {
            home_team: self.resolve_team(fixture.home_team_id).await?,
            away_team: self.resolve_team(fixture.away_team_id).await?,
            goals: self.goal_details(id).await?,
            fixture,
        }))
    }

    async fn update(&self, fixture: &Match) -> Result<()> {
        let result = self
            .matches()
            .replace_one(active(doc! { "_id": fixture.id.to_string() }), MatchDocument::from(fixture))
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::MatchNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = self
            .matches()
            .update_one(
                active(doc! { "_id": id.to_string() }),
                doc! { "$set": { "is_deleted": true } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::MatchNotFound);
        }
        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> Result<Page<Match>> {
        find_page(&self.matches(), active(doc! {}), latest_first(), pagination).await
    }

    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        pagination: Pagination,
    ) -> Result<Page<Match>> {
        let filter = active(doc! {
            "match_date": { "$gte": start.to_string(), "$lte": end.to_string() },
        });
        find_page(&self.matches(), filter, latest_first(), pagination).await
    }

    async fn list_by_team(&self, team_id: Uuid, pagination: Pagination) -> Result<Page<Match>> {
        let team_id = team_id.to_string();
        let filter = active(doc! {
            "$or": [ { "home_team_id": team_id.clone() }, { "away_team_id": team_id } ],
        });
        find_page(&self.matches(), filter, latest_first(), pagination).await
    }

    async fn list_by_status(&self, status: MatchStatus, pagination: Pagination) -> Result<Page<Match>> {
        let filter = active(doc! { "status": status.as_str() });
        find_page(&self.matches(), filter, latest_first(), pagination).await
    }

    async fn get_completed_matches(&self, pagination: Pagination) -> Result<Page<Match>> {
        self.list_by_status(MatchStatus::Completed, pagination).await
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let count = self
            .matches()
            .count_documents(active(doc! { "_id": id.to_string() }))
            .await?;
        Ok(count > 0)
    }

    async fn get_team_win_count(&self, team_id: Uuid, is_home: bool, up_to: NaiveDate) -> Result<i64> {
        let (side, beats) = if is_home {
            ("home_team_id", doc! { "$gt": ["$home_score", "$away_score"] })
        } else {
            ("away_team_id", doc! { "$gt": ["$away_score", "$home_score"] })
        };

        let mut filter = active(doc! {
            "status": MatchStatus::Completed.as_str(),
            "match_date": { "$lte": up_to.to_string() },
            "$expr": beats,
        });
        filter.insert(side, team_id.to_string());

        let count = self.matches().count_documents(filter).await?;
        Ok(count as i64)
    }
}
