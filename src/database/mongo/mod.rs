//! MongoDB record store.
//!
//! Soft-deleted documents keep `is_deleted: true`. Result transactions need a
//! replica set or sharded cluster.

mod documents;
mod goals;
mod matches;
mod players;
mod teams;
mod transaction;
mod users;

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::database::connection::get_db_client;
use crate::errors::Result;
use crate::models::pagination::{Page, Pagination};
use crate::repositories::Store;

use documents::{GoalDocument, MatchDocument, PlayerDocument, TeamDocument, UserDocument};

const TEAMS: &str = "teams";
const PLAYERS: &str = "players";
const MATCHES: &str = "matches";
const GOALS: &str = "goals";
const USERS: &str = "users";

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        MongoStore { db }
    }

    pub(crate) fn teams(&self) -> Collection<TeamDocument> {
        self.db.collection(TEAMS)
    }

    pub(crate) fn players(&self) -> Collection<PlayerDocument> {
        self.db.collection(PLAYERS)
    }

    pub(crate) fn matches(&self) -> Collection<MatchDocument> {
        self.db.collection(MATCHES)
    }

    pub(crate) fn goals(&self) -> Collection<GoalDocument> {
        self.db.collection(GOALS)
    }

    pub(crate) fn users(&self) -> Collection<UserDocument> {
        self.db.collection(USERS)
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique = IndexOptions::builder().unique(true).build();

        self.users()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;
        self.players()
            .create_index(IndexModel::builder().keys(doc! { "team_id": 1, "jersey_number": 1 }).build())
            .await?;
        self.matches()
            .create_index(IndexModel::builder().keys(doc! { "match_date": -1, "match_time": -1 }).build())
            .await?;
        self.goals()
            .create_index(IndexModel::builder().keys(doc! { "match_id": 1 }).build())
            .await?;

        tracing::debug!("MongoDB indexes ensured");
        Ok(())
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

pub async fn connect(config: &AppConfig) -> Result<Store> {
    let db = get_db_client(config).await?;
    let store = MongoStore::new(db);
    store.ensure_indexes().await?;
    Ok(store.into_store())
}

pub(crate) fn active(mut filter: Document) -> Document {
    filter.insert("is_deleted", false);
    filter
}

/// Case-insensitive substring match on `field`.
pub(crate) fn contains_filter(field: &str, query: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(field, doc! { "$regex": escape_regex(query), "$options": "i" });
    active(filter)
}

fn escape_regex(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Runs one counted, sorted page of `filter` and converts every document.
pub(crate) async fn find_page<D, T>(
    collection: &Collection<D>,
    filter: Document,
    sort: Document,
    pagination: Pagination,
) -> Result<Page<T>>
where
    D: DeserializeOwned + Unpin + Send + Sync,
    T: TryFrom<D, Error = crate::errors::AppError>,
{
    let total = collection.count_documents(filter.clone()).await?;
    let docs: Vec<D> = collection
        .find(filter)
        .sort(sort)
        .skip(pagination.offset())
        .limit(pagination.limit as i64)
        .await?
        .try_collect()
        .await?;

    let items = docs.into_iter().map(T::try_from).collect::<Result<Vec<T>>>()?;
    Ok(Page::new(items, total))
}

pub(crate) async fn find_all<D, T>(collection: &Collection<D>, filter: Document, sort: Document) -> Result<Vec<T>>
where
    D: DeserializeOwned + Unpin + Send + Sync,
    T: TryFrom<D, Error = crate::errors::AppError>,
{
    let docs: Vec<D> = collection.find(filter).sort(sort).await?.try_collect().await?;
    docs.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_metacharacters_are_escaped() {
        assert_eq!(escape_regex("a.c"), "a\\.c");
        assert_eq!(escape_regex("(FC)"), "\\(FC\\)");
        assert_eq!(escape_regex("Persija"), "Persija");
    }

    #[test]
    fn search_filter_excludes_deleted_documents() {
        let filter = contains_filter("name", "per");
        assert!(!filter.get_bool("is_deleted").unwrap());
        let name = filter.get_document("name").unwrap();
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }
}
