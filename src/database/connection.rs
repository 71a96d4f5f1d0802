use mongodb::{bson::doc, Client, Database};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

pub async fn get_db_client(config: &AppConfig) -> Result<Database> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::configuration("DATABASE_URL must be set"))?;

    let client = Client::with_uri_str(database_url).await?;
    let db = client.database(&config.database_name);

    db.run_command(doc! { "ping": 1 }).await?;

    let collections = db.list_collection_names().await?;
    tracing::info!("Connected to database: {}", config.database_name);
    tracing::debug!("Collections found: {:?}", collections);

    for expected in ["teams", "players", "matches", "goals", "users"] {
        if !collections.iter().any(|name| name == expected) {
            tracing::warn!("'{}' collection not found, it will be created on first write", expected);
        }
    }

    Ok(db)
}
