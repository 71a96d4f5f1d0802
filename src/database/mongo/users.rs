use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use uuid::Uuid;

use super::{MongoStore, UserDocument};
use crate::errors::{AppError, Result};
use crate::models::user::User;
use crate::repositories::UserRepository;

const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl UserRepository for MongoStore {
    async fn create(&self, user: &User) -> Result<()> {
        match self.users().insert_one(UserDocument::from(user)).await {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => Err(AppError::UserAlreadyExists),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.users()
            .find_one(doc! { "_id": id.to_string() })
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users()
            .find_one(doc! { "email": email })
            .await?
            .map(User::try_from)
            .transpose()
    }
}
