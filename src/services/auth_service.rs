// src/services/auth_service.rs
use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::user::{Claims, User, UserRole};
use crate::repositories::UserRepository;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Issues and checks bearer tokens for the admin surface.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    expiration_hours: i64,
    hash_cost: u32,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.into(),
            expiration_hours,
            hash_cost: DEFAULT_COST,
        }
    }

    /// Cheaper hashing for tests.
    #[cfg(test)]
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub async fn register(&self, input: RegisterInput) -> Result<User> {
        let email = normalize_email(&input.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: hash(&input.password, self.hash_cost)?,
            name: input.name,
            role: input.role,
            created_at: now,
            updated_at: now,
        };

        self.users.create(&user).await?;
        tracing::info!("Registered {} user {}", user.role, user.email);
        Ok(user)
    }

    /// Returns a signed token and the authenticated user.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify(password, &user.password_hash)? {
            tracing::warn!("Failed login for {}", user.email);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        tracing::info!("User {} logged in", user.email);
        Ok((token, user))
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(self.expiration_hours)).timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("token signing failed: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            AppError::AuthError
        })
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    /// Creates the bootstrap admin unless the email is already registered.
    pub async fn ensure_default_admin(&self, email: &str, password: &str) -> Result<()> {
        if self.users.find_by_email(&normalize_email(email)).await?.is_some() {
            tracing::debug!("Default admin {} already present", email);
            return Ok(());
        }

        self.register(RegisterInput {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: UserRole::Admin,
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(MemoryStore::new().into_store().users, "test-secret", 1).with_hash_cost(4)
    }

    fn coach() -> RegisterInput {
        RegisterInput {
            name: "Coach".to_string(),
            email: "Coach@Example.com".to_string(),
            password: "tactics123".to_string(),
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn login_issues_a_token_with_the_role() {
        let auth = service();
        let user = auth.register(coach()).await.unwrap();

        let (token, logged_in) = auth.login("coach@example.com", "tactics123").await.unwrap();
        let claims = auth.validate_token(&token).unwrap();

        assert_eq!(logged_in.id, user.id);
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.role, UserRole::User);
        assert!(!claims.is_admin());
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let auth = service();
        auth.register(coach()).await.unwrap();

        assert!(matches!(
            auth.login("coach@example.com", "wrong").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody@example.com", "tactics123").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let auth = service();
        auth.register(coach()).await.unwrap();

        let err = auth.register(coach()).await.unwrap_err();
        assert!(matches!(err, AppError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn token_from_another_secret_is_rejected() {
        let auth = service();
        let user = auth.register(coach()).await.unwrap();
        let foreign = AuthService::new(MemoryStore::new().into_store().users, "other-secret", 1);

        let token = foreign.issue_token(&user).unwrap();
        assert!(matches!(auth.validate_token(&token), Err(AppError::AuthError)));
        assert!(matches!(auth.validate_token("garbage"), Err(AppError::AuthError)));
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let auth = service();

        auth.ensure_default_admin("admin@football.local", "changeme").await.unwrap();
        auth.ensure_default_admin("admin@football.local", "changeme").await.unwrap();

        let (token, admin) = auth.login("admin@football.local", "changeme").await.unwrap();
        assert!(admin.is_admin());
        assert!(auth.validate_token(&token).unwrap().is_admin());
    }
}
