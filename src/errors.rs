// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::matches::MatchStatus;

#[derive(Error, Debug)]
pub enum AppError {
    // Not found
    #[error("team not found")]
    TeamNotFound,

    #[error("player not found")]
    PlayerNotFound,

    #[error("match not found")]
    MatchNotFound,

    #[error("user not found")]
    UserNotFound,

    // Domain validation
    #[error("home team and away team cannot be the same")]
    SameTeamMatch,

    #[error("invalid player position: {0}")]
    InvalidPosition(String),

    #[error("jersey number must be between 1 and 99")]
    InvalidJerseyNumber,

    #[error("jersey number is already taken by another player in this team")]
    JerseyNumberTaken,

    #[error("invalid match status: {0}")]
    InvalidMatchStatus(String),

    #[error("match status cannot change from {from} to {to}")]
    InvalidStatusTransition { from: MatchStatus, to: MatchStatus },

    #[error("goal minute must be between 1 and 120, got {0}")]
    InvalidGoalMinute(i32),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid ID: {0}")]
    InvalidId(String),

    // Credentials
    #[error("user with this email already exists")]
    UserAlreadyExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("Authentication error")]
    AuthError,

    #[error("admin role required")]
    Forbidden,

    // Infrastructure
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::TeamNotFound
            | AppError::PlayerNotFound
            | AppError::MatchNotFound
            | AppError::UserNotFound => StatusCode::NOT_FOUND,

            AppError::SameTeamMatch
            | AppError::InvalidPosition(_)
            | AppError::InvalidJerseyNumber
            | AppError::InvalidMatchStatus(_)
            | AppError::InvalidGoalMinute(_)
            | AppError::ValidationError(_)
            | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,

            AppError::JerseyNumberTaken
            | AppError::InvalidStatusTransition { .. }
            | AppError::UserAlreadyExists => StatusCode::CONFLICT,

            AppError::InvalidCredentials | AppError::AuthError => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,

            AppError::MongoDB(_) | AppError::ConfigurationError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label for the `error` field; infrastructure details stay in the logs.
    fn label(&self) -> &'static str {
        match self {
            AppError::TeamNotFound => "Team not found",
            AppError::PlayerNotFound => "Player not found",
            AppError::MatchNotFound => "Match not found",
            AppError::UserNotFound => "User not found",
            AppError::SameTeamMatch => "Home team and away team cannot be the same",
            AppError::InvalidPosition(_) => "Invalid player position",
            AppError::InvalidJerseyNumber => "Invalid jersey number",
            AppError::JerseyNumberTaken => "Jersey number already taken",
            AppError::InvalidMatchStatus(_) => "Invalid match status",
            AppError::InvalidStatusTransition { .. } => "Invalid match status transition",
            AppError::InvalidGoalMinute(_) => "Invalid goal minute",
            AppError::ValidationError(_) => "Validation failed",
            AppError::InvalidId(_) => "Invalid ID format",
            AppError::UserAlreadyExists => "User already exists",
            AppError::InvalidCredentials => "Invalid credentials",
            AppError::AuthError => "Authentication failed",
            AppError::Forbidden => "Forbidden",
            AppError::MongoDB(_) => "Database error",
            AppError::ConfigurationError(_) => "Configuration error",
            AppError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!("request failed: {}", self);
            self.label().to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": self.label(),
            "message": message,
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidId(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::ValidationError(format!("Date parsing error: {}", err))
    }
}

impl From<bson::ser::Error> for AppError {
    fn from(err: bson::ser::Error) -> Self {
        AppError::Internal(format!("BSON serialization error: {}", err))
    }
}

impl From<bson::de::Error> for AppError {
    fn from(err: bson::de::Error) -> Self {
        AppError::Internal(format!("BSON deserialization error: {}", err))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing error: {}", err))
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_family_maps_to_404() {
        for err in [
            AppError::TeamNotFound,
            AppError::PlayerNotFound,
            AppError::MatchNotFound,
            AppError::UserNotFound,
        ] {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn validation_family_is_a_client_error() {
        assert_eq!(AppError::SameTeamMatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::JerseyNumberTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidStatusTransition {
                from: MatchStatus::Cancelled,
                to: MatchStatus::Completed,
            }
            .status_code(),
            StatusCode::CONFLICT
        );
    }

    #[tokio::test]
    async fn infrastructure_errors_hide_details() {
        let response = AppError::internal("connection reset by peer").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = body["message"].as_str().unwrap();
        assert!(!message.contains("connection reset"));
        assert_eq!(body["success"], false);
    }

    #[test]
    fn transition_error_names_both_states() {
        let err = AppError::InvalidStatusTransition {
            from: MatchStatus::Completed,
            to: MatchStatus::Scheduled,
        };
        assert_eq!(
            err.to_string(),
            "match status cannot change from completed to scheduled"
        );
    }
}
