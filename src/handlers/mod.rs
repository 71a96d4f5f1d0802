pub(crate) mod auth;
pub(crate) mod matches;
pub(crate) mod players;
pub(crate) mod reports;
pub(crate) mod teams;

use uuid::Uuid;

use crate::errors::{AppError, Result};

/// Path ids arrive as strings so malformed ones get the JSON error envelope.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}
