use serde::Deserialize;
use validator::Validate;

use crate::models::pagination::Pagination;
use crate::services::team_service::TeamInput;

#[derive(Debug, Deserialize, Validate)]
pub struct TeamRequest {
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Logo URL is too long"))]
    pub logo: String,

    #[validate(range(min = 1800, max = 2100, message = "Founded year must be between 1800 and 2100"))]
    pub founded_year: i32,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
}

impl From<TeamRequest> for TeamInput {
    fn from(request: TeamRequest) -> Self {
        TeamInput {
            name: request.name.trim().to_string(),
            logo: request.logo,
            founded_year: request.founded_year,
            address: request.address,
            city: request.city.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TeamListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl TeamListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}
