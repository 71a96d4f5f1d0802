pub mod auth_dtos;
pub mod match_dtos;
pub mod player_dtos;
pub mod team_dtos;

use serde::{Deserialize, Serialize};

use crate::models::pagination::{Page, PageMeta, Pagination};

/// Envelope around every successful response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            data,
            meta: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paginated(message: impl Into<String>, page: Page<T>, pagination: Pagination) -> Self {
        ApiResponse {
            success: true,
            message: message.into(),
            meta: Some(PageMeta::new(pagination, page.total)),
            data: page.items,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_envelope_carries_meta() {
        let pagination = Pagination::new(Some(2), Some(2));
        let response = ApiResponse::paginated("Teams retrieved", Page::new(vec![1, 2], 5), pagination);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["meta"]["total"], 5);
        assert_eq!(json["meta"]["total_pages"], 3);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn single_item_envelope_omits_meta() {
        let json = serde_json::to_value(ApiResponse::ok("ok", "x")).unwrap();
        assert!(json.get("meta").is_none());
    }
}
