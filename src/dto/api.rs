//! JSON API envelope types.
//!
//! Every list endpoint answers `{success, data: {items, pagination}}` with
//! camelCase pagination keys; errors answer `{success: false, message}`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiPagination {
    pub page: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiPage<T> {
    pub items: Vec<T>,
    pub pagination: ApiPagination,
}

impl<T> ApiPage<T> {
    pub fn new(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = if per_page == 0 {
            1
        } else {
            total.div_ceil(per_page).max(1)
        };
        Self {
            items,
            pagination: ApiPagination {
                page: page.clamp(1, total_pages),
                total_pages,
                total,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_envelope_serializes_with_camel_case_pagination() {
        let page = ApiPage::new(vec![1, 2, 3], 1, 3, 7);
        let value = serde_json::to_value(ApiEnvelope::ok(page)).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["items"].as_array().unwrap().len(), 3);
        assert_eq!(value["data"]["pagination"]["totalPages"], 3);
        assert_eq!(value["data"]["pagination"]["total"], 7);
    }

    #[test]
    fn empty_collection_still_reports_one_page() {
        let page: ApiPage<i32> = ApiPage::new(vec![], 5, 12, 0);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.page, 1);
    }
}
