//! Listing query extractor.

use roster_core::{PageWindow, SortField, UserQuery};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for `GET /api/users`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Page number, 1-indexed. Out-of-range values are clamped.
    pub page: i64,
    /// Items per page, 1 to 100.
    pub page_size: i64,
    /// One of `Id`, `Name`, `Age`, `Email` (case-insensitive).
    pub sort_by: String,
    /// `asc` sorts ascending; any other value sorts descending.
    pub sort_order: String,
    /// Substring matched against name, age, email, and role names.
    pub filter: String,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageWindow::DEFAULT_SIZE,
            sort_by: SortField::Id.as_str().to_string(),
            sort_order: "asc".to_string(),
            filter: String::new(),
        }
    }
}

impl From<UserListQuery> for UserQuery {
    fn from(query: UserListQuery) -> Self {
        Self {
            page: query.page,
            page_size: query.page_size,
            sort_by: query.sort_by,
            sort_order: query.sort_order,
            filter: query.filter,
        }
    }
}
