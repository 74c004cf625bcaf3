//! Entity-DTO mappers.

use crate::dto::{UserListResponse, UserResponse};
use roster_core::{Page, User};

/// Converts a page of users to a user list response.
impl From<Page<User>> for UserListResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            total_items: page.info.total_items,
            total_pages: page.info.total_pages,
            page: page.info.page,
            page_size: page.info.page_size,
            users: page.content.into_iter().map(UserResponse::from).collect(),
        }
    }
}
