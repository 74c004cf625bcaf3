//! In-process query engine for user listings.
//!
//! A listing runs filter, then sort, then pagination over the full user set.
//! Every step is pure and synchronous; the store only has to hand over users
//! with their roles loaded.

pub mod filter;
pub mod reconcile;
pub mod sort;

pub use filter::{filter_users, matches};
pub use reconcile::{reconcile, RoleDiff};
pub use sort::{order, SortDirection, SortField};

use crate::{Page, PageWindow, RosterResult, User};
use serde::{Deserialize, Serialize};

/// Parameters of a user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    /// Requested page (1-indexed, clamped).
    pub page: i64,
    /// Items per page (at least 1, capped at 100).
    pub page_size: i64,
    /// Sort field name, matched case-insensitively.
    pub sort_by: String,
    /// `"asc"` for ascending, anything else for descending.
    pub sort_order: String,
    /// Free-text filter term.
    pub filter: String,
}

impl Default for UserQuery {
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

impl UserQuery {
    /// Filters, orders, and paginates `users`.
    ///
    /// Fails with `InvalidField` for an unknown sort field and with
    /// `Validation` for a page size below 1, before any work is done.
    pub fn apply(&self, users: Vec<User>) -> RosterResult<Page<User>> {
        let field: SortField = self.sort_by.parse()?;
        let direction = SortDirection::parse(&self.sort_order);
        PageWindow::compute(0, self.page, self.page_size)?;

        let mut users = filter_users(users, &self.filter);
        order(&mut users, field, direction);

        let window = PageWindow::compute(users.len() as u64, self.page, self.page_size)?;
        Ok(Page::slice(users, &window))
    }
}
