//! Runtime-selected ordering over users.

use crate::{RosterError, User};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A sortable user field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Id,
    Name,
    Age,
    Email,
}

type Comparator = fn(&User, &User) -> Ordering;

/// Field name lookup table. Names are matched ASCII case-insensitively.
const SORT_FIELDS: &[(&str, SortField, Comparator)] = &[
    ("Id", SortField::Id, by_id),
    ("Name", SortField::Name, by_name),
    ("Age", SortField::Age, by_age),
    ("Email", SortField::Email, by_email),
];

fn by_id(a: &User, b: &User) -> Ordering {
    a.id.cmp(&b.id)
}

fn by_name(a: &User, b: &User) -> Ordering {
    a.name.cmp(&b.name)
}

fn by_age(a: &User, b: &User) -> Ordering {
    a.age.cmp(&b.age)
}

fn by_email(a: &User, b: &User) -> Ordering {
    a.email.cmp(&b.email)
}

impl SortField {
    /// Returns the canonical field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        SORT_FIELDS
            .iter()
            .find(|(_, field, _)| *field == self)
            .map_or("", |(name, _, _)| name)
    }

    /// Compares two users on this field in ascending order.
    #[must_use]
    pub fn compare(self, a: &User, b: &User) -> Ordering {
        SORT_FIELDS
            .iter()
            .find(|(_, field, _)| *field == self)
            .map_or(Ordering::Equal, |(_, _, cmp)| cmp(a, b))
    }
}

impl FromStr for SortField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SORT_FIELDS
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, field, _)| *field)
            .ok_or_else(|| RosterError::invalid_field(s))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses a direction. Exactly `"asc"` is ascending; anything else,
    /// including `"ASC"` and the empty string, is descending.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Stably orders `users` by `field` in `direction`.
pub fn order(users: &mut [User], field: SortField, direction: SortDirection) {
    match direction {
        SortDirection::Asc => users.sort_by(|a, b| field.compare(a, b)),
        SortDirection::Desc => users.sort_by(|a, b| field.compare(b, a)),
    }
}
