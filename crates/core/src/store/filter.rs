//! Visitor search filters and pagination

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Visitor;

/// Page size used when none (or zero) is requested
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Offset/limit window over a result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// A limit of zero falls back to [`DEFAULT_PAGE_SIZE`]
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: if limit == 0 { DEFAULT_PAGE_SIZE } else { limit },
        }
    }

    /// Slice `items` to this window
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset)
            .take(self.limit)
            .cloned()
            .collect()
    }
}

/// A page of results plus the total before pagination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub count: usize,
}

/// Visitor search criteria, combined with AND
///
/// Text criteria are case-insensitive substring matches. The creation range
/// is inclusive on both ends.
#[derive(Debug, Clone, Default)]
pub struct VisitorFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub gov_id_no: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub pagination: Pagination,
}

impl VisitorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, needle: impl Into<String>) -> Self {
        self.first_name = Some(needle.into());
        self
    }

    pub fn last_name(mut self, needle: impl Into<String>) -> Self {
        self.last_name = Some(needle.into());
        self
    }

    pub fn phone(mut self, needle: impl Into<String>) -> Self {
        self.phone = Some(needle.into());
        self
    }

    pub fn gov_id_no(mut self, needle: impl Into<String>) -> Self {
        self.gov_id_no = Some(needle.into());
        self
    }

    pub fn created_between(
        mut self,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_after = after;
        self.created_before = before;
        self
    }

    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.pagination = Pagination::new(offset, limit);
        self
    }

    pub fn matches(&self, visitor: &Visitor) -> bool {
        contains_ignore_case(&visitor.first_name, self.first_name.as_deref())
            && contains_ignore_case(&visitor.last_name, self.last_name.as_deref())
            && contains_ignore_case(&visitor.phone_number, self.phone.as_deref())
            && contains_ignore_case(&visitor.gov_id_no, self.gov_id_no.as_deref())
            && self.created_after.map_or(true, |t| visitor.created_on >= t)
            && self.created_before.map_or(true, |t| visitor.created_on <= t)
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}
