use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a reusable label that can be attached to
/// any registered entity kind through a tagged item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Human-readable label of the tag.
    pub label: String,
}

/// Payload required to insert a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub label: String,
}

impl NewTag {
    /// Construct a new tag payload with a trimmed label.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into().trim().to_string();
        Self { label }
    }
}

/// Replacement data applied when updating an existing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTag {
    pub label: String,
}

impl UpdateTag {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into().trim().to_string();
        Self { label }
    }
}

/// Query definition used to list tags.
#[derive(Debug, Clone)]
pub struct TagListQuery {
    /// Optional case-insensitive substring search on the label.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for TagListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl TagListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
