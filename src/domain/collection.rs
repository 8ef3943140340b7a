use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a curated group of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    /// Unique identifier of the collection.
    pub id: i32,
    /// Human-readable title of the collection.
    pub title: String,
    /// Optional product showcased for this collection. Cleared by the
    /// store when the featured product is deleted.
    pub featured_product_id: Option<i32>,
}

/// Payload required to insert a new collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollection {
    pub title: String,
    pub featured_product_id: Option<i32>,
}

impl NewCollection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            featured_product_id: None,
        }
    }

    /// Showcase an existing product on the new collection.
    pub fn with_featured_product(mut self, product_id: i32) -> Self {
        self.featured_product_id = Some(product_id);
        self
    }
}

/// Replacement data applied when updating an existing collection.
/// A `None` featured product clears the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCollection {
    pub title: String,
    pub featured_product_id: Option<i32>,
}

impl UpdateCollection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            featured_product_id: None,
        }
    }

    pub fn with_featured_product(mut self, product_id: i32) -> Self {
        self.featured_product_id = Some(product_id);
        self
    }
}

/// Query definition used to list collections.
#[derive(Debug, Clone)]
pub struct CollectionListQuery {
    /// Optional title search term.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for CollectionListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to the title.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
