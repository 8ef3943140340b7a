use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::promotion::Promotion;
use crate::pagination::Pagination;

/// Prices are fixed-point cents; six digits caps a price at 9999.99.
pub const PRICE_CENTS_MAX: i32 = 999_999;

/// Domain representation of a sellable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable title of the product.
    pub title: String,
    /// URL-safe identifier derived from the title.
    pub slug: String,
    /// Longer description shown to shoppers.
    pub description: String,
    /// Price in cents, capped at 9999.99.
    pub price_cents: i32,
    /// Units currently in stock. Plain counter; the schema does not
    /// forbid negative values.
    pub inventory: i32,
    /// Maintained by the store on every write to the row.
    pub last_update: NaiveDateTime,
    /// Collection the product belongs to.
    pub collection_id: i32,
    /// Promotions currently applied to the product.
    pub promotions: Vec<Promotion>,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, Validate)]
pub struct NewProduct {
    /// Human-readable title of the product.
    pub title: String,
    /// URL-safe identifier; defaults to `-` when none is supplied.
    pub slug: String,
    /// Longer description shown to shoppers.
    pub description: String,
    /// Price in cents.
    #[validate(range(min = 0, max = PRICE_CENTS_MAX))]
    pub price_cents: i32,
    /// Units in stock at creation time.
    pub inventory: i32,
    /// Collection the product belongs to.
    pub collection_id: i32,
}

impl NewProduct {
    /// Build a new product payload with the supplied details.
    pub fn new(title: impl Into<String>, price_cents: i32, collection_id: i32) -> Self {
        Self {
            title: title.into(),
            slug: "-".to_string(),
            description: String::new(),
            price_cents,
            inventory: 0,
            collection_id,
        }
    }

    /// Attach a URL-safe slug to the product payload.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the opening stock level.
    pub fn with_inventory(mut self, inventory: i32) -> Self {
        self.inventory = inventory;
        self
    }
}

/// Replacement data applied when updating an existing product.
/// `last_update` is stamped by the store and cannot be supplied here.
#[derive(Debug, Clone, Validate)]
pub struct UpdateProduct {
    pub title: String,
    pub slug: String,
    pub description: String,
    #[validate(range(min = 0, max = PRICE_CENTS_MAX))]
    pub price_cents: i32,
    pub inventory: i32,
    pub collection_id: i32,
}

impl UpdateProduct {
    pub fn new(title: impl Into<String>, price_cents: i32, collection_id: i32) -> Self {
        Self {
            title: title.into(),
            slug: "-".to_string(),
            description: String::new(),
            price_cents,
            inventory: 0,
            collection_id,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_inventory(mut self, inventory: i32) -> Self {
        self.inventory = inventory;
        self
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Optional title or description search term.
    pub search: Option<String>,
    /// Optional collection filter.
    pub collection_id: Option<i32>,
    /// Optional exact slug filter.
    pub slug: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            collection_id: None,
            slug: None,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to the title or description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter the results to products belonging to `collection_id`.
    pub fn collection(mut self, collection_id: i32) -> Self {
        self.collection_id = Some(collection_id);
        self
    }

    /// Filter the results by an exact slug match.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
