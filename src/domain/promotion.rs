use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pagination::Pagination;

/// Domain representation of a discount campaign that can be applied to
/// any number of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// Unique identifier of the promotion.
    pub id: i32,
    /// Human-readable title of the promotion.
    pub title: String,
    /// Longer description shown to shoppers.
    pub description: String,
    /// Discount as a fraction of the price, between 0 and 1.
    pub discount: f64,
}

/// Payload required to insert a new promotion.
#[derive(Debug, Clone, Validate)]
pub struct NewPromotion {
    pub title: String,
    pub description: String,
    #[validate(range(min = 0.0, max = 1.0))]
    pub discount: f64,
}

impl NewPromotion {
    pub fn new(title: impl Into<String>, discount: f64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            discount,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Replacement data applied when updating an existing promotion.
#[derive(Debug, Clone, Validate)]
pub struct UpdatePromotion {
    pub title: String,
    pub description: String,
    #[validate(range(min = 0.0, max = 1.0))]
    pub discount: f64,
}

impl UpdatePromotion {
    pub fn new(title: impl Into<String>, discount: f64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            discount,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Query definition used to list promotions.
#[derive(Debug, Clone)]
pub struct PromotionListQuery {
    /// Optional title search term.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for PromotionListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl PromotionListQuery {
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
