use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::address::Address;
use crate::domain::cart::{Cart, CartItem};
use crate::domain::collection::Collection;
use crate::domain::customer::Customer;
use crate::domain::order::{Order, OrderItem};
use crate::domain::product::Product;
use crate::domain::promotion::Promotion;
use crate::pagination::Pagination;

/// Domain representation of a tag attached to one object of one
/// registered entity kind. The target is identified by the pair
/// (`entity`, `object_id`) rather than a foreign key, so the row can
/// outlive the object it points to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaggedItem {
    /// Unique identifier of the tagged item.
    pub id: i32,
    /// Tag being attached.
    pub tag_id: i32,
    /// Kind key of the tagged object, as registered in the content-type
    /// registry (for example `product`).
    pub entity: String,
    /// Primary key of the tagged object within its kind's table.
    pub object_id: i32,
}

/// Payload required to attach a tag to an object.
#[derive(Debug, Clone, Validate, PartialEq, Eq)]
pub struct NewTaggedItem {
    /// Tag being attached.
    pub tag_id: i32,
    /// Kind key of the object being tagged.
    pub entity: String,
    /// Primary key of the object being tagged; only non-negative
    /// integer keys are supported.
    #[validate(range(min = 0))]
    pub object_id: i32,
}

impl NewTaggedItem {
    pub fn new(tag_id: i32, entity: impl Into<String>, object_id: i32) -> Self {
        Self {
            tag_id,
            entity: entity.into(),
            object_id,
        }
    }
}

/// Query definition used to list tagged items.
#[derive(Debug, Clone)]
pub struct TaggedItemListQuery {
    /// Optional tag filter.
    pub tag_id: Option<i32>,
    /// Optional entity-kind filter.
    pub entity: Option<String>,
    /// Optional object filter, meaningful together with `entity`.
    pub object_id: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for TaggedItemListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl TaggedItemListQuery {
    pub fn new() -> Self {
        Self {
            tag_id: None,
            entity: None,
            object_id: None,
            pagination: None,
        }
    }

    /// Filter the results to items carrying `tag_id`.
    pub fn for_tag(mut self, tag_id: i32) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    /// Filter the results to items tagging objects of `entity`.
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Filter the results to items tagging one specific object.
    pub fn object(mut self, entity: impl Into<String>, object_id: i32) -> Self {
        self.entity = Some(entity.into());
        self.object_id = Some(object_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// The object a tagged item points to, resolved through the entity-kind
/// registry. One variant per taggable core entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TaggedObject {
    Collection(Collection),
    Product(Product),
    Promotion(Promotion),
    Customer(Customer),
    Order(Order),
    OrderItem(OrderItem),
    Cart(Cart),
    CartItem(CartItem),
    Address(Address),
}

impl TaggedObject {
    /// Kind key of the wrapped object, matching the content-type registry.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Collection(_) => "collection",
            Self::Product(_) => "product",
            Self::Promotion(_) => "promotion",
            Self::Customer(_) => "customer",
            Self::Order(_) => "order",
            Self::OrderItem(_) => "order_item",
            Self::Cart(_) => "cart",
            Self::CartItem(_) => "cart_item",
            Self::Address(_) => "address",
        }
    }
}
