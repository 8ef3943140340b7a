use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::{PRICE_CENTS_MAX, Product};
use crate::pagination::Pagination;

/// Payment lifecycle of an order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment has not been taken yet.
    Pending,
    /// Payment has been captured.
    Complete,
    /// Payment was attempted and declined.
    Failed,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl PaymentStatus {
    /// Stored form of the state, as persisted in the payment_status column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "complete" => Self::Complete,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// A single product line within an order. `unit_price_cents` is the
/// price captured when the order was placed, not the product's current
/// price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    /// Unique identifier of the order line.
    pub id: i32,
    /// Order the line belongs to.
    pub order_id: i32,
    /// Product the line references.
    pub product_id: i32,
    /// Number of units ordered.
    pub quantity: i32,
    /// Unit price in cents at the time the order was placed.
    pub unit_price_cents: i32,
}

/// Domain representation of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Stamped once by the store when the order row is created.
    pub placed_at: NaiveDateTime,
    /// Current payment lifecycle state.
    pub payment_status: PaymentStatus,
    /// Customer who placed the order.
    pub customer_id: i32,
    /// Product lines belonging to the order.
    pub items: Vec<OrderItem>,
}

/// Payload for a single product line of a new order.
#[derive(Debug, Clone, Validate, PartialEq, Eq)]
pub struct NewOrderItem {
    /// Product the line references.
    pub product_id: i32,
    /// Number of units ordered; must be a positive small integer.
    #[validate(range(min = 1, max = 32_767))]
    pub quantity: i32,
    /// Unit price in cents captured for this order.
    #[validate(range(min = 0, max = PRICE_CENTS_MAX))]
    pub unit_price_cents: i32,
}

impl NewOrderItem {
    pub fn new(product_id: i32, quantity: i32, unit_price_cents: i32) -> Self {
        Self {
            product_id,
            quantity,
            unit_price_cents,
        }
    }

    /// Build a line for `product`, snapshotting its current price.
    pub fn priced_from(product: &Product, quantity: i32) -> Self {
        Self::new(product.id, quantity, product.price_cents)
    }
}

/// Payload required to insert a new order.
#[derive(Debug, Clone, Validate)]
pub struct NewOrder {
    /// Customer placing the order.
    pub customer_id: i32,
    /// Initial payment state; defaults to pending.
    pub payment_status: PaymentStatus,
    /// Product lines to create alongside the order.
    #[validate(nested)]
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Build a new order payload for `customer_id` with no lines yet.
    pub fn new(customer_id: i32) -> Self {
        Self {
            customer_id,
            payment_status: PaymentStatus::default(),
            items: Vec::new(),
        }
    }

    /// Override the default payment state for the new order.
    pub fn with_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Append a product line to the order payload.
    pub fn with_item(mut self, item: NewOrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replace the product lines of the order payload.
    pub fn with_items(mut self, items: Vec<NewOrderItem>) -> Self {
        self.items = items;
        self
    }
}

/// Patch data applied when updating an existing order. `placed_at` and
/// the owning customer are fixed at creation time.
#[derive(Debug, Clone, Validate)]
pub struct UpdateOrder {
    /// Optional payment state update.
    pub payment_status: Option<PaymentStatus>,
    /// Optional full replacement of the order's product lines.
    #[validate(nested)]
    pub items: Option<Vec<NewOrderItem>>,
}

impl Default for UpdateOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateOrder {
    pub fn new() -> Self {
        Self {
            payment_status: None,
            items: None,
        }
    }

    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    pub fn items(mut self, items: Vec<NewOrderItem>) -> Self {
        self.items = Some(items);
        self
    }
}

/// Query definition used to list orders.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    /// Optional payment state filter.
    pub payment_status: Option<PaymentStatus>,
    /// Optional customer filter.
    pub customer_id: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self {
            payment_status: None,
            customer_id: None,
            pagination: None,
        }
    }

    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_round_trips_through_strings() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Complete,
            PaymentStatus::Failed,
        ] {
            assert_eq!(PaymentStatus::from(status.as_str()), status);
        }
        assert_eq!(PaymentStatus::from("refunded"), PaymentStatus::Pending);
    }

    #[test]
    fn order_rejects_zero_quantity_line() {
        let order = NewOrder::new(1).with_item(NewOrderItem::new(1, 0, 500));
        assert!(order.validate().is_err());
    }

    #[test]
    fn order_rejects_oversized_quantity_line() {
        let order = NewOrder::new(1).with_item(NewOrderItem::new(1, 40_000, 500));
        assert!(order.validate().is_err());
    }
}
