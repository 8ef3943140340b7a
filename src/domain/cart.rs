use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single product line within a shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Unique identifier of the cart line.
    pub id: i32,
    /// Cart the line belongs to.
    pub cart_id: i32,
    /// Product placed in the cart.
    pub product_id: i32,
    /// Number of units in the cart.
    pub quantity: i32,
}

/// Domain representation of an anonymous shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    /// Unique identifier of the cart.
    pub id: i32,
    /// Stamped once by the store when the cart row is created.
    pub created_at: NaiveDateTime,
    /// Product lines currently in the cart.
    pub items: Vec<CartItem>,
}

/// Payload required to add a product line to a cart.
#[derive(Debug, Clone, Validate, PartialEq, Eq)]
pub struct NewCartItem {
    pub cart_id: i32,
    pub product_id: i32,
    /// Number of units; must be a positive small integer.
    #[validate(range(min = 1, max = 32_767))]
    pub quantity: i32,
}

impl NewCartItem {
    pub fn new(cart_id: i32, product_id: i32, quantity: i32) -> Self {
        Self {
            cart_id,
            product_id,
            quantity,
        }
    }
}

/// Patch applied when changing the quantity of an existing cart line.
#[derive(Debug, Clone, Copy, Validate, PartialEq, Eq)]
pub struct UpdateCartItem {
    #[validate(range(min = 1, max = 32_767))]
    pub quantity: i32,
}

impl UpdateCartItem {
    pub fn new(quantity: i32) -> Self {
        Self { quantity }
    }
}
