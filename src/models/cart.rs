use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::{
    Cart as DomainCart, CartItem as DomainCartItem, NewCartItem as DomainNewCartItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::carts)]
pub struct Cart {
    pub id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::cart_items)]
#[diesel(belongs_to(Cart, foreign_key = cart_id))]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct NewCartItem {
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl Cart {
    pub fn into_domain(self, items: Vec<CartItem>) -> DomainCart {
        DomainCart {
            id: self.id,
            created_at: self.created_at,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<CartItem> for DomainCartItem {
    fn from(value: CartItem) -> Self {
        Self {
            id: value.id,
            cart_id: value.cart_id,
            product_id: value.product_id,
            quantity: value.quantity,
        }
    }
}

impl From<&DomainNewCartItem> for NewCartItem {
    fn from(value: &DomainNewCartItem) -> Self {
        Self {
            cart_id: value.cart_id,
            product_id: value.product_id,
            quantity: value.quantity,
        }
    }
}
