use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
    OrderItem as DomainOrderItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub placed_at: NaiveDateTime,
    pub payment_status: String,
    pub customer_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i32,
}

// placed_at is deliberately absent: the store stamps it on insert.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub payment_status: &'a str,
    pub customer_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrder<'a> {
    pub payment_status: &'a str,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            placed_at: self.placed_at,
            payment_status: self.payment_status.as_str().into(),
            customer_id: self.customer_id,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OrderItem> for DomainOrderItem {
    fn from(value: OrderItem) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            payment_status: value.payment_status.as_str(),
            customer_id: value.customer_id,
        }
    }
}

impl NewOrderItem {
    pub fn from_domain(order_id: i32, value: &DomainNewOrderItem) -> Self {
        Self {
            order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
        }
    }
}
