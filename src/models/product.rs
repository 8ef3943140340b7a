use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i32,
    pub inventory: i32,
    pub last_update: NaiveDateTime,
    pub collection_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub price_cents: i32,
    pub inventory: i32,
    pub collection_id: i32,
}

// last_update is deliberately absent: the store stamps it via trigger.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub price_cents: i32,
    pub inventory: i32,
    pub collection_id: i32,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            title: value.title,
            slug: value.slug,
            description: value.description,
            price_cents: value.price_cents,
            inventory: value.inventory,
            last_update: value.last_update,
            collection_id: value.collection_id,
            promotions: Vec::new(),
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            title: value.title.as_str(),
            slug: value.slug.as_str(),
            description: value.description.as_str(),
            price_cents: value.price_cents,
            inventory: value.inventory,
            collection_id: value.collection_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            title: value.title.as_str(),
            slug: value.slug.as_str(),
            description: value.description.as_str(),
            price_cents: value.price_cents,
            inventory: value.inventory,
            collection_id: value.collection_id,
        }
    }
}
