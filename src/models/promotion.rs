use diesel::prelude::*;

use crate::domain::promotion::{
    NewPromotion as DomainNewPromotion, Promotion as DomainPromotion,
    UpdatePromotion as DomainUpdatePromotion,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::promotions)]
pub struct Promotion {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub discount: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::promotions)]
pub struct NewPromotion<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub discount: f64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::promotions)]
pub struct UpdatePromotion<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub discount: f64,
}

/// Join row linking a product to a promotion.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::product_promotions)]
pub struct ProductPromotion {
    pub product_id: i32,
    pub promotion_id: i32,
}

impl From<Promotion> for DomainPromotion {
    fn from(value: Promotion) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            discount: value.discount,
        }
    }
}

impl<'a> From<&'a DomainNewPromotion> for NewPromotion<'a> {
    fn from(value: &'a DomainNewPromotion) -> Self {
        Self {
            title: value.title.as_str(),
            description: value.description.as_str(),
            discount: value.discount,
        }
    }
}

impl<'a> From<&'a DomainUpdatePromotion> for UpdatePromotion<'a> {
    fn from(value: &'a DomainUpdatePromotion) -> Self {
        Self {
            title: value.title.as_str(),
            description: value.description.as_str(),
            discount: value.discount,
        }
    }
}
