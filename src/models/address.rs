use diesel::prelude::*;

use crate::domain::address::{
    Address as DomainAddress, NewAddress as DomainNewAddress, UpdateAddress as DomainUpdateAddress,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct Address {
    pub id: i32,
    pub street: String,
    pub city: String,
    pub zip: Option<String>,
    pub customer_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
pub struct NewAddress<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub zip: Option<&'a str>,
    pub customer_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAddress<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub zip: Option<&'a str>,
}

impl From<Address> for DomainAddress {
    fn from(value: Address) -> Self {
        Self {
            id: value.id,
            street: value.street,
            city: value.city,
            zip: value.zip,
            customer_id: value.customer_id,
        }
    }
}

impl<'a> From<&'a DomainNewAddress> for NewAddress<'a> {
    fn from(value: &'a DomainNewAddress) -> Self {
        Self {
            street: value.street.as_str(),
            city: value.city.as_str(),
            zip: value.zip.as_deref(),
            customer_id: value.customer_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateAddress> for UpdateAddress<'a> {
    fn from(value: &'a DomainUpdateAddress) -> Self {
        Self {
            street: value.street.as_str(),
            city: value.city.as_str(),
            zip: value.zip.as_deref(),
        }
    }
}
