use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::customer::{
    Customer as DomainCustomer, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: Option<NaiveDate>,
    pub membership: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCustomer<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: Option<NaiveDate>,
    pub membership: &'a str,
}

impl From<Customer> for DomainCustomer {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            birth_date: value.birth_date,
            membership: value.membership.as_str().into(),
        }
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(value: &'a DomainNewCustomer) -> Self {
        Self {
            first_name: value.first_name.as_str(),
            last_name: value.last_name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            birth_date: value.birth_date,
            membership: value.membership.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCustomer> for UpdateCustomer<'a> {
    fn from(value: &'a DomainUpdateCustomer) -> Self {
        Self {
            first_name: value.first_name.as_str(),
            last_name: value.last_name.as_str(),
            email: value.email.as_str(),
            phone: value.phone.as_str(),
            birth_date: value.birth_date,
            membership: value.membership.as_str(),
        }
    }
}
