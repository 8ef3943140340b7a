use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pagination::Pagination;

lazy_static! {
    /// Phone numbers are stored as exactly ten digits, no separators.
    static ref PHONE_REGEX: Regex = Regex::new(r"^\d{10}$").expect("valid phone regex");
}

/// Loyalty tier assigned to a customer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    Bronze,
    Silver,
    Gold,
}

impl Default for Membership {
    fn default() -> Self {
        Self::Bronze
    }
}

impl Membership {
    /// Stored form of the tier, as persisted in the membership column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }
}

impl From<&str> for Membership {
    fn from(value: &str) -> Self {
        match value {
            "silver" => Self::Silver,
            "gold" => Self::Gold,
            _ => Self::Bronze,
        }
    }
}

/// Domain representation of a customer account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Primary email address, unique across customers and stored in
    /// lowercase for comparisons.
    pub email: String,
    /// Ten-digit phone number.
    pub phone: String,
    /// Optional date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Loyalty tier; new customers start at bronze.
    pub membership: Membership,
}

/// Payload required to insert a new customer.
#[derive(Debug, Clone, Validate)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX, message = "phone number must be exactly ten digits"))]
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}

impl NewCustomer {
    /// Build a new customer payload while normalising the email to lowercase.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into().to_lowercase(),
            phone: phone.into(),
            birth_date: None,
            membership: Membership::default(),
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.membership = membership;
        self
    }
}

/// Replacement data applied when updating an existing customer.
/// A `None` birth date clears the stored value.
#[derive(Debug, Clone, Validate)]
pub struct UpdateCustomer {
    pub first_name: String,
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *PHONE_REGEX, message = "phone number must be exactly ten digits"))]
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}

impl UpdateCustomer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into().to_lowercase(),
            phone: phone.into(),
            birth_date: None,
            membership: Membership::default(),
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.membership = membership;
        self
    }
}

/// Query definition used to list customers.
#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    /// Optional search term applied to names and email.
    pub search: Option<String>,
    /// Optional loyalty tier filter.
    pub membership: Option<Membership>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl Default for CustomerListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self {
            search: None,
            membership: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn membership(mut self, membership: Membership) -> Self {
        self.membership = Some(membership);
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

    fn payload(phone: &str) -> NewCustomer {
        NewCustomer::new("Jane", "Doe", "jane@example.com", phone)
    }

    #[test]
    fn accepts_ten_digit_phone() {
        assert!(payload("5551234567").validate().is_ok());
    }

    #[test]
    fn rejects_short_phone() {
        assert!(payload("12345").validate().is_err());
    }

    #[test]
    fn rejects_long_phone() {
        assert!(payload("12345678901").validate().is_err());
    }

    #[test]
    fn rejects_formatted_phone() {
        assert!(payload("555-123-456").validate().is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        let new_customer = NewCustomer::new("Jane", "Doe", "not-an-email", "5551234567");
        assert!(new_customer.validate().is_err());
    }

    #[test]
    fn normalises_email_to_lowercase() {
        let new_customer = NewCustomer::new("Jane", "Doe", "Jane@Example.COM", "5551234567");
        assert_eq!(new_customer.email, "jane@example.com");
    }

    #[test]
    fn membership_round_trips_through_strings() {
        for membership in [Membership::Bronze, Membership::Silver, Membership::Gold] {
            assert_eq!(Membership::from(membership.as_str()), membership);
        }
        // Unknown values fall back to the default tier.
        assert_eq!(Membership::from("platinum"), Membership::Bronze);
    }

    #[test]
    fn membership_serialises_as_snake_case() {
        let json = serde_json::to_string(&Membership::Gold).unwrap();
        assert_eq!(json, "\"gold\"");
    }
}
