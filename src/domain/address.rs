use serde::{Deserialize, Serialize};

/// Domain representation of a postal address. A customer may have any
/// number of addresses; they are removed together with the customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Unique identifier of the address.
    pub id: i32,
    pub street: String,
    pub city: String,
    /// Optional postal code.
    pub zip: Option<String>,
    /// Customer the address belongs to.
    pub customer_id: i32,
}

/// Payload required to insert a new address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub zip: Option<String>,
    pub customer_id: i32,
}

impl NewAddress {
    pub fn new(customer_id: i32, street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            zip: None,
            customer_id,
        }
    }

    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }
}

/// Replacement data applied when updating an existing address.
/// A `None` zip clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAddress {
    pub street: String,
    pub city: String,
    pub zip: Option<String>,
}

impl UpdateAddress {
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            zip: None,
        }
    }

    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }
}
