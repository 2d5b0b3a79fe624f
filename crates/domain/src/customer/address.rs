use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require};

/// Postal address of a customer.
///
/// Immutable: a customer moving gets a new `Address`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AddressFields")]
pub struct Address {
    street: String,
    number: i32,
    zip: String,
    city: String,
}

impl Address {
    /// Creates a validated address.
    pub fn new(
        street: impl Into<String>,
        number: i32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };

        require(&address.street, ValidationError::StreetRequired)?;
        if address.number <= 0 {
            return Err(ValidationError::NumberRequired);
        }
        require(&address.zip, ValidationError::ZipRequired)?;
        require(&address.city, ValidationError::CityRequired)?;

        Ok(address)
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Wire shape of an [`Address`], validated through [`Address::new`].
#[derive(Deserialize)]
struct AddressFields {
    street: String,
    number: i32,
    zip: String,
    city: String,
}

impl TryFrom<AddressFields> for Address {
    type Error = ValidationError;

    fn try_from(fields: AddressFields) -> Result<Self, Self::Error> {
        Address::new(fields.street, fields.number, fields.zip, fields.city)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}
