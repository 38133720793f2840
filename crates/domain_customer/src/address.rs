//! Address value object

use serde::{Deserialize, Serialize};

/// A postal address embedded in a customer record
///
/// Has no identity of its own. Every field is required once the owning
/// customer exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Address {
    /// Creates a new address
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
            country: country.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_field_order() {
        let address = Address::new("Av. Arequipa 123", "Lima", "Lima", "15046", "Peru");
        assert_eq!(address.street, "Av. Arequipa 123");
        assert_eq!(address.zip_code, "15046");
        assert_eq!(address.country, "Peru");
    }
}
