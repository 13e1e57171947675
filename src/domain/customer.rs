//! Customer entity
//!
//! Customers are created and updated by the upstream system; fracht only
//! reads them. The country field doubles as the export partition key.

use crate::domain::ids::CustomerId;
use serde::{Deserialize, Serialize};

/// A customer row as read from the source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer id
    pub id: CustomerId,

    /// Company name
    pub company: String,

    /// Street
    pub street: String,

    /// Additional street line (may be blank, never absent)
    pub street_extra: String,

    /// City
    pub city: String,

    /// Country code; the partition key for customer exports
    pub country: String,

    /// Postal code
    pub postal_code: String,

    /// Given name of the contact person
    pub given_name: String,

    /// Family name of the contact person
    pub family_name: String,

    /// Contact email address
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_clone_eq() {
        let customer = Customer {
            id: CustomerId::new(1),
            company: "Acme GmbH".to_string(),
            street: "Hauptstr. 1".to_string(),
            street_extra: String::new(),
            city: "Berlin".to_string(),
            country: "DE".to_string(),
            postal_code: "10115".to_string(),
            given_name: "Max".to_string(),
            family_name: "Muster".to_string(),
            email: "max@example.com".to_string(),
        };
        assert_eq!(customer.clone(), customer);
    }
}
