//! Content fingerprinting for change detection
//!
//! This module computes stable fingerprints over entity content. Field
//! values are trimmed of leading/trailing whitespace, joined in a fixed
//! type-specific order with a `|` delimiter, and hashed with SHA-256 over
//! the UTF-8 byte encoding; the result is rendered as a lower-case hex
//! string. Equal trimmed inputs always yield the identical digest; there is
//! no randomness and no locale dependence.

use crate::domain::{Customer, Fingerprint, Order};
use sha2::{Digest, Sha256};

/// Delimiter used to join trimmed field values before hashing.
///
/// Must not occur inside a trimmed field value; this is a contract with the
/// upstream system, not validated here.
const FIELD_DELIMITER: &str = "|";

/// Compute the fingerprint of an ordered list of field values
///
/// Each value is trimmed, the trimmed values are joined with `|`, and the
/// joined string is hashed.
///
/// # Examples
///
/// ```
/// use fracht::core::fingerprint::fields_fingerprint;
///
/// let padded = fields_fingerprint(&[" a ", " b "]);
/// let trimmed = fields_fingerprint(&["a", "b"]);
/// assert_eq!(padded, trimmed);
/// ```
pub fn fields_fingerprint(fields: &[&str]) -> Fingerprint {
    let joined = fields
        .iter()
        .map(|f| f.trim())
        .collect::<Vec<_>>()
        .join(FIELD_DELIMITER);
    Fingerprint::from_hex(digest_hex(&joined))
}

/// Compute the row fingerprint for a customer
///
/// Input order: company name, street, street-extra, city, country, postal
/// code, given name, family name, email, id-as-string.
pub fn customer_fingerprint(customer: &Customer) -> Fingerprint {
    let id = customer.id.to_string();
    fields_fingerprint(&[
        &customer.company,
        &customer.street,
        &customer.street_extra,
        &customer.city,
        &customer.country,
        &customer.postal_code,
        &customer.given_name,
        &customer.family_name,
        &customer.email,
        &id,
    ])
}

/// Compute the marker fingerprint for an order
///
/// Only the upstream last-change marker feeds the digest, not the full
/// row. A changed order is detected only when the upstream system advances
/// this one field.
pub fn order_fingerprint(order: &Order) -> Fingerprint {
    Fingerprint::from_hex(digest_hex(order.last_change.trim()))
}

/// SHA-256 hex digest of the given input string (UTF-8)
fn digest_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{CustomerId, OrderId};
    use test_case::test_case;

    fn sample_customer() -> Customer {
        Customer {
            id: CustomerId::new(1),
            company: "a".to_string(),
            street: "b".to_string(),
            street_extra: String::new(),
            city: "c".to_string(),
            country: "d".to_string(),
            postal_code: "e".to_string(),
            given_name: "f".to_string(),
            family_name: "g".to_string(),
            email: "h".to_string(),
        }
    }

    #[test]
    fn test_digest_hex_known_vector() {
        // SHA-256("abc"), per FIPS 180-2 test vectors
        assert_eq!(
            digest_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let customer = sample_customer();
        assert_eq!(customer_fingerprint(&customer), customer_fingerprint(&customer));
    }

    #[test]
    fn test_fingerprint_shape() {
        let fp = fields_fingerprint(&["x"]);
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(fp.as_str(), fp.as_str().to_lowercase());
    }

    #[test]
    fn test_whitespace_is_insensitive() {
        let padded =
            fields_fingerprint(&[" a ", " b ", " ", " c ", " d ", " e ", " f ", " g ", " h ", " 1 "]);
        let trimmed = fields_fingerprint(&["a", "b", "", "c", "d", "e", "f", "g", "h", "1"]);
        assert_eq!(padded, trimmed);
        assert_eq!(padded.as_str(), digest_hex("a|b||c|d|e|f|g|h|1"));
    }

    #[test]
    fn test_customer_fingerprint_matches_joined_fields() {
        let customer = sample_customer();
        assert_eq!(
            customer_fingerprint(&customer).as_str(),
            digest_hex("a|b||c|d|e|f|g|h|1")
        );
    }

    #[test_case(|c: &mut Customer| c.company = "x".to_string(); "company")]
    #[test_case(|c: &mut Customer| c.street = "x".to_string(); "street")]
    #[test_case(|c: &mut Customer| c.street_extra = "x".to_string(); "street_extra")]
    #[test_case(|c: &mut Customer| c.city = "x".to_string(); "city")]
    #[test_case(|c: &mut Customer| c.country = "x".to_string(); "country")]
    #[test_case(|c: &mut Customer| c.postal_code = "x".to_string(); "postal_code")]
    #[test_case(|c: &mut Customer| c.given_name = "x".to_string(); "given_name")]
    #[test_case(|c: &mut Customer| c.family_name = "x".to_string(); "family_name")]
    #[test_case(|c: &mut Customer| c.email = "x".to_string(); "email")]
    #[test_case(|c: &mut Customer| c.id = CustomerId::new(2); "id")]
    fn test_any_single_field_change_changes_fingerprint(mutate: fn(&mut Customer)) {
        let original = sample_customer();
        let mut changed = original.clone();
        mutate(&mut changed);
        assert_ne!(customer_fingerprint(&original), customer_fingerprint(&changed));
    }

    #[test]
    fn test_order_fingerprint_uses_only_last_change() {
        let order = Order {
            id: OrderId::new("order-1").unwrap(),
            article_number: "A-100".to_string(),
            created: "2025-01-01T08:00:00".to_string(),
            last_change: "2025-01-02T09:30:00".to_string(),
            customer_id: CustomerId::new(1),
        };

        let mut other_fields_changed = order.clone();
        other_fields_changed.article_number = "B-200".to_string();
        other_fields_changed.created = "2025-06-01T00:00:00".to_string();
        assert_eq!(
            order_fingerprint(&order),
            order_fingerprint(&other_fields_changed)
        );

        let mut marker_bumped = order.clone();
        marker_bumped.last_change = "2025-01-03T10:00:00".to_string();
        assert_ne!(order_fingerprint(&order), order_fingerprint(&marker_bumped));
    }

    #[test]
    fn test_order_fingerprint_trims_marker() {
        let mut order = Order {
            id: OrderId::new("order-1").unwrap(),
            article_number: "A-100".to_string(),
            created: "c".to_string(),
            last_change: "2025-01-02T09:30:00".to_string(),
            customer_id: CustomerId::new(1),
        };
        let plain = order_fingerprint(&order);
        order.last_change = "  2025-01-02T09:30:00  ".to_string();
        assert_eq!(order_fingerprint(&order), plain);
    }
}
