//! Order entity
//!
//! Orders reference a customer; the export partition key is resolved via
//! that customer's country. Read-only from fracht's perspective.

use crate::domain::ids::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

/// An order row as read from the source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id
    pub id: OrderId,

    /// Article number of the ordered item
    pub article_number: String,

    /// Creation marker string set by the upstream system
    pub created: String,

    /// Last-change marker string set by the upstream system.
    ///
    /// This is the only field that feeds the order fingerprint: an order is
    /// re-detected only when the upstream system advances this value.
    pub last_change: String,

    /// Id of the customer this order belongs to
    pub customer_id: CustomerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clone_eq() {
        let order = Order {
            id: OrderId::new("order-1").unwrap(),
            article_number: "A-100".to_string(),
            created: "2025-01-01T08:00:00".to_string(),
            last_change: "2025-01-02T09:30:00".to_string(),
            customer_id: CustomerId::new(1),
        };
        assert_eq!(order.clone(), order);
    }
}
