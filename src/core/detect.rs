//! Change detection
//!
//! The change detector performs a full scan over one entity type and
//! decides, per entity, whether it must be (re-)exported:
//!
//! 1. No sync marker exists for the entity id → unsynced. The fingerprint
//!    is not computed in this case.
//! 2. Otherwise the current fingerprint is compared byte-for-byte against
//!    the stored one. Equal → synced, skip. Unequal → unsynced.
//!
//! Detection never mutates the tracking store; markers are written by the
//! export coordinator only. Cost is one table scan plus one marker lookup
//! per already-tracked entity, a deliberate full-scan design sized for
//! periodic batch export rather than high entity counts.

use crate::adapters::store::{CustomerRepository, MarkerStore, OrderRepository};
use crate::core::fingerprint;
use crate::domain::errors::TrackingError;
use crate::domain::{Customer, CustomerId, Fingerprint, Order, OrderId, Result};
use std::fmt::Display;
use std::sync::Arc;

/// Full-scan change detector over customers and orders
pub struct ChangeDetector {
    customers: Arc<dyn CustomerRepository>,
    orders: Arc<dyn OrderRepository>,
    customer_markers: Arc<dyn MarkerStore<CustomerId>>,
    order_markers: Arc<dyn MarkerStore<OrderId>>,
}

impl ChangeDetector {
    /// Create a new change detector over the given stores
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        orders: Arc<dyn OrderRepository>,
        customer_markers: Arc<dyn MarkerStore<CustomerId>>,
        order_markers: Arc<dyn MarkerStore<OrderId>>,
    ) -> Self {
        Self {
            customers,
            orders,
            customer_markers,
            order_markers,
        }
    }

    /// Return all customers that need to be exported
    ///
    /// # Errors
    ///
    /// Returns an error if the source table or the marker store cannot be
    /// read, or if a marker vanishes between existence check and load
    /// (single-writer invariant violation).
    pub async fn unsynced_customers(&self) -> Result<Vec<Customer>> {
        tracing::info!("Checking for unsynced customers");
        let all = self.customers.find_all().await?;
        let mut unsynced = Vec::new();
        for customer in all {
            if self
                .needs_export(&customer.id, &*self.customer_markers, || {
                    fingerprint::customer_fingerprint(&customer)
                })
                .await?
            {
                unsynced.push(customer);
            }
        }
        tracing::info!(count = unsynced.len(), "Found unsynced customers");
        Ok(unsynced)
    }

    /// Return all orders that need to be exported
    ///
    /// An order's fingerprint is derived from its upstream last-change
    /// marker only; see [`crate::core::fingerprint::order_fingerprint`].
    pub async fn unsynced_orders(&self) -> Result<Vec<Order>> {
        tracing::info!("Checking for unsynced orders");
        let all = self.orders.find_all().await?;
        let mut unsynced = Vec::new();
        for order in all {
            if self
                .needs_export(&order.id, &*self.order_markers, || {
                    fingerprint::order_fingerprint(&order)
                })
                .await?
            {
                unsynced.push(order);
            }
        }
        tracing::info!(count = unsynced.len(), "Found unsynced orders");
        Ok(unsynced)
    }

    /// Decide whether one entity needs export
    ///
    /// The fingerprint closure is only invoked when a marker exists.
    async fn needs_export<Id, F>(
        &self,
        id: &Id,
        markers: &dyn MarkerStore<Id>,
        current: F,
    ) -> Result<bool>
    where
        Id: Display + Send + Sync,
        F: FnOnce() -> Fingerprint,
    {
        if !markers.exists(id).await? {
            return Ok(true);
        }
        let marker = markers.find(id).await?.ok_or_else(|| {
            TrackingError::StaleMarker {
                entity_id: id.to_string(),
            }
        })?;
        Ok(!marker.matches(&current()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::MarkerTx;
    use crate::domain::{FrachtError, SyncMarker};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StubCustomers(Vec<Customer>);

    #[async_trait]
    impl CustomerRepository for StubCustomers {
        async fn find_all(&self) -> Result<Vec<Customer>> {
            Ok(self.0.clone())
        }

        async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
            Ok(self.0.iter().find(|c| c.id == id).cloned())
        }
    }

    struct StubOrders(Vec<Order>);

    #[async_trait]
    impl OrderRepository for StubOrders {
        async fn find_all(&self) -> Result<Vec<Order>> {
            Ok(self.0.clone())
        }
    }

    /// Marker store over a plain map; `begin` is unused in detector tests.
    struct MapMarkers<Id> {
        markers: Mutex<HashMap<String, SyncMarker<Id>>>,
        /// When set, `exists` reports true while `find` reports absent.
        stale: bool,
    }

    impl<Id: Display> MapMarkers<Id> {
        fn new(markers: Vec<SyncMarker<Id>>) -> Self {
            Self {
                markers: Mutex::new(
                    markers
                        .into_iter()
                        .map(|m| (m.entity_id.to_string(), m))
                        .collect(),
                ),
                stale: false,
            }
        }

        fn stale() -> Self {
            Self {
                markers: Mutex::new(HashMap::new()),
                stale: true,
            }
        }
    }

    #[async_trait]
    impl<Id> MarkerStore<Id> for MapMarkers<Id>
    where
        Id: Display + Clone + Send + Sync + 'static,
    {
        async fn exists(&self, id: &Id) -> Result<bool> {
            if self.stale {
                return Ok(true);
            }
            Ok(self.markers.lock().unwrap().contains_key(&id.to_string()))
        }

        async fn find(&self, id: &Id) -> Result<Option<SyncMarker<Id>>> {
            if self.stale {
                return Ok(None);
            }
            Ok(self.markers.lock().unwrap().get(&id.to_string()).cloned())
        }

        async fn find_all(&self) -> Result<Vec<SyncMarker<Id>>> {
            Ok(self.markers.lock().unwrap().values().cloned().collect())
        }

        async fn begin(&self) -> Result<Box<dyn MarkerTx<Id>>> {
            unimplemented!("not used by detector tests")
        }
    }

    fn customer(id: i64, city: &str) -> Customer {
        Customer {
            id: CustomerId::new(id),
            company: "Acme GmbH".to_string(),
            street: "Hauptstr. 1".to_string(),
            street_extra: String::new(),
            city: city.to_string(),
            country: "DE".to_string(),
            postal_code: "10115".to_string(),
            given_name: "Max".to_string(),
            family_name: "Muster".to_string(),
            email: "max@example.com".to_string(),
        }
    }

    fn detector_for(
        customers: Vec<Customer>,
        customer_markers: MapMarkers<CustomerId>,
    ) -> ChangeDetector {
        ChangeDetector::new(
            Arc::new(StubCustomers(customers)),
            Arc::new(StubOrders(Vec::new())),
            Arc::new(customer_markers),
            Arc::new(MapMarkers::<OrderId>::new(Vec::new())),
        )
    }

    #[tokio::test]
    async fn test_entity_without_marker_is_unsynced() {
        let detector = detector_for(vec![customer(1, "Berlin")], MapMarkers::new(Vec::new()));
        let unsynced = detector.unsynced_customers().await.unwrap();
        assert_eq!(unsynced.len(), 1);
        assert_eq!(unsynced[0].id, CustomerId::new(1));
    }

    #[tokio::test]
    async fn test_entity_with_matching_marker_is_synced() {
        let c = customer(1, "Berlin");
        let marker = SyncMarker::new(c.id, fingerprint::customer_fingerprint(&c));
        let detector = detector_for(vec![c], MapMarkers::new(vec![marker]));
        assert!(detector.unsynced_customers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_entity_with_differing_marker_is_unsynced() {
        let c = customer(1, "Berlin");
        let mut changed = c.clone();
        changed.city = "Hamburg".to_string();
        let marker = SyncMarker::new(c.id, fingerprint::customer_fingerprint(&changed));
        let detector = detector_for(vec![c], MapMarkers::new(vec![marker]));
        assert_eq!(detector.unsynced_customers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_marker_is_an_error() {
        let detector = detector_for(vec![customer(1, "Berlin")], MapMarkers::stale());
        let err = detector.unsynced_customers().await.unwrap_err();
        assert!(matches!(
            err,
            FrachtError::Tracking(TrackingError::StaleMarker { .. })
        ));
    }

    #[tokio::test]
    async fn test_order_without_marker_is_unsynced() {
        let order = Order {
            id: OrderId::new("order-1").unwrap(),
            article_number: "A-100".to_string(),
            created: "c".to_string(),
            last_change: "2025-01-02T09:30:00".to_string(),
            customer_id: CustomerId::new(1),
        };
        let detector = ChangeDetector::new(
            Arc::new(StubCustomers(Vec::new())),
            Arc::new(StubOrders(vec![order])),
            Arc::new(MapMarkers::<CustomerId>::new(Vec::new())),
            Arc::new(MapMarkers::<OrderId>::new(Vec::new())),
        );
        assert_eq!(detector.unsynced_orders().await.unwrap().len(), 1);
    }
}
