//! Source table repositories
//!
//! Read-only access to the upstream `kunde` and `auftraege` tables. Column
//! names follow the upstream schema; they are mapped to the domain types
//! here and nowhere else.

use crate::adapters::postgres::client::PostgresClient;
use crate::adapters::store::{CustomerRepository, OrderRepository};
use crate::domain::errors::TrackingError;
use crate::domain::{Customer, CustomerId, Order, OrderId, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::Row;

const SELECT_CUSTOMERS: &str = "SELECT kundenid, firmenname, strasse, strassenzusatz, ort, land, \
     plz, vorname, nachname, email FROM kunde";

const SELECT_ORDERS: &str =
    "SELECT auftragid, artikelnummer, created, lastchange, kundeid FROM auftraege";

/// Customer repository over the `kunde` table
pub struct PgCustomerRepository {
    client: Arc<PostgresClient>,
}

impl PgCustomerRepository {
    /// Create a repository over the given client
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>> {
        let client = self.client.get().await?;
        let rows = client
            .query(SELECT_CUSTOMERS, &[])
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Customer scan failed: {}", e)))?;
        rows.iter().map(map_customer).collect()
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>> {
        let client = self.client.get().await?;
        let query = format!("{SELECT_CUSTOMERS} WHERE kundenid = $1");
        let row = client
            .query_opt(query.as_str(), &[&id.value()])
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Customer lookup failed: {}", e)))?;
        row.as_ref().map(map_customer).transpose()
    }
}

fn map_customer(row: &Row) -> Result<Customer> {
    let get = |column: &str| -> Result<String> {
        row.try_get(column)
            .map_err(|e| TrackingError::RowMapping(format!("kunde.{column}: {e}")).into())
    };
    Ok(Customer {
        id: CustomerId::new(
            row.try_get("kundenid")
                .map_err(|e| TrackingError::RowMapping(format!("kunde.kundenid: {e}")))?,
        ),
        company: get("firmenname")?,
        street: get("strasse")?,
        street_extra: get("strassenzusatz")?,
        city: get("ort")?,
        country: get("land")?,
        postal_code: get("plz")?,
        given_name: get("vorname")?,
        family_name: get("nachname")?,
        email: get("email")?,
    })
}

/// Order repository over the `auftraege` table
pub struct PgOrderRepository {
    client: Arc<PostgresClient>,
}

impl PgOrderRepository {
    /// Create a repository over the given client
    pub fn new(client: Arc<PostgresClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>> {
        let client = self.client.get().await?;
        let rows = client
            .query(SELECT_ORDERS, &[])
            .await
            .map_err(|e| TrackingError::QueryFailed(format!("Order scan failed: {}", e)))?;
        rows.iter().map(map_order).collect()
    }
}

fn map_order(row: &Row) -> Result<Order> {
    let get = |column: &str| -> Result<String> {
        row.try_get(column)
            .map_err(|e| TrackingError::RowMapping(format!("auftraege.{column}: {e}")).into())
    };
    let id = OrderId::new(get("auftragid")?)
        .map_err(|e| TrackingError::RowMapping(format!("auftraege.auftragid: {e}")))?;
    // The upstream stores the customer reference as text.
    let customer_id: i64 = get("kundeid")?.parse().map_err(|e| {
        TrackingError::RowMapping(format!("auftraege.kundeid is not numeric: {e}"))
    })?;
    Ok(Order {
        id,
        article_number: get("artikelnummer")?,
        created: get("created")?,
        last_change: get("lastchange")?,
        customer_id: CustomerId::new(customer_id),
    })
}
