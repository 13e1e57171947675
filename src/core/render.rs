//! CSV payload rendering
//!
//! Maps entities to flat row representations and renders one UTF-8 encoded
//! CSV payload per partition group: one record per line, `\n` line
//! separator, no header row, fields quoted only when necessary.

use crate::domain::{Customer, FrachtError, Order, Result};

/// Content type reported to the object store for rendered payloads
pub const CONTENT_TYPE_CSV: &str = "text/csv";

/// Flat row representation of a customer
///
/// Column order: company, street, street-extra, city, country, postal code,
/// given name, family name, email, id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub company: String,
    pub street: String,
    pub street_extra: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub customer_id: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            company: customer.company.clone(),
            street: customer.street.clone(),
            street_extra: customer.street_extra.clone(),
            city: customer.city.clone(),
            country: customer.country.clone(),
            postal_code: customer.postal_code.clone(),
            given_name: customer.given_name.clone(),
            family_name: customer.family_name.clone(),
            email: customer.email.clone(),
            customer_id: customer.id.to_string(),
        }
    }
}

/// Flat row representation of an order
///
/// Column order: order id, article number, customer id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order_id: String,
    pub article_number: String,
    pub customer_id: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.to_string(),
            article_number: order.article_number.clone(),
            customer_id: order.customer_id.to_string(),
        }
    }
}

/// Render a list of customers into one CSV payload
pub fn customers_to_csv(customers: &[Customer]) -> Result<Vec<u8>> {
    let rows: Vec<CustomerRow> = customers.iter().map(CustomerRow::from).collect();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for row in &rows {
        writer
            .write_record([
                &row.company,
                &row.street,
                &row.street_extra,
                &row.city,
                &row.country,
                &row.postal_code,
                &row.given_name,
                &row.family_name,
                &row.email,
                &row.customer_id,
            ])
            .map_err(|e| FrachtError::Serialization(format!("Customer CSV generation failed: {e}")))?;
    }
    finish(writer)
}

/// Render a list of orders into one CSV payload
pub fn orders_to_csv(orders: &[Order]) -> Result<Vec<u8>> {
    let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for row in &rows {
        writer
            .write_record([&row.order_id, &row.article_number, &row.customer_id])
            .map_err(|e| FrachtError::Serialization(format!("Order CSV generation failed: {e}")))?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| FrachtError::Serialization(format!("CSV flush failed: {}", e.error())))
}
