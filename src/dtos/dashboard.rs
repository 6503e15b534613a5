// src/dtos/dashboard.rs
use serde::Serialize;

/// A product name paired with an aggregate (quantity sold or summed margin).
#[derive(Debug, Serialize)]
pub struct ProductAggregate {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_products: i64,
    pub total_stock: i64,
    pub revenue_total: f64,
    pub margin_total: f64,
    /// Average margin percentage over sales with positive revenue.
    pub avg_margin_pct: f64,
    pub avg_unit_price: f64,
    pub best_seller: Option<ProductAggregate>,
    pub most_profitable: Option<ProductAggregate>,
    pub least_profitable: Option<ProductAggregate>,
}
