// src/dtos/sale.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub product_id: i64,
    pub sold_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    pub channel: Option<String>,
    pub external_ref: Option<String>,
}

/// Edit form fields. Revenue and margin are recomputed from whatever the
/// resulting quantity, unit price and cost total are.
#[derive(Debug, Deserialize)]
pub struct UpdateSaleRequest {
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub cost_total: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SaleResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub sold_at: Option<NaiveDateTime>,
    pub quantity: i64,
    pub unit_price: f64,
    pub revenue_total: f64,
    pub cost_total: f64,
    pub margin: f64,
    pub channel: Option<String>,
    pub external_ref: Option<String>,
    pub import_batch: Option<String>,
}

/// One import run, summarised for the batch listing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub import_batch: String,
    pub sale_count: i64,
    pub revenue_total: f64,
}

#[derive(Debug, Serialize)]
pub struct BatchDeleteResponse {
    pub import_batch: String,
    pub deleted: u64,
}
