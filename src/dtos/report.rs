// src/dtos/report.rs
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProfitReportRow {
    pub product_name: String,
    pub quantity: i64,
    pub revenue: f64,
    pub cost: f64,
    pub margin: f64,
}

#[derive(Debug, Serialize)]
pub struct StockRow {
    pub product_name: String,
    pub sku: Option<String>,
    pub current_stock: i64,
    pub unit_cost: f64,
}

/// Non-secret runtime configuration, for the settings view.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub database_url: String,
    pub upload_dir: String,
    pub secret_key_set: bool,
}
