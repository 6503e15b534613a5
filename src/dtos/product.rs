// src/dtos/product.rs
use serde::{Deserialize, Serialize};

// Numeric fields default to zero when the form leaves them blank.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: Option<String>,
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub suggested_price: f64,
    #[serde(default)]
    pub initial_stock: i64,
    pub classification: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub unit_cost: Option<f64>,
    pub suggested_price: Option<f64>,
    pub current_stock: Option<i64>,
    pub classification: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub unit_cost: f64,
    pub suggested_price: f64,
    pub initial_stock: i64,
    pub current_stock: i64,
    pub classification: Option<String>,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            sku: product.sku,
            unit_cost: product.unit_cost,
            suggested_price: product.suggested_price,
            initial_stock: product.initial_stock,
            current_stock: product.current_stock,
            classification: product.classification,
        }
    }
}
