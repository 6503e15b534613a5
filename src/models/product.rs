use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub unit_cost: f64,
    pub suggested_price: f64,
    pub initial_stock: i64,
    pub current_stock: i64,
    pub classification: Option<String>,
}
