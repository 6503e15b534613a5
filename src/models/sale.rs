use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One recorded transaction against a product. Revenue, cost and margin are
/// fixed at insert time and never recomputed on read.
#[derive(Debug, FromRow)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
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
