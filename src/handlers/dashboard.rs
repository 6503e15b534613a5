// src/handlers/dashboard.rs
use axum::{extract::State, Json};
use sqlx::SqlitePool;

use crate::dtos::dashboard::{DashboardResponse, ProductAggregate};
use crate::error::AppError;
use crate::state::AppState;
use tracing::instrument;

async fn top_product(db_pool: &SqlitePool, sql: &str) -> Result<Option<ProductAggregate>, AppError> {
    let row = sqlx::query_as::<_, (String, f64)>(sql)
        .fetch_optional(db_pool)
        .await?;
    Ok(row.map(|(name, value)| ProductAggregate { name, value }))
}

// GET /dashboard - Aggregate overview of catalog and sales
#[instrument(skip(state))]
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let db_pool = &state.db_pool;

    let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(db_pool)
        .await?;

    let total_stock: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(current_stock), 0) FROM products")
            .fetch_one(db_pool)
            .await?;

    let revenue_total: f64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(revenue_total), 0.0) FROM sales")
            .fetch_one(db_pool)
            .await?;

    let margin_total: f64 = sqlx::query_scalar("SELECT COALESCE(SUM(margin), 0.0) FROM sales")
        .fetch_one(db_pool)
        .await?;

    // Average margin % only over sales that actually brought revenue.
    let avg_margin_pct: f64 = sqlx::query_scalar(
        r#"SELECT COALESCE(
               AVG(
                   CASE WHEN revenue_total > 0
                        THEN (margin / revenue_total) * 100
                        ELSE NULL END
               ), 0.0)
           FROM sales"#,
    )
    .fetch_one(db_pool)
    .await?;

    let avg_unit_price: f64 =
        sqlx::query_scalar("SELECT COALESCE(AVG(unit_price), 0.0) FROM sales")
            .fetch_one(db_pool)
            .await?;

    let best_seller = top_product(
        db_pool,
        r#"SELECT p.name, CAST(SUM(s.quantity) AS REAL) AS qty
           FROM sales s JOIN products p ON p.id = s.product_id
           GROUP BY p.id ORDER BY qty DESC LIMIT 1"#,
    )
    .await?;

    let most_profitable = top_product(
        db_pool,
        r#"SELECT p.name, SUM(s.margin) AS total_margin
           FROM sales s JOIN products p ON p.id = s.product_id
           GROUP BY p.id ORDER BY total_margin DESC LIMIT 1"#,
    )
    .await?;

    let least_profitable = top_product(
        db_pool,
        r#"SELECT p.name, SUM(s.margin) AS total_margin
           FROM sales s JOIN products p ON p.id = s.product_id
           GROUP BY p.id ORDER BY total_margin ASC LIMIT 1"#,
    )
    .await?;

    Ok(Json(DashboardResponse {
        total_products,
        total_stock,
        revenue_total,
        margin_total,
        avg_margin_pct,
        avg_unit_price,
        best_seller,
        most_profitable,
        least_profitable,
    }))
}
