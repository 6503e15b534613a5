// src/handlers/report.rs
use axum::{extract::State, Json};

use crate::dtos::report::{ProfitReportRow, SettingsResponse, StockRow};
use crate::error::AppError;
use crate::state::AppState;
use tracing::instrument;

// GET /reports/profit - Per-product totals, most profitable first
#[instrument(skip(state))]
pub async fn profit_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfitReportRow>>, AppError> {
    let rows = sqlx::query_as::<_, (String, i64, f64, f64, f64)>(
        r#"SELECT p.name,
                  SUM(s.quantity) AS quantity,
                  SUM(s.revenue_total) AS revenue,
                  SUM(s.cost_total) AS cost,
                  SUM(s.margin) AS margin
           FROM sales s
           JOIN products p ON p.id = s.product_id
           GROUP BY p.id
           ORDER BY margin DESC"#,
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(product_name, quantity, revenue, cost, margin)| ProfitReportRow {
                product_name,
                quantity,
                revenue,
                cost,
                margin,
            })
            .collect(),
    ))
}

// GET /stock - Current stock levels by product
#[instrument(skip(state))]
pub async fn stock_view(State(state): State<AppState>) -> Result<Json<Vec<StockRow>>, AppError> {
    let rows = sqlx::query_as::<_, (String, Option<String>, i64, f64)>(
        "SELECT name, sku, current_stock, unit_cost FROM products ORDER BY name",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(product_name, sku, current_stock, unit_cost)| StockRow {
                product_name,
                sku,
                current_stock,
                unit_cost,
            })
            .collect(),
    ))
}

// GET /settings - Non-secret runtime configuration
#[instrument(skip(state))]
pub async fn settings_view(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        database_url: state.config.database_url.clone(),
        upload_dir: state.config.upload_dir.display().to_string(),
        secret_key_set: !state.config.secret_key.is_empty(),
    })
}
