// src/handlers/sale.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::dtos::sale::{
    BatchDeleteResponse, BatchSummary, CreateSaleRequest, SaleResponse, UpdateSaleRequest,
};
use crate::error::AppError;
use crate::models::sale::Sale;
use crate::state::AppState;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct SaleRow {
    id: i64,
    product_id: i64,
    product_name: String,
    sold_at: Option<chrono::NaiveDateTime>,
    quantity: i64,
    unit_price: f64,
    revenue_total: f64,
    cost_total: f64,
    margin: f64,
    channel: Option<String>,
    external_ref: Option<String>,
    import_batch: Option<String>,
}

impl From<SaleRow> for SaleResponse {
    fn from(s: SaleRow) -> Self {
        Self {
            id: s.id,
            product_id: s.product_id,
            product_name: s.product_name,
            sold_at: s.sold_at,
            quantity: s.quantity,
            unit_price: s.unit_price,
            revenue_total: s.revenue_total,
            cost_total: s.cost_total,
            margin: s.margin,
            channel: s.channel,
            external_ref: s.external_ref,
            import_batch: s.import_batch,
        }
    }
}

const SALE_COLUMNS: &str = "s.id, s.product_id, p.name AS product_name, s.sold_at, \
                            s.quantity, s.unit_price, s.revenue_total, s.cost_total, \
                            s.margin, s.channel, s.external_ref, s.import_batch";

async fn fetch_sale_by_id(db_pool: &SqlitePool, id: i64) -> Result<SaleResponse, AppError> {
    let sale = sqlx::query_as::<_, SaleRow>(&format!(
        "SELECT {SALE_COLUMNS} FROM sales s \
         JOIN products p ON p.id = s.product_id WHERE s.id = ?"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Sale not found"))?;

    Ok(sale.into())
}

// GET /sales - List all sales, newest first, undated last
#[instrument(skip(state))]
pub async fn list_sales(State(state): State<AppState>) -> Result<Json<Vec<SaleResponse>>, AppError> {
    let sales = sqlx::query_as::<_, SaleRow>(&format!(
        "SELECT {SALE_COLUMNS} FROM sales s \
         JOIN products p ON p.id = s.product_id \
         ORDER BY s.sold_at DESC NULLS LAST, s.id DESC"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(sales.into_iter().map(SaleResponse::from).collect()))
}

// GET /sales/:id - Get single sale
#[instrument(skip(state), fields(id))]
pub async fn get_sale(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<SaleResponse>, AppError> {
    fetch_sale_by_id(&state.db_pool, id).await.map(Json)
}

// POST /sales - Record a sale manually; financials derived from the payload
#[instrument(skip(state, payload))]
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<(StatusCode, Json<SaleResponse>), AppError> {
    let mut tx = state.db_pool.begin().await?;

    let product = sqlx::query_as::<_, (i64, f64)>("SELECT id, unit_cost FROM products WHERE id = ?")
        .bind(payload.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let revenue_total = payload.quantity as f64 * payload.unit_price;
    let cost_total = product.1 * payload.quantity as f64;
    let margin = revenue_total - cost_total;

    let (id,) = sqlx::query_as::<_, (i64,)>(
        r#"INSERT INTO sales (
            product_id, sold_at, quantity, unit_price,
            revenue_total, cost_total, margin,
            channel, external_ref, import_batch
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NULL) RETURNING id"#,
    )
    .bind(payload.product_id)
    .bind(payload.sold_at)
    .bind(payload.quantity)
    .bind(payload.unit_price)
    .bind(revenue_total)
    .bind(cost_total)
    .bind(margin)
    .bind(&payload.channel)
    .bind(&payload.external_ref)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    let sale = fetch_sale_by_id(&state.db_pool, id).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

// PUT /sales/:id - Edit quantity/price/cost; revenue and margin recomputed
#[instrument(skip(state, payload), fields(id))]
pub async fn update_sale(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateSaleRequest>,
) -> Result<Json<SaleResponse>, AppError> {
    let existing = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Sale not found"))?;

    let quantity = payload.quantity.unwrap_or(existing.quantity);
    let unit_price = payload.unit_price.unwrap_or(existing.unit_price);
    let cost_total = payload.cost_total.unwrap_or(existing.cost_total);

    let revenue_total = quantity as f64 * unit_price;
    let margin = revenue_total - cost_total;

    sqlx::query(
        "UPDATE sales SET quantity = ?, unit_price = ?, revenue_total = ?, \
         cost_total = ?, margin = ? WHERE id = ?",
    )
    .bind(quantity)
    .bind(unit_price)
    .bind(revenue_total)
    .bind(cost_total)
    .bind(margin)
    .bind(id)
    .execute(&state.db_pool)
    .await?;

    fetch_sale_by_id(&state.db_pool, id).await.map(Json)
}

// DELETE /sales/:id - Delete single sale
#[instrument(skip(state), fields(id))]
pub async fn delete_sale(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<()>, AppError> {
    let result = sqlx::query("DELETE FROM sales WHERE id = ?")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Sale not found"));
    }

    Ok(Json(()))
}

// GET /sales/batches - Summarise import runs, newest batch first
#[instrument(skip(state))]
pub async fn list_batches(
    State(state): State<AppState>,
) -> Result<Json<Vec<BatchSummary>>, AppError> {
    let batches = sqlx::query_as::<_, (String, i64, f64)>(
        r#"SELECT import_batch,
                  COUNT(*) AS sale_count,
                  COALESCE(SUM(revenue_total), 0.0) AS revenue_total
           FROM sales
           WHERE import_batch IS NOT NULL
           GROUP BY import_batch
           ORDER BY import_batch DESC"#,
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(
        batches
            .into_iter()
            .map(|(import_batch, sale_count, revenue_total)| BatchSummary {
                import_batch,
                sale_count,
                revenue_total,
            })
            .collect(),
    ))
}

// DELETE /sales/batches/:batch_id - Drop every sale from one import run
#[instrument(skip(state), fields(batch_id))]
pub async fn delete_batch(
    Path(batch_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BatchDeleteResponse>, AppError> {
    let result = sqlx::query("DELETE FROM sales WHERE import_batch = ?")
        .bind(&batch_id)
        .execute(&state.db_pool)
        .await?;

    Ok(Json(BatchDeleteResponse {
        import_batch: batch_id,
        deleted: result.rows_affected(),
    }))
}
