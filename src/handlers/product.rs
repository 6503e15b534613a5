// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::Error as SqlxError;

use crate::dtos::product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;
use tracing::instrument;

fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.is_unique_violation() => AppError::conflict(message),
        other => other.into(),
    }
}

const PRODUCT_COLUMNS: &str = "id, name, sku, unit_cost, suggested_price, \
                               initial_stock, current_stock, classification";

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
    ))
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product; current stock starts at initial stock
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products (name, sku, unit_cost, suggested_price, \
                               initial_stock, current_stock, classification) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.sku)
    .bind(payload.unit_cost)
    .bind(payload.suggested_price)
    .bind(payload.initial_stock)
    .bind(payload.initial_stock)
    .bind(&payload.classification)
    .fetch_one(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "Product SKU already exists"))?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/:id - Update product
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products SET \
         name = COALESCE(?, name), \
         sku = COALESCE(?, sku), \
         unit_cost = COALESCE(?, unit_cost), \
         suggested_price = COALESCE(?, suggested_price), \
         current_stock = COALESCE(?, current_stock), \
         classification = COALESCE(?, classification) \
         WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(payload.name)
    .bind(payload.sku)
    .bind(payload.unit_cost)
    .bind(payload.suggested_price)
    .bind(payload.current_stock)
    .bind(payload.classification)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "Product SKU already exists"))?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product (sales are not cascaded)
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<()>, AppError> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::test_pool;

    fn test_state(pool: sqlx::SqlitePool) -> AppState {
        AppState::new(
            pool,
            Config {
                database_url: "sqlite::memory:".to_string(),
                upload_dir: "uploads".into(),
                secret_key: "test".to_string(),
            },
        )
    }

    fn create_req(name: &str, sku: Option<&str>) -> CreateProductRequest {
        CreateProductRequest {
            name: name.to_string(),
            sku: sku.map(str::to_string),
            unit_cost: 10.0,
            suggested_price: 25.0,
            initial_stock: 7,
            classification: None,
        }
    }

    #[tokio::test]
    async fn create_initializes_current_stock_from_initial() {
        let state = test_state(test_pool().await);
        let (status, Json(product)) =
            create_product(State(state), Json(create_req("Widget", Some("A1"))))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product.initial_stock, 7);
        assert_eq!(product.current_stock, 7);
    }

    #[tokio::test]
    async fn duplicate_sku_is_a_conflict() {
        let state = test_state(test_pool().await);
        create_product(State(state.clone()), Json(create_req("Widget", Some("A1"))))
            .await
            .unwrap();
        let err = create_product(State(state), Json(create_req("Other", Some("A1"))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let state = test_state(test_pool().await);
        let err = get_product(Path(99), State(state.clone()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = delete_product(Path(99), State(state)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
