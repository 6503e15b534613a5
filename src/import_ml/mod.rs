// src/import_ml/mod.rs
//
// Reconciliation of marketplace spreadsheet exports against the product
// catalog: match rows by SKU, derive the financial fields, insert one sale
// per matched row and decrement the product's stock, all in one transaction.

pub mod parse;
pub mod sheet;

use chrono::Local;
use sqlx::SqlitePool;

use crate::dtos::import::ImportSummary;
use crate::error::AppError;
use sheet::SheetRow;

/// Channel label stamped on every imported sale.
pub const CHANNEL_MERCADO_LIVRE: &str = "Mercado Livre";

/// Import one batch of rows, tagged with a fresh batch id derived from the
/// current local time at second precision. The batch id groups the run for
/// later review and bulk deletion.
pub async fn import_sales(pool: &SqlitePool, rows: Vec<SheetRow>) -> Result<ImportSummary, AppError> {
    let batch_id = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    import_as_batch(pool, rows, &batch_id).await
}

/// Whole-batch atomicity: every insert and stock decrement commits together
/// or not at all. Stock is allowed to go negative.
pub async fn import_as_batch(
    pool: &SqlitePool,
    rows: Vec<SheetRow>,
    batch_id: &str,
) -> Result<ImportSummary, AppError> {
    let mut tx = pool.begin().await?;

    let mut imported: i64 = 0;
    let mut skipped_no_sku: i64 = 0;
    let mut skipped_no_product: i64 = 0;

    for row in rows {
        let sku = row.sku.trim();
        if sku.is_empty() {
            skipped_no_sku += 1;
            continue;
        }

        let product = sqlx::query_as::<_, (i64, f64)>(
            "SELECT id, unit_cost FROM products WHERE sku = ?",
        )
        .bind(sku)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((product_id, unit_cost)) = product else {
            skipped_no_product += 1;
            continue;
        };

        let sold_at = parse::parse_sale_date(&row.sold_at_text);
        let quantity = row.units;
        let revenue = row.revenue;
        let unit_price = if quantity > 0 {
            revenue / quantity as f64
        } else {
            0.0
        };
        let cost_total = unit_cost * quantity as f64;
        let margin = revenue - cost_total;

        sqlx::query(
            r#"INSERT INTO sales (
                product_id, sold_at, quantity, unit_price,
                revenue_total, cost_total, margin,
                channel, external_ref, import_batch
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(product_id)
        .bind(sold_at)
        .bind(quantity)
        .bind(unit_price)
        .bind(revenue)
        .bind(cost_total)
        .bind(margin)
        .bind(CHANNEL_MERCADO_LIVRE)
        .bind(&row.sale_number)
        .bind(batch_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET current_stock = current_stock - ? WHERE id = ?")
            .bind(quantity)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        imported += 1;
    }

    tx.commit().await?;

    tracing::info!(
        batch_id,
        imported,
        skipped_no_sku,
        skipped_no_product,
        "Import batch committed"
    );

    Ok(ImportSummary {
        batch_id: batch_id.to_string(),
        imported,
        skipped_no_sku,
        skipped_no_product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::models::sale::Sale;

    async fn seed_product(pool: &SqlitePool, sku: &str, unit_cost: f64, stock: i64) -> i64 {
        sqlx::query_as::<_, (i64,)>(
            r#"INSERT INTO products
               (name, sku, unit_cost, suggested_price, initial_stock, current_stock)
               VALUES (?, ?, ?, 0, ?, ?) RETURNING id"#,
        )
        .bind(format!("Product {sku}"))
        .bind(sku)
        .bind(unit_cost)
        .bind(stock)
        .bind(stock)
        .fetch_one(pool)
        .await
        .unwrap()
        .0
    }

    fn row(sku: &str, units: i64, revenue: f64) -> SheetRow {
        SheetRow {
            sale_number: "2000001".to_string(),
            sku: sku.to_string(),
            sold_at_text: "05 qua março de 2024 14:30".to_string(),
            units,
            revenue,
        }
    }

    async fn current_stock(pool: &SqlitePool, id: i64) -> i64 {
        sqlx::query_scalar("SELECT current_stock FROM products WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn matched_row_derives_financials_and_decrements_stock() {
        let pool = test_pool().await;
        let product_id = seed_product(&pool, "A1", 10.0, 20).await;

        let summary = import_as_batch(&pool, vec![row("A1", 3, 45.0)], "batch-1")
            .await
            .unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped_no_sku, 0);
        assert_eq!(summary.skipped_no_product, 0);

        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sale.product_id, product_id);
        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.unit_price, 15.0);
        assert_eq!(sale.revenue_total, 45.0);
        assert_eq!(sale.cost_total, 30.0);
        assert_eq!(sale.margin, 15.0);
        assert_eq!(sale.channel.as_deref(), Some(CHANNEL_MERCADO_LIVRE));
        assert_eq!(sale.external_ref.as_deref(), Some("2000001"));
        assert_eq!(sale.import_batch.as_deref(), Some("batch-1"));
        assert_eq!(
            sale.sold_at,
            parse::parse_sale_date("05 qua março de 2024 14:30")
        );

        assert_eq!(current_stock(&pool, product_id).await, 17);
    }

    #[tokio::test]
    async fn zero_quantity_row_keeps_revenue_as_margin() {
        let pool = test_pool().await;
        seed_product(&pool, "A1", 10.0, 5).await;

        import_as_batch(&pool, vec![row("A1", 0, 12.5)], "batch-1")
            .await
            .unwrap();

        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sale.unit_price, 0.0);
        assert_eq!(sale.cost_total, 0.0);
        assert_eq!(sale.margin, 12.5);
    }

    #[tokio::test]
    async fn unparseable_date_yields_null_timestamp() {
        let pool = test_pool().await;
        seed_product(&pool, "A1", 10.0, 5).await;

        let mut bad_date = row("A1", 1, 10.0);
        bad_date.sold_at_text = "not a date".to_string();
        import_as_batch(&pool, vec![bad_date], "batch-1")
            .await
            .unwrap();

        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sale.sold_at, None);
    }

    #[tokio::test]
    async fn blank_and_unknown_skus_are_counted_not_inserted() {
        let pool = test_pool().await;
        let product_id = seed_product(&pool, "A1", 10.0, 10).await;

        let summary = import_as_batch(
            &pool,
            vec![
                row("", 2, 20.0),
                row("   ", 1, 10.0),
                row("ZZ9", 4, 40.0),
                row("A1", 2, 30.0),
            ],
            "batch-1",
        )
        .await
        .unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped_no_sku, 2);
        assert_eq!(summary.skipped_no_product, 1);

        let sale_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(sale_count, 1);

        // Only the matched row touched stock.
        assert_eq!(current_stock(&pool, product_id).await, 8);
    }

    #[tokio::test]
    async fn stock_decreases_by_sum_of_matched_quantities_and_may_go_negative() {
        let pool = test_pool().await;
        let product_id = seed_product(&pool, "A1", 2.0, 5).await;

        let summary = import_as_batch(
            &pool,
            vec![row("A1", 3, 9.0), row("A1", 4, 12.0), row("A1", 2, 6.0)],
            "batch-1",
        )
        .await
        .unwrap();

        assert_eq!(summary.imported, 3);
        assert_eq!(current_stock(&pool, product_id).await, -4);
    }
}
