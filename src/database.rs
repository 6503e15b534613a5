// src/database.rs
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Create the two tables on boot if they do not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            sku TEXT UNIQUE,
            unit_cost REAL NOT NULL DEFAULT 0,
            suggested_price REAL NOT NULL DEFAULT 0,
            initial_stock INTEGER NOT NULL DEFAULT 0,
            current_stock INTEGER NOT NULL DEFAULT 0,
            classification TEXT
        )"#,
    )
    .execute(pool)
    .await?;

    // No ON DELETE action on product_id: deleting a product can orphan its
    // sales. Accepted gap, matching the original schema.
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            sold_at TEXT,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            revenue_total REAL NOT NULL,
            cost_total REAL NOT NULL,
            margin REAL NOT NULL,
            channel TEXT,
            external_ref TEXT,
            import_batch TEXT,
            FOREIGN KEY (product_id) REFERENCES products (id)
        )"#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    // Single connection: each :memory: connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    init_schema(&pool).await.expect("failed to init schema");
    pool
}
