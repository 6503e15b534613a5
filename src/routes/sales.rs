use axum::{routing::get, Router};

use crate::handlers::sale::{
    create_sale, delete_batch, delete_sale, get_sale, list_batches, list_sales, update_sale,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales).post(create_sale))
        .route("/sales/batches", get(list_batches))
        .route("/sales/batches/{batch_id}", axum::routing::delete(delete_batch))
        .route(
            "/sales/{id}",
            get(get_sale).put(update_sale).delete(delete_sale),
        )
}
