pub mod imports;
pub mod products;
pub mod reports;
pub mod sales;

use axum::Router;

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(sales::routes())
        .merge(imports::routes())
        .merge(reports::routes())
}
