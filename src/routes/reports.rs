use axum::{routing::get, Router};

use crate::handlers::dashboard::get_dashboard;
use crate::handlers::report::{profit_report, settings_view, stock_view};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/reports/profit", get(profit_report))
        .route("/stock", get(stock_view))
        .route("/settings", get(settings_view))
}
