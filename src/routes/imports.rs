use axum::{routing::post, Router};

use crate::handlers::import::import_spreadsheet;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/imports", post(import_spreadsheet))
}
