// src/dtos/import.rs
use serde::Serialize;

/// Outcome of one spreadsheet import run.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub batch_id: String,
    pub imported: i64,
    pub skipped_no_sku: i64,
    pub skipped_no_product: i64,
}
