// src/import_ml/sheet.rs
//
// Loader for the fixed marketplace export layout: one sheet named
// "Vendas BR", five junk rows, then a header row, then data.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::error::AppError;
use crate::import_ml::parse::{cell_to_f64, cell_to_i64, cell_to_string};

pub const SHEET_NAME: &str = "Vendas BR";
/// Zero-based index of the header row.
pub const HEADER_ROW: usize = 5;

pub const COL_SALE_NUMBER: &str = "N.º de venda";
pub const COL_SKU: &str = "SKU";
pub const COL_SALE_DATE: &str = "Data da venda";
pub const COL_UNITS: &str = "Unidades";
pub const COL_TOTAL: &str = "Total (BRL)";

/// One data row with cells already coerced to plain values. The date is kept
/// as raw text; parsing it is the reconciler's job.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub sale_number: String,
    pub sku: String,
    pub sold_at_text: String,
    pub units: i64,
    pub revenue: f64,
}

pub fn load_rows(path: &Path) -> Result<Vec<SheetRow>, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::bad_format(format!("could not open spreadsheet: {e}")))?;

    let range = workbook
        .worksheet_range(SHEET_NAME)
        .map_err(|_| AppError::bad_format(format!("sheet '{SHEET_NAME}' not found")))?;

    rows_from_range(&range)
}

/// Resolve the header row into column indices and extract the data rows.
/// The sale-number column is required; the others degrade to blank/zero
/// per row when absent, as the original export tolerates.
pub fn rows_from_range(range: &Range<Data>) -> Result<Vec<SheetRow>, AppError> {
    let mut rows = range.rows().skip(HEADER_ROW);

    let header = rows.next().ok_or_else(|| {
        AppError::bad_format(format!(
            "spreadsheet is not in the expected format: header row {} missing",
            HEADER_ROW + 1
        ))
    })?;

    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| (cell_to_string(cell), idx))
        .collect();

    let sale_number_col = *columns.get(COL_SALE_NUMBER).ok_or_else(|| {
        AppError::bad_format(format!(
            "spreadsheet is not in the expected format: column '{COL_SALE_NUMBER}' not found"
        ))
    })?;
    let sku_col = columns.get(COL_SKU).copied();
    let date_col = columns.get(COL_SALE_DATE).copied();
    let units_col = columns.get(COL_UNITS).copied();
    let total_col = columns.get(COL_TOTAL).copied();

    let cell = |row: &[Data], col: Option<usize>| -> Data {
        col.and_then(|c| row.get(c).cloned()).unwrap_or(Data::Empty)
    };

    let mut out = Vec::new();
    for row in rows {
        let sale_number = cell_to_string(row.get(sale_number_col).unwrap_or(&Data::Empty));
        // Rows without a sale number are padding/footer noise.
        if sale_number.is_empty() {
            continue;
        }

        out.push(SheetRow {
            sale_number,
            sku: cell_to_string(&cell(row, sku_col)),
            sold_at_text: cell_to_string(&cell(row, date_col)),
            units: cell_to_i64(&cell(row, units_col)),
            revenue: cell_to_f64(&cell(row, total_col)),
        });
    }

    Ok(out)
}
