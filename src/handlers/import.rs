// src/handlers/import.rs
use std::fs;
use std::path::{Component, Path as FsPath, PathBuf};

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::dtos::import::ImportSummary;
use crate::error::AppError;
use crate::import_ml;
use crate::state::AppState;
use tracing::{info, instrument};

/// Keep only the final path component of a client-supplied filename.
fn sanitize_filename(name: &str) -> String {
    let base = FsPath::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .next_back()
        .unwrap_or("upload.xlsx");
    base.replace(
        |c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')),
        "_",
    )
}

// POST /imports - Upload a marketplace export and reconcile it
#[instrument(skip(state, multipart))]
pub async fn import_spreadsheet(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, AppError> {
    let mut saved: Option<PathBuf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(&format!("Invalid upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = sanitize_filename(field.file_name().unwrap_or("upload.xlsx"));
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(&format!("Invalid upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }

        let path = state.config.upload_dir.join(filename);
        fs::write(&path, &data)
            .map_err(|e| AppError::internal(format!("failed to save upload: {e}")))?;
        saved = Some(path);
        break;
    }

    let path = saved.ok_or_else(|| AppError::validation("No file was uploaded"))?;
    info!(path = %path.display(), "Import file received");

    let rows = import_ml::sheet::load_rows(&path)?;
    let summary = import_ml::import_sales(&state.db_pool, rows).await?;

    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_filename("vendas.xlsx"), "vendas.xlsx");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/tmp/export março.xlsx"), "export_mar_o.xlsx");
        assert_eq!(sanitize_filename(""), "upload.xlsx");
    }
}
