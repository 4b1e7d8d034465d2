//! `POST /process_csv`: read, normalize and validate an uploaded file.

use crate::error::ServiceError;
use crate::ingest::{normalize, table};
use crate::services::csv_upload::multipart::read_upload_form;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, ResponseError};
use common::model::mapping::FieldMapping;
use common::requests::ProcessCsvResponse;
use log::{info, warn};
use std::time::Instant;

pub(crate) async fn process(payload: Multipart, state: web::Data<AppState>) -> HttpResponse {
    match process_csv(payload, &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            warn!("process_csv rejected: {e}");
            e.error_response()
        }
    }
}

async fn process_csv(
    payload: Multipart,
    state: &AppState,
) -> Result<ProcessCsvResponse, ServiceError> {
    let form = read_upload_form(payload, state.max_upload_bytes).await?;
    let mapping_json = form
        .mapping
        .ok_or_else(|| ServiceError::BadRequest("Missing mapping".into()))?;
    let mapping: FieldMapping = serde_json::from_str(&mapping_json)
        .map_err(|e| ServiceError::BadRequest(format!("mapping is not valid JSON: {e}")))?;
    mapping.ensure_complete()?;

    let validator = state.validator.clone();
    let file = form.file;
    let start = Instant::now();

    // Parsing and validation are CPU bound; keep them off the async workers.
    let response = tokio::task::spawn_blocking(move || -> Result<_, ServiceError> {
        let raw = table::read_table(&file)?;
        let rows = normalize::normalize(&raw, &mapping)?;
        let outcome = validator.validate(rows);
        Ok(ProcessCsvResponse {
            rows: outcome.rows,
            errors: outcome.errors,
        })
    })
    .await??;

    info!(
        "process_csv: {} row(s), {} invalid, in {:.2?}",
        response.rows.len(),
        response.errors.len(),
        start.elapsed()
    );
    Ok(response)
}
