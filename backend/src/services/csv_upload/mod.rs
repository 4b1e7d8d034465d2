//! HTTP endpoints of the CSV ingestion workflow.
//!
//! The provided routes are:
//! - `POST /preview_headers`: multipart upload with a `file` part; returns the
//!   header row as `{ headers }` so the client can build the column mapping.
//!
//! - `POST /process_csv`: multipart upload with a `file` part and a `mapping`
//!   part holding the `FieldMapping` as a JSON string. The file is read,
//!   every record is normalized into a `StagedRow` with a fresh `row_id`, and
//!   the rows are validated. Returns `{ rows, errors }`.
//!
//! - `POST /validate_csv_rows`: JSON array of rows as edited in the review
//!   grid; returns them re-annotated as `{ data, errors }`.
//!
//! - `POST /save_csv_uploaded_data`: `{ user_id, data }`. The rows are
//!   validated again and, only if all pass, stored in a single transaction.
//!   Returns `{ count }`.
//!
//! - `GET /csv_upload_history?user_id=`: per-day `{ date, uploadedAt, count }`
//!   entries, newest first.
//!
//! - `GET /get_csv_uploaded_data_by_date?user_id=&date=YYYY-MM-DD`: the
//!   records uploaded that day as `{ records }`.
//!
//! - `DELETE /delete_uploaded_data?user_id=&date=YYYY-MM-DD`: removes that
//!   day's records and returns `{ message }`.
//!
//! Every failure is answered with `{ detail }`: 400 for problems with the
//! request or its data, 500 for storage failures.

use crate::error::ServiceError;
use actix_web::error::InternalError;
use actix_web::web::{self, delete, get, post, ServiceConfig};
use actix_web::HttpResponse;
use common::requests::ErrorResponse;

mod delete_by_date;
mod history;
mod multipart;
mod preview_headers;
mod process_csv;
mod records_by_date;
mod save;
mod validate_rows;


/// Registers the CSV ingestion routes.
pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/preview_headers", post().to(preview_headers::process))
        .route("/process_csv", post().to(process_csv::process))
        .route("/validate_csv_rows", post().to(validate_rows::process))
        .route("/save_csv_uploaded_data", post().to(save::process))
        .route("/csv_upload_history", get().to(history::process))
        .route(
            "/get_csv_uploaded_data_by_date",
            get().to(records_by_date::process),
        )
        .route("/delete_uploaded_data", delete().to(delete_by_date::process));
}

/// JSON extractor settings answering malformed bodies with `{ detail }`.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorResponse {
                detail: err.to_string(),
            });
            InternalError::from_response(err, response).into()
        })
}

/// Query extractor settings answering malformed query strings with `{ detail }`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            detail: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}

fn require_user_id(user_id: &str) -> Result<String, ServiceError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ServiceError::BadRequest("user_id must not be empty".into()));
    }
    Ok(user_id.to_string())
}
