//! Request and response payloads of the CSV ingestion endpoints.

use crate::model::row::StagedRow;
use crate::model::upload::PersistedRecord;
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// `POST /preview_headers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewHeadersResponse {
    pub headers: Vec<String>,
}

/// `POST /process_csv`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessCsvResponse {
    pub rows: Vec<StagedRow>,
    pub errors: Vec<ValidationError>,
}

/// `POST /validate_csv_rows`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateRowsResponse {
    pub data: Vec<StagedRow>,
    pub errors: Vec<ValidationError>,
}

/// `POST /save_csv_uploaded_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveUploadedDataRequest {
    pub user_id: String,
    pub data: Vec<StagedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveUploadedDataResponse {
    pub count: usize,
}

/// Query of `GET /csv_upload_history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

/// Query of the per-day read and delete endpoints; `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDateQuery {
    pub user_id: String,
    pub date: NaiveDate,
}

/// `GET /get_csv_uploaded_data_by_date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedRecordsResponse {
    pub records: Vec<PersistedRecord>,
}

/// `DELETE /delete_uploaded_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUploadedDataResponse {
    pub message: String,
}
