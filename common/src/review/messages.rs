use crate::error::IngestError;
use crate::model::field::Field;
use crate::model::mapping::FieldMapping;
use crate::model::row::{RowId, StagedRow};
use crate::requests::{
    ProcessCsvResponse, SaveUploadedDataRequest, SaveUploadedDataResponse, ValidateRowsResponse,
};

/// Inputs to `UploadSession::update`: user actions and request completions.
#[derive(Debug, Clone)]
pub enum Msg {
    /// Result of `POST /preview_headers` for a newly chosen file.
    HeadersLoaded(Result<Vec<String>, IngestError>),
    SelectColumn { field: Field, column: String },
    ProcessRequested,
    /// Result of `POST /process_csv`.
    ProcessCompleted(Result<ProcessCsvResponse, IngestError>),
    EditCell { row: RowId, field: Field, value: String },
    DeleteRow(RowId),
    RevalidateRequested,
    /// Result of `POST /validate_csv_rows`.
    RevalidateCompleted(Result<ValidateRowsResponse, IngestError>),
    TermsToggled(bool),
    CommitRequested,
    /// Result of `POST /save_csv_uploaded_data`.
    CommitCompleted(Result<SaveUploadedDataResponse, IngestError>),
    Reset,
}

/// A request the UI must issue on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `POST /process_csv` with the selected file and this mapping.
    ProcessCsv(FieldMapping),
    /// `POST /validate_csv_rows`.
    ValidateRows(Vec<StagedRow>),
    /// `POST /save_csv_uploaded_data`.
    SaveRows(SaveUploadedDataRequest),
}
