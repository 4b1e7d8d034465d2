//! `POST /save_csv_uploaded_data`: commit a fully valid working set.

use crate::error::ServiceError;
use crate::ingest::validate::FieldValidator;
use crate::services::csv_upload::require_user_id;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use common::error::IngestError;
use common::model::row::StagedRow;
use common::model::upload::PersistedRecord;
use common::requests::{SaveUploadedDataRequest, SaveUploadedDataResponse};
use log::{info, warn};

pub(crate) async fn process(
    payload: web::Json<SaveUploadedDataRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match save_uploaded_data(payload.into_inner(), &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            warn!("save_csv_uploaded_data rejected: {e}");
            e.error_response()
        }
    }
}

/// Maps a validated row onto the stored shape; `None` if it does not parse.
fn to_record(
    validator: &FieldValidator,
    row: StagedRow,
    user_id: &str,
    uploaded_at: DateTime<Utc>,
) -> Option<PersistedRecord> {
    Some(PersistedRecord {
        id: None,
        user_id: user_id.to_string(),
        lease_date: validator.parse_lease_date(&row.lease_date)?,
        sqft: validator.parse_sqft(&row.sqft)?,
        company: row.company,
        address: row.address,
        city: row.city,
        state: row.state,
        uploaded_at,
    })
}

async fn save_uploaded_data(
    request: SaveUploadedDataRequest,
    state: &AppState,
) -> Result<SaveUploadedDataResponse, ServiceError> {
    let user_id = require_user_id(&request.user_id)?;
    if request.data.is_empty() {
        return Err(IngestError::NothingToCommit.into());
    }

    let validator = state.validator.clone();
    let store = state.store.clone();
    let rows = request.data;

    let count = tokio::task::spawn_blocking(move || -> Result<usize, ServiceError> {
        let outcome = validator.validate(rows);
        if !outcome.is_valid() {
            return Err(IngestError::RowsInvalid(outcome.errors.len()).into());
        }

        let uploaded_at = Utc::now();
        let total = outcome.rows.len();
        let records = outcome
            .rows
            .into_iter()
            .map(|row| to_record(&validator, row, &user_id, uploaded_at))
            .collect::<Option<Vec<_>>>()
            .ok_or(IngestError::RowsInvalid(total))?;
        let count = store.save(&records)?;
        info!("saved {count} record(s) for user {user_id}");
        Ok(count)
    })
    .await??;

    Ok(SaveUploadedDataResponse { count })
}
