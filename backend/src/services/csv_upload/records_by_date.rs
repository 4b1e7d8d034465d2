use crate::error::ServiceError;
use crate::services::csv_upload::require_user_id;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::requests::{UploadedRecordsResponse, UserDateQuery};

pub(crate) async fn process(
    query: web::Query<UserDateQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match records_by_date(query.into_inner(), &state).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => e.error_response(),
    }
}

async fn records_by_date(
    query: UserDateQuery,
    state: &AppState,
) -> Result<UploadedRecordsResponse, ServiceError> {
    let user_id = require_user_id(&query.user_id)?;
    let store = state.store.clone();
    let records =
        tokio::task::spawn_blocking(move || store.records_by_date(&user_id, query.date)).await??;
    Ok(UploadedRecordsResponse { records })
}
