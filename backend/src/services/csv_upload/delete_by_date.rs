use crate::error::ServiceError;
use crate::services::csv_upload::require_user_id;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::requests::{DeleteUploadedDataResponse, UserDateQuery};
use log::info;

pub(crate) async fn process(
    query: web::Query<UserDateQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match delete_uploaded_data(query.into_inner(), &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

async fn delete_uploaded_data(
    query: UserDateQuery,
    state: &AppState,
) -> Result<DeleteUploadedDataResponse, ServiceError> {
    let user_id = require_user_id(&query.user_id)?;
    let date = query.date;
    let store = state.store.clone();
    let deleted = {
        let user_id = user_id.clone();
        tokio::task::spawn_blocking(move || store.delete_by_date(&user_id, date)).await??
    };
    info!("deleted {deleted} record(s) uploaded on {date} for user {user_id}");
    Ok(DeleteUploadedDataResponse {
        message: format!("Deleted {deleted} record(s) uploaded on {date}"),
    })
}
