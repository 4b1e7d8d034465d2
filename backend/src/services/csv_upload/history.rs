use crate::error::ServiceError;
use crate::services::csv_upload::require_user_id;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::model::upload::UploadHistoryEntry;
use common::requests::UserQuery;

pub(crate) async fn process(
    query: web::Query<UserQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match upload_history(query.into_inner(), &state).await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => e.error_response(),
    }
}

async fn upload_history(
    query: UserQuery,
    state: &AppState,
) -> Result<Vec<UploadHistoryEntry>, ServiceError> {
    let user_id = require_user_id(&query.user_id)?;
    let store = state.store.clone();
    let entries = tokio::task::spawn_blocking(move || store.history(&user_id)).await??;
    Ok(entries)
}
