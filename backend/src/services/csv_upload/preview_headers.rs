use crate::error::ServiceError;
use crate::ingest::table;
use crate::services::csv_upload::multipart::read_upload_form;
use crate::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, ResponseError};
use common::requests::PreviewHeadersResponse;
use log::{debug, warn};

pub(crate) async fn process(payload: Multipart, state: web::Data<AppState>) -> HttpResponse {
    match preview_headers(payload, &state).await {
        Ok(headers) => HttpResponse::Ok().json(PreviewHeadersResponse { headers }),
        Err(e) => {
            warn!("preview_headers rejected: {e}");
            e.error_response()
        }
    }
}

async fn preview_headers(
    payload: Multipart,
    state: &AppState,
) -> Result<Vec<String>, ServiceError> {
    let form = read_upload_form(payload, state.max_upload_bytes).await?;
    let headers = table::list_headers(&form.file)?;
    debug!("previewed {} header(s)", headers.len());
    Ok(headers)
}
