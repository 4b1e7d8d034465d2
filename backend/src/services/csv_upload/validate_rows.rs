use crate::error::ServiceError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, ResponseError};
use common::model::row::StagedRow;
use common::requests::ValidateRowsResponse;
use log::debug;

pub(crate) async fn process(
    rows: web::Json<Vec<StagedRow>>,
    state: web::Data<AppState>,
) -> HttpResponse {
    match validate_rows(rows.into_inner(), &state).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

async fn validate_rows(
    rows: Vec<StagedRow>,
    state: &AppState,
) -> Result<ValidateRowsResponse, ServiceError> {
    let validator = state.validator.clone();
    let outcome = tokio::task::spawn_blocking(move || validator.validate(rows)).await?;
    debug!(
        "validate_csv_rows: {} row(s), {} invalid",
        outcome.rows.len(),
        outcome.errors.len()
    );
    Ok(ValidateRowsResponse {
        data: outcome.rows,
        errors: outcome.errors,
    })
}
