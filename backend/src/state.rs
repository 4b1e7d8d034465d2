//! Shared application state injected into every handler as `web::Data<AppState>`.

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::ingest::storage::UploadStore;
use crate::ingest::validate::FieldValidator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: UploadStore,
    pub validator: Arc<FieldValidator>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Opens the record store and builds the validator from configuration.
    pub fn initialize(config: &AppConfig) -> Result<Self, ServiceError> {
        let store = UploadStore::open(&config.storage.database_path)?;
        let validator = FieldValidator::new(config.validation.clone())?;
        Ok(Self {
            store,
            validator: Arc::new(validator),
            max_upload_bytes: config.server.max_upload_bytes,
        })
    }
}
