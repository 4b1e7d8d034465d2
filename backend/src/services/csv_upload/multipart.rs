//! Collects the parts of an upload form.

use crate::error::ServiceError;
use actix_multipart::Multipart;
use common::error::IngestError;
use futures_util::StreamExt;

/// The `file` part, plus the `mapping` part when the form carries one.
pub(crate) struct UploadForm {
    pub file: Vec<u8>,
    pub mapping: Option<String>,
}

/// Reads the whole form. The file must be present, must not exceed
/// `max_bytes`, and its filename, when given, must end with `.csv`.
pub(crate) async fn read_upload_form(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<UploadForm, ServiceError> {
    let mut file: Option<Vec<u8>> = None;
    let mut mapping: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()));
                if let Some(filename) = filename {
                    if !filename.to_ascii_lowercase().ends_with(".csv") {
                        return Err(
                            IngestError::Parse("The file must end with .csv".into()).into()
                        );
                    }
                }

                file = Some(read_capped(&mut field, "file", max_bytes).await?);
            }
            Some("mapping") => {
                let bytes = read_capped(&mut field, "mapping", max_bytes).await?;
                let text = String::from_utf8(bytes)
                    .map_err(|_| ServiceError::BadRequest("mapping is not valid UTF-8".into()))?;
                mapping = Some(text);
            }
            _ => {
                // Drain unknown parts so the stream can advance.
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
            }
        }
    }

    let file = file.ok_or_else(|| ServiceError::Upload("Missing file".into()))?;
    Ok(UploadForm { file, mapping })
}

async fn read_capped(
    field: &mut actix_multipart::Field,
    part: &str,
    max_bytes: usize,
) -> Result<Vec<u8>, ServiceError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ServiceError::Upload(format!(
                "{part} exceeds the {max_bytes} byte limit"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
