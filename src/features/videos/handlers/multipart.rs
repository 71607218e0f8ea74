use std::collections::HashMap;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use crate::core::error::AppError;
use crate::modules::storage::UploadPayload;

/// Fields of a video upload or edit form
#[derive(Debug, Default)]
pub struct VideoForm {
    pub files: HashMap<String, UploadPayload>,
    pub text: HashMap<String, String>,
}

impl VideoForm {
    /// Drain a multipart body; `file_fields` names the parts read as files
    pub async fn read(mut multipart: Multipart, file_fields: &[&str]) -> Result<Self, AppError> {
        let mut form = VideoForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| read_error("multipart data", e))?
        {
            let field_name = field.name().unwrap_or("").to_string();

            if file_fields.contains(&field_name.as_str()) {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        AppError::BadRequest(format!("'{}' must be a file", field_name))
                    })?;

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| read_error("file data", e))?;

                if data.is_empty() {
                    return Err(AppError::BadRequest(format!("'{}' is empty", field_name)));
                }

                form.files.insert(
                    field_name,
                    UploadPayload {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    },
                );
            } else if !field_name.is_empty() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| read_error(&format!("{} field", field_name), e))?;
                form.text.insert(field_name, text);
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadPayload> {
        self.files.remove(name)
    }

    /// Trimmed text value; blank counts as absent
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.text
            .remove(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Body limit hits become 413; anything else is a malformed form
fn read_error(what: &str, e: MultipartError) -> AppError {
    debug!("Failed to read {}: {}", what, e);

    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(format!("Failed to read {}: {}", what, e))
    }
}
