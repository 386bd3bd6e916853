use axum::{extract::Multipart, http::StatusCode};
use mime::Mime;
use uuid::Uuid;

use crate::app::models::api_error::ApiError;

use super::models::{file_properties::FileProperties, form_properties::FormProperties};

pub async fn get_form_properties(mut multipart: Multipart) -> Result<FormProperties, ApiError> {
    let mut form = FormProperties::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(%e);
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: format!("Failed to read multipart body: {}", e),
                });
            }
        };

        let field_name = field.name().unwrap_or("file").to_string();
        let file_name = field.file_name().map(str::to_string);
        let mime_type = field
            .content_type()
            .and_then(|content_type| content_type.parse::<Mime>().ok());

        // parts without a file name and without a content type are plain form values
        if file_name.is_none() && mime_type.is_none() {
            let Ok(text) = field.text().await else {
                continue;
            };
            form.texts.push((field_name, text));
            continue;
        }

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(%e);
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: format!("Failed to read uploaded file: {}", e),
                });
            }
        };

        form.files.push(FileProperties {
            id: Uuid::new_v4().to_string(),
            field_name,
            file_name,
            mime_type,
            data,
        });
    }

    Ok(form)
}
