use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    app::{
        models::api_error::ApiError,
        util::multipart::{
            models::file_properties::FileProperties, multipart::get_form_properties,
        },
    },
    AppState,
};

use super::{
    enums::sketch_style::SketchStyle, errors::SketchApiError,
    models::{image_payload::ImagePayload, memory_sketch::MemorySketch},
    service,
};

pub async fn create_memory_sketch(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MemorySketch>, ApiError> {
    let request_id = Uuid::new_v4();

    handle_memory_sketch(state, multipart)
        .instrument(tracing::info_span!("memory_sketch", %request_id))
        .await
}

async fn handle_memory_sketch(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MemorySketch>, ApiError> {
    let multipart = multipart.map_err(|rejection| ApiError {
        code: StatusCode::BAD_REQUEST,
        message: rejection.body_text(),
    })?;
    let mut form = get_form_properties(multipart).await?;

    let style = match form.text("style") {
        Some(style) => style.parse::<SketchStyle>()?,
        None => state
            .envy
            .sketch_style
            .parse::<SketchStyle>()
            .unwrap_or(SketchStyle::PoliceComposite),
    };

    let Some(file) = form.take_file("file") else {
        return Err(SketchApiError::MissingImage.value());
    };
    tracing::info!(
        "received {} ({} bytes), style {}",
        file.file_name.as_deref().unwrap_or("unnamed upload"),
        file.data.len(),
        style
    );
    let image = validate_image(file)?;

    match service::create_memory_sketch(&image, style, &state).await {
        Ok(sketch) => {
            tracing::info!("memory sketch ready, mode {}", sketch.mode);
            Ok(Json(sketch))
        }
        Err(e) => {
            tracing::error!("memory sketch failed: {}", e);
            Err(e.value())
        }
    }
}

fn validate_image(file: FileProperties) -> Result<ImagePayload, SketchApiError> {
    if let Some(mime_type) = &file.mime_type {
        let generic = mime_type.essence_str() == mime::APPLICATION_OCTET_STREAM.essence_str();
        if !generic && mime_type.type_() != mime::IMAGE {
            return Err(SketchApiError::InvalidImage(format!(
                "{} is not an image type",
                mime_type
            )));
        }
    }

    if file.data.is_empty() {
        return Err(SketchApiError::InvalidImage("file is empty".to_string()));
    }

    if let Err(e) = imagesize::blob_size(&file.data) {
        tracing::warn!("rejected upload {}: {:?}", file.id, e);
        return Err(SketchApiError::InvalidImage(
            "could not read image dimensions".to_string(),
        ));
    }

    Ok(ImagePayload::new(file.data, file.mime_type.as_ref()))
}
