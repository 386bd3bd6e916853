use std::fmt;

use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

pub const MODERATION_MESSAGE: &str = "The image was flagged by the provider's content moderation. \
This may be a false positive, please try again with a different image.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchApiError {
    MissingCredential(&'static str),
    ModerationRejection,
    Upstream {
        provider: &'static str,
        detail: String,
    },
    UnexpectedResponseShape {
        provider: &'static str,
        detail: String,
    },
    MissingImage,
    InvalidImage(String),
    UnknownStyle(String),
}

impl SketchApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::MissingCredential(name) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("{} is not configured.", name),
            },
            // client correctable, so not a server fault
            Self::ModerationRejection => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: MODERATION_MESSAGE.to_string(),
            },
            Self::Upstream { provider, detail } => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("{} request failed: {}", provider, detail),
            },
            Self::UnexpectedResponseShape { provider, detail } => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("{} returned an unexpected response: {}", provider, detail),
            },
            Self::MissingImage => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "No image was uploaded.".to_string(),
            },
            Self::InvalidImage(detail) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Upload is not a usable image: {}", detail),
            },
            Self::UnknownStyle(style) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Sketch style {} is not supported.", style),
            },
        }
    }
}

impl fmt::Display for SketchApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value().message)
    }
}

impl std::error::Error for SketchApiError {}

impl From<SketchApiError> for ApiError {
    fn from(e: SketchApiError) -> Self {
        e.value()
    }
}
