use std::time::Duration;

use axum::http::StatusCode;
use bytes::Bytes;

use crate::app::models::api_error::ApiError;

pub async fn get_bytes(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<Bytes, ApiError> {
    let res = match client.get(url).timeout(timeout).send().await {
        Ok(res) => res,
        Err(e) => {
            tracing::error!(%e);
            return Err(ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to get url response.".to_string(),
            });
        }
    };

    if !res.status().is_success() {
        return Err(ApiError {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Url responded with status {}.", res.status().as_u16()),
        });
    }

    match res.bytes().await {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::error!(%e);
            Err(ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to get bytes from response.".to_string(),
            })
        }
    }
}
