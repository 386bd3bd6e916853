use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::memory_sketches::errors::SketchApiError;

use super::moderation;

const MAX_DETAIL_CHARS: usize = 512;

/// Reads a provider response, classifying non-2xx bodies and parsing the rest.
pub async fn parse_json_response<T: DeserializeOwned>(
    provider: &'static str,
    res: Response,
) -> Result<T, SketchApiError> {
    let status = res.status();
    let text = match res.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{} response body: {:?}", provider, e);
            return Err(SketchApiError::Upstream {
                provider,
                detail: e.to_string(),
            });
        }
    };

    if !status.is_success() {
        tracing::warn!("{} responded {}: {}", provider, status.as_u16(), text);
        return Err(moderation::classify_provider_error(
            provider,
            format!("{} {}", status.as_u16(), error_detail(&text)),
        ));
    }

    match serde_json::from_str(&text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::warn!("{} returned {:?}", provider, text);
            Err(SketchApiError::UnexpectedResponseShape {
                provider,
                detail: e.to_string(),
            })
        }
    }
}

pub fn transport_error(provider: &'static str, e: reqwest::Error) -> SketchApiError {
    tracing::warn!("{} request: {:?}", provider, e);
    SketchApiError::Upstream {
        provider,
        detail: e.to_string(),
    }
}

/// Pulls the human readable message out of an error body.
///
/// OpenAI nests it under `error.message` (with a `code` next to it),
/// Replicate uses a top level `detail`. Anything else is passed through.
pub fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(error) = value.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| error.as_str());
            let code = error.get("code").and_then(Value::as_str);

            match (message, code) {
                (Some(message), Some(code)) => return format!("{} ({})", message, code),
                (Some(message), None) => return message.to_string(),
                _ => {}
            }
        }
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
    }

    truncate(body.trim(), MAX_DETAIL_CHARS)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => [&text[..index], "..."].concat(),
        None => text.to_string(),
    }
}
