use serde::Deserialize;
use serde_json::Value;

use super::super::enums::replicate_prediction_status::ReplicatePredictionStatus;

#[derive(Debug, Deserialize)]
pub struct ReplicatePredictionsResponse {
    pub id: String,
    pub status: ReplicatePredictionStatus,
    pub output: Option<Value>,
    pub error: Option<Value>,
    pub logs: Option<String>,
}

impl ReplicatePredictionsResponse {
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.to_string(),
            Some(Value::Null) | None => format!("prediction {} ended as {:?}", self.id, self.status),
            Some(other) => other.to_string(),
        }
    }

    /// The url of the final image. List outputs hold intermediate steps
    /// first, so the last entry wins.
    pub fn output_url(&self) -> Option<&str> {
        match self.output.as_ref()? {
            Value::Array(items) => items.last().and_then(Value::as_str),
            Value::String(url) => Some(url),
            _ => None,
        }
    }
}
