use serde::{Serialize, Serializer};

use crate::app::util::data_url;

/// Where the generated sketch lives: on the provider's CDN, or inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchReference {
    Url(String),
    DataUrl(String),
}

impl SketchReference {
    pub fn from_provider_string(value: &str) -> Self {
        if value.starts_with(data_url::PREFIX) {
            Self::DataUrl(value.to_string())
        } else {
            Self::Url(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(value) | Self::DataUrl(value) => value,
        }
    }
}

impl Serialize for SketchReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
