use bytes::Bytes;
use mime::Mime;

use crate::app::util::data_url;

#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Bytes,
    pub mime_type: Mime,
}

impl ImagePayload {
    /// Keeps a declared `image/*` type, otherwise sniffs the bytes.
    pub fn new(data: Bytes, declared: Option<&Mime>) -> Self {
        let mime_type = match declared {
            Some(mime_type) if mime_type.type_() == mime::IMAGE => mime_type.clone(),
            _ => sniff_mime_type(&data),
        };

        Self { data, mime_type }
    }

    pub fn to_data_url(&self) -> String {
        data_url::encode(self.mime_type.essence_str(), &self.data)
    }

    pub fn file_name(&self) -> String {
        let extension = match self.mime_type.subtype().as_str() {
            "jpeg" => "jpg",
            other => other,
        };
        ["upload.", extension].concat()
    }
}

fn sniff_mime_type(data: &[u8]) -> Mime {
    image::guess_format(data)
        .ok()
        .and_then(|format| format.to_mime_type().parse::<Mime>().ok())
        .unwrap_or(mime::IMAGE_PNG)
}
