use bytes::Bytes;
use mime::Mime;

#[derive(Debug)]
pub struct FileProperties {
    pub id: String,
    pub field_name: String,
    pub file_name: Option<String>,
    pub mime_type: Option<Mime>,
    pub data: Bytes,
}
