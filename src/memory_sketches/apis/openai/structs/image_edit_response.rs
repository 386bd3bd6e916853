use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ImageEditResponse {
    #[serde(default)]
    pub data: Vec<ImageEditData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageEditData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
}
