pub const PREFIX: &str = "data:";

pub fn encode(mime_type: &str, data: &[u8]) -> String {
    [PREFIX, mime_type, ";base64,", &base64::encode(data)].concat()
}

/// Splits a base64 data URL into its mime type and decoded bytes.
pub fn decode(data_url: &str) -> Option<(String, Vec<u8>)> {
    let rest = data_url.strip_prefix(PREFIX)?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    let data = base64::decode(payload.trim()).ok()?;

    Some((mime_type.to_string(), data))
}
