use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProvider {
    Replicate,
    OpenAiEdit,
}

impl FromStr for ImageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_ref() {
            "replicate" => Ok(Self::Replicate),
            "openai" | "openai_edit" | "openai-edit" => Ok(Self::OpenAiEdit),
            other => Err(format!("image provider {} not supported", other)),
        }
    }
}
