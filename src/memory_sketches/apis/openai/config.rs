pub const IMAGE_EDIT_PROVIDER: &str = "openai-edit";
pub const CHAT_PROVIDER: &str = "llm";
