pub mod chat_completion_response;
pub mod image_edit_response;
