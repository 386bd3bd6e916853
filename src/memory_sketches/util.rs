pub mod grayscale;
pub mod moderation;
pub mod prompts;
pub mod response;
