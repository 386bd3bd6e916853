pub mod openai;
pub mod replicate;
