pub mod chat_completion_request;
