pub mod chat_service;
pub mod config;
pub mod edit_service;
pub mod models;
pub mod structs;
