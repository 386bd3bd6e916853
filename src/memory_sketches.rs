pub mod apis;
pub mod controller;
pub mod enums;
pub mod errors;
pub mod generators;
pub mod models;
pub mod service;
pub mod util;
