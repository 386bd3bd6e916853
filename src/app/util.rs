pub mod data_url;
pub mod fetch;
pub mod multipart;
#[cfg(test)]
pub mod test_server;
