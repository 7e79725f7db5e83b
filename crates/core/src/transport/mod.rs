pub mod api_client;
pub mod reqwest_backend;
pub mod traits;
