//! REST client for the Stellar Burgers API.

pub mod error;
pub mod fixtures;
pub mod order_client;
pub mod response;
pub mod rest;
pub mod user_client;

pub use error::ClientError;
pub use fixtures::UserGenerator;
pub use order_client::{OrderClient, OrderRequest};
pub use response::ApiResponse;
pub use rest::RestClient;
pub use user_client::UserClient;
