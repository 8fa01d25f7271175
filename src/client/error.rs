use thiserror::Error;

/// Harness-side failure. Error statuses returned by the service are not
/// errors here; they come back as an [`ApiResponse`](super::ApiResponse).
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response has no `{0}`")]
    MissingField(String),
}
