use crate::client::error::ClientError;
use crate::client::response::ApiResponse;
use crate::infrastructure::config::ClientConfig;
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, instrument};

const JSON: &str = "application/json";

/// Base request settings shared by every wrapper: one HTTP client,
/// one base URL, JSON in both directions.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends one request. `token` is used verbatim as the `Authorization`
    /// header and is only attached when present; `body` is serialized as JSON.
    #[instrument(skip(self, token, body), fields(has_token = token.is_some(), status))]
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let raw = response.text().await?;

        tracing::Span::current().record("status", status);
        debug!(url = %url, status = status, "Response received");
        Ok(ApiResponse::from_parts(status, raw))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::GET, path, token, None).await
    }

    pub async fn post<B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, token, body).await
    }

    pub async fn patch<B>(
        &self,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, token, body).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::DELETE, path, token, None).await
    }
}
