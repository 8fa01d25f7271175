use crate::client::error::ClientError;
use crate::client::response::ApiResponse;
use crate::client::rest::RestClient;
use crate::domain::user::{Credentials, TokenRequest, User};
use tracing::{info, instrument};

const REGISTER_PATH: &str = "/api/auth/register";
const LOGIN_PATH: &str = "/api/auth/login";
const USER_PATH: &str = "/api/auth/user";
const TOKEN_PATH: &str = "/api/auth/token";
const LOGOUT_PATH: &str = "/api/auth/logout";

/// User lifecycle requests. Nothing is validated locally; incomplete
/// payloads go to the service as they are.
#[derive(Debug, Clone)]
pub struct UserClient {
    rest: RestClient,
}

impl UserClient {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    #[instrument(skip(self, user), fields(email = ?user.email))]
    pub async fn create_user(&self, user: &User) -> Result<ApiResponse, ClientError> {
        info!("POST {}", REGISTER_PATH);
        self.rest.post(REGISTER_PATH, None, Some(user)).await
    }

    #[instrument(skip(self, credentials), fields(email = ?credentials.email))]
    pub async fn login_user(&self, credentials: &Credentials) -> Result<ApiResponse, ClientError> {
        info!("POST {}", LOGIN_PATH);
        self.rest.post(LOGIN_PATH, None, Some(credentials)).await
    }

    #[instrument(skip(self, token))]
    pub async fn get_user(&self, token: Option<&str>) -> Result<ApiResponse, ClientError> {
        info!("GET {}", USER_PATH);
        self.rest.get(USER_PATH, token).await
    }

    #[instrument(skip(self, user, token), fields(authorised = token.is_some()))]
    pub async fn change_user(
        &self,
        user: &User,
        token: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        info!("PATCH {}", USER_PATH);
        self.rest.patch(USER_PATH, token, Some(user)).await
    }

    #[instrument(skip(self, token), fields(authorised = token.is_some()))]
    pub async fn delete_user(&self, token: Option<&str>) -> Result<ApiResponse, ClientError> {
        info!("DELETE {}", USER_PATH);
        self.rest.delete(USER_PATH, token).await
    }

    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<ApiResponse, ClientError> {
        info!("POST {}", TOKEN_PATH);
        self.rest
            .post(TOKEN_PATH, None, Some(&TokenRequest::new(refresh_token)))
            .await
    }

    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: &str) -> Result<ApiResponse, ClientError> {
        info!("POST {}", LOGOUT_PATH);
        self.rest
            .post(LOGOUT_PATH, None, Some(&TokenRequest::new(refresh_token)))
            .await
    }
}
