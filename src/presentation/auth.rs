use crate::domain::user::{AuthResponse, Credentials, TokenRequest, User, UserResponse};
use crate::presentation::handlers::{ApiError, AppState, MessageResponse};
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use std::future::{Ready, ready};
use std::ops::Deref;
use tracing::{info, instrument};

/// Raw `Authorization` header value, if the caller sent one.
#[derive(Debug, Clone, Default)]
pub struct BearerHeader(pub Option<String>);

impl Deref for BearerHeader {
    type Target = Option<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for BearerHeader {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let value = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        ready(Ok(BearerHeader(value)))
    }
}

#[instrument(skip(state, body))]
pub async fn register(
    state: web::Data<AppState>,
    body: Option<web::Json<User>>,
) -> Result<HttpResponse, ApiError> {
    let user = body.map(web::Json::into_inner).unwrap_or_default();
    info!(email = ?user.email, "Registration request received");

    let (profile, session) = state.auth_service.register_user(user).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(Some(profile), session)))
}

#[instrument(skip(state, body))]
pub async fn login(
    state: web::Data<AppState>,
    body: Option<web::Json<Credentials>>,
) -> Result<HttpResponse, ApiError> {
    let credentials = body.map(web::Json::into_inner).unwrap_or_default();
    info!(email = ?credentials.email, "Login request received");

    let (profile, session) = state.auth_service.login(credentials).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(Some(profile), session)))
}

#[instrument(skip(state, authorization))]
pub async fn get_user(
    state: web::Data<AppState>,
    authorization: BearerHeader,
) -> Result<HttpResponse, ApiError> {
    let user = state.auth_service.profile(authorization.as_deref()).await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        user,
    }))
}

#[instrument(skip(state, authorization, body))]
pub async fn update_user(
    state: web::Data<AppState>,
    authorization: BearerHeader,
    body: Option<web::Json<User>>,
) -> Result<HttpResponse, ApiError> {
    let patch = body.map(web::Json::into_inner).unwrap_or_default();
    let user = state
        .auth_service
        .update_user(authorization.as_deref(), patch)
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse {
        success: true,
        user,
    }))
}

#[instrument(skip(state, authorization))]
pub async fn delete_user(
    state: web::Data<AppState>,
    authorization: BearerHeader,
) -> Result<HttpResponse, ApiError> {
    state
        .auth_service
        .delete_user(authorization.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("User successfully removed")))
}

#[instrument(skip(state, body))]
pub async fn refresh_token(
    state: web::Data<AppState>,
    body: Option<web::Json<TokenRequest>>,
) -> Result<HttpResponse, ApiError> {
    let token = body.and_then(|b| b.into_inner().token);
    let session = state.auth_service.refresh(token).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(None, session)))
}

#[instrument(skip(state, body))]
pub async fn logout(
    state: web::Data<AppState>,
    body: Option<web::Json<TokenRequest>>,
) -> Result<HttpResponse, ApiError> {
    let token = body.and_then(|b| b.into_inner().token);
    state.auth_service.logout(token).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Successful logout")))
}
