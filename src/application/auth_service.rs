use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{Credentials, Session, StoredUser, User, UserProfile};
use crate::infrastructure::security::{
    generate_access_token, generate_refresh_token, hash_password, validate_access_token,
    verify_password,
};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// Present and non-empty, the way the service treats required fields.
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
    access_token_ttl_secs: u64,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String, access_token_ttl_secs: u64) -> Self {
        Self {
            user_repository,
            jwt_secret,
            access_token_ttl_secs,
        }
    }

    #[instrument(skip(self, req), fields(email = ?req.email))]
    pub async fn register_user(&self, req: User) -> Result<(UserProfile, Session)> {
        trace!("Starting user registration");

        let (Some(email), Some(password), Some(name)) = (
            provided(req.email),
            provided(req.password),
            provided(req.name),
        ) else {
            warn!("Registration without all required fields");
            return Err(DomainError::MissingUserFields.into());
        };

        let password_hash = hash_password(&password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let now = Utc::now();
        let user = StoredUser {
            id: Uuid::new_v4().to_string(),
            email: email.to_lowercase(),
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        debug!(user_id = %user.id, email = %user.email, "Saving user to repository");
        self.user_repository.create_user(user.clone()).await?;
        let session = self.open_session(&user.id).await?;

        info!(user_id = %user.id, email = %user.email, "User registered successfully");
        Ok((user.profile(), session))
    }

    #[instrument(skip(self, req), fields(email = ?req.email))]
    pub async fn login(&self, req: Credentials) -> Result<(UserProfile, Session)> {
        trace!("Starting login");

        let (Some(email), Some(password)) = (provided(req.email), provided(req.password)) else {
            warn!("Login without email or password");
            return Err(DomainError::IncorrectCredentials.into());
        };

        let user = self
            .user_repository
            .find_user_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "User not found during login");
                DomainError::IncorrectCredentials
            })?;

        let is_valid = verify_password(&password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;
        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::IncorrectCredentials.into());
        }

        let session = self.open_session(&user.id).await?;
        info!(user_id = %user.id, email = %user.email, "Login successful");
        Ok((user.profile(), session))
    }

    /// Resolves an `Authorization` header value to the account it belongs to.
    #[instrument(skip(self, authorization))]
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<StoredUser> {
        let Some(header_value) = authorization else {
            debug!("Request without Authorization header");
            return Err(DomainError::Unauthorised.into());
        };

        let user_id = validate_access_token(header_value, &self.jwt_secret).map_err(|e| {
            warn!(reason = %e, "Rejected access token");
            DomainError::InvalidToken(e.to_string())
        })?;

        self.user_repository
            .find_user_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Token of a removed user");
                DomainError::Unauthorised.into()
            })
    }

    /// Like [`authenticate`](Self::authenticate), but an absent header means an anonymous caller.
    pub async fn authenticate_optional(
        &self,
        authorization: Option<&str>,
    ) -> Result<Option<StoredUser>> {
        match authorization {
            Some(_) => self.authenticate(authorization).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn profile(&self, authorization: Option<&str>) -> Result<UserProfile> {
        Ok(self.authenticate(authorization).await?.profile())
    }

    #[instrument(skip(self, authorization, patch))]
    pub async fn update_user(
        &self,
        authorization: Option<&str>,
        patch: User,
    ) -> Result<UserProfile> {
        let mut user = self.authenticate(authorization).await?;

        if let Some(email) = provided(patch.email) {
            user.email = email.to_lowercase();
        }
        if let Some(name) = provided(patch.name) {
            user.name = name;
        }
        if let Some(password) = provided(patch.password) {
            user.password_hash = hash_password(&password).map_err(|e| {
                error!(error = %e, "Failed to hash password");
                DomainError::Internal(format!("Failed to hash password: {}", e))
            })?;
        }
        user.updated_at = Utc::now();

        self.user_repository.update_user(user.clone()).await?;
        info!(user_id = %user.id, email = %user.email, "User updated");
        Ok(user.profile())
    }

    #[instrument(skip(self, authorization))]
    pub async fn delete_user(&self, authorization: Option<&str>) -> Result<()> {
        let user = self.authenticate(authorization).await?;
        self.user_repository.delete_user(&user.id).await?;
        info!(user_id = %user.id, email = %user.email, "User removed");
        Ok(())
    }

    /// Exchanges a refresh token for a new session; the old refresh token is spent.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: Option<String>) -> Result<Session> {
        let user_id = self.spend_refresh_token(refresh_token).await?;
        if self.user_repository.find_user_by_id(&user_id).await?.is_none() {
            return Err(DomainError::InvalidRefreshToken.into());
        }
        let session = self.open_session(&user_id).await?;
        info!(user_id = %user_id, "Session refreshed");
        Ok(session)
    }

    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: Option<String>) -> Result<()> {
        let user_id = self.spend_refresh_token(refresh_token).await?;
        info!(user_id = %user_id, "Logged out");
        Ok(())
    }

    async fn spend_refresh_token(&self, refresh_token: Option<String>) -> Result<String> {
        let token = provided(refresh_token).ok_or(DomainError::InvalidRefreshToken)?;
        self.user_repository
            .take_refresh_token(&token)
            .await?
            .ok_or_else(|| {
                warn!("Unknown refresh token");
                DomainError::InvalidRefreshToken.into()
            })
    }

    async fn open_session(&self, user_id: &str) -> Result<Session> {
        let access_token = generate_access_token(user_id, &self.jwt_secret, self.access_token_ttl_secs)
            .map_err(|e| {
                error!(error = %e, "Failed to generate token");
                DomainError::Internal(format!("Failed to generate token: {}", e))
            })?;
        let refresh_token = generate_refresh_token();
        self.user_repository
            .save_refresh_token(refresh_token.clone(), user_id)
            .await?;

        Ok(Session {
            access_token,
            refresh_token,
        })
    }
}
