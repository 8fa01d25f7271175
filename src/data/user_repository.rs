use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::StoredUser;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace, warn};

#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
    refresh_tokens: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            refresh_tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn create_user(&self, user: StoredUser) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            warn!("Email already registered");
            return Err(DomainError::UserAlreadyExists.into());
        }
        users.insert(user.id.clone(), user);
        debug!("User saved to memory storage");
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn update_user(&self, user: StoredUser) -> Result<()> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            warn!("Email belongs to another user");
            return Err(DomainError::EmailTaken.into());
        }
        if !users.contains_key(&user.id) {
            warn!("Updating a user that no longer exists");
            return Err(DomainError::Unauthorised.into());
        }
        users.insert(user.id.clone(), user);
        debug!("User updated in memory storage");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn delete_user(&self, id: &str) -> Result<Option<StoredUser>> {
        let removed = self.users.write().await.remove(id);
        if removed.is_some() {
            let mut tokens = self.refresh_tokens.write().await;
            tokens.retain(|_, owner| owner != id);
            debug!("User and refresh tokens removed");
        }
        Ok(removed)
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
        let users = self.users.read().await;
        let user = users.values().find(|u| u.email == email).cloned();
        trace!(found = user.is_some(), "Looked up user by email");
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    async fn find_user_by_id(&self, id: &str) -> Result<Option<StoredUser>> {
        let users = self.users.read().await;
        let user = users.get(id).cloned();
        trace!(found = user.is_some(), "Looked up user by id");
        Ok(user)
    }

    #[instrument(skip(self, token), fields(user_id = user_id))]
    async fn save_refresh_token(&self, token: String, user_id: &str) -> Result<()> {
        let mut tokens = self.refresh_tokens.write().await;
        tokens.insert(token, user_id.to_string());
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn take_refresh_token(&self, token: &str) -> Result<Option<String>> {
        let mut tokens = self.refresh_tokens.write().await;
        Ok(tokens.remove(token))
    }
}
