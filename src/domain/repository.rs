use crate::domain::order::StoredOrder;
use crate::domain::user::StoredUser;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new account; fails with `UserAlreadyExists` when the email is taken.
    async fn create_user(&self, user: StoredUser) -> Result<()>;
    /// Replaces an existing account; fails with `EmailTaken` when another account owns the email.
    async fn update_user(&self, user: StoredUser) -> Result<()>;
    async fn delete_user(&self, id: &str) -> Result<Option<StoredUser>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<StoredUser>>;
    async fn save_refresh_token(&self, token: String, user_id: &str) -> Result<()>;
    /// Removes the refresh token and returns the user id it belonged to.
    async fn take_refresh_token(&self, token: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Assigns the next order number and stores the order in one step.
    async fn insert_order(&self, order: StoredOrder) -> Result<StoredOrder>;
    /// Orders owned by `owner_id`, oldest first.
    async fn find_orders_by_owner(&self, owner_id: &str) -> Result<Vec<StoredOrder>>;
}
