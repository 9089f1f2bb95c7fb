//! Broker and buyer accounts

use tracing::info;

use crate::auth::User;
use crate::catalog::Role;
use crate::error::Result;
use crate::transport::Transport;

/// Client for `/api/users`
#[derive(Clone, Debug)]
pub struct UsersClient {
    transport: Transport,
}

impl UsersClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// List users, optionally restricted to one role
    pub async fn list(&self, role: Option<Role>) -> Result<Vec<User>> {
        self.transport
            .get("/api/users")
            .query_opt("role", role.map(Role::code))
            .execute_data::<Vec<User>>()
            .await
    }

    pub async fn brokers(&self) -> Result<Vec<User>> {
        self.list(Some(Role::Broker)).await
    }

    pub async fn buyers(&self) -> Result<Vec<User>> {
        self.list(Some(Role::Buyer)).await
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        self.transport
            .get(&format!("/api/users/{}", id))
            .execute_data::<User>()
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.transport
            .delete(&format!("/api/users/{}", id))
            .execute_empty()
            .await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
