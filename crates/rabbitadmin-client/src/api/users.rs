//! Users API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::{CreateUserRequest, Permission, UserCredential, UserInfo};

/// Users API client.
pub struct UsersApi {
    client: AdminClient,
}

impl UsersApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List all users.
    pub async fn list(&self) -> Result<Vec<UserInfo>> {
        self.client
            .fetch(&api_path(&["users"])?, RequestOptions::new())
            .await
    }

    /// Get a user by name.
    pub async fn get(&self, name: &str) -> Result<UserInfo> {
        self.client
            .fetch(&api_path(&["users", name])?, RequestOptions::new())
            .await
    }

    /// Create or update a user.
    ///
    /// `tags` is a comma-separated list such as `"administrator"` or
    /// `"monitoring,policymaker"`; pass `""` for none.
    pub async fn create(&self, name: &str, credential: &UserCredential, tags: &str) -> Result<()> {
        let body = CreateUserRequest::new(credential, tags);
        self.client
            .upsert(&api_path(&["users", name])?, Some(&body), RequestOptions::new())
            .await
    }

    /// Create a user from separate password / password-hash arguments.
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// before contacting the broker unless exactly one is supplied.
    pub async fn create_with(
        &self,
        name: &str,
        password: Option<&str>,
        password_hash: Option<&str>,
        tags: &str,
    ) -> Result<()> {
        let credential = UserCredential::from_parts(password, password_hash)?;
        self.create(name, &credential, tags).await
    }

    /// Delete a user.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .remove(&api_path(&["users", name])?, RequestOptions::new())
            .await
    }

    /// List every permission granted to a user.
    pub async fn permissions(&self, name: &str) -> Result<Vec<Permission>> {
        self.client
            .fetch(&api_path(&["users", name, "permissions"])?, RequestOptions::new())
            .await
    }
}
