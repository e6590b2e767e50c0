//! Permissions API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::{Permission, PermissionSpec, WhoAmI};

/// Permissions API client.
pub struct PermissionsApi {
    client: AdminClient,
}

impl PermissionsApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List all permissions.
    pub async fn list(&self) -> Result<Vec<Permission>> {
        self.client
            .fetch(&api_path(&["permissions"])?, RequestOptions::new())
            .await
    }

    /// Get a user's permissions in a vhost.
    pub async fn get(&self, vhost: &str, user: &str) -> Result<Permission> {
        self.client
            .fetch(&api_path(&["permissions", vhost, user])?, RequestOptions::new())
            .await
    }

    /// Grant a user permissions in a vhost, replacing any existing grant.
    pub async fn grant(&self, vhost: &str, user: &str, spec: &PermissionSpec) -> Result<()> {
        self.client
            .upsert(&api_path(&["permissions", vhost, user])?, Some(spec), RequestOptions::new())
            .await
    }

    /// Revoke a user's permissions in a vhost.
    pub async fn revoke(&self, vhost: &str, user: &str) -> Result<()> {
        self.client
            .remove(&api_path(&["permissions", vhost, user])?, RequestOptions::new())
            .await
    }

    /// The user the client is authenticated as.
    pub async fn whoami(&self) -> Result<WhoAmI> {
        self.client
            .fetch(&api_path(&["whoami"])?, RequestOptions::new())
            .await
    }
}
