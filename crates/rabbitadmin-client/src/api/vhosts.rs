//! Vhosts API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::{CreateVhostRequest, Permission, VhostInfo};

/// Vhosts API client.
pub struct VhostsApi {
    client: AdminClient,
}

impl VhostsApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List all vhosts.
    pub async fn list(&self) -> Result<Vec<VhostInfo>> {
        self.client
            .fetch(&api_path(&["vhosts"])?, RequestOptions::new())
            .await
    }

    /// Get a vhost by name.
    pub async fn get(&self, name: &str) -> Result<VhostInfo> {
        self.client
            .fetch(&api_path(&["vhosts", name])?, RequestOptions::new())
            .await
    }

    /// Create a vhost.
    ///
    /// `tracing` is sent only when set; otherwise the broker default applies.
    pub async fn create(&self, name: &str, tracing: Option<bool>) -> Result<()> {
        let body = CreateVhostRequest { tracing };
        self.client
            .upsert(&api_path(&["vhosts", name])?, Some(&body), RequestOptions::new())
            .await
    }

    /// Delete a vhost and everything in it.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .remove(&api_path(&["vhosts", name])?, RequestOptions::new())
            .await
    }

    /// List the permissions granted in a vhost.
    pub async fn permissions(&self, name: &str) -> Result<Vec<Permission>> {
        self.client
            .fetch(&api_path(&["vhosts", name, "permissions"])?, RequestOptions::new())
            .await
    }
}
