//! Policies API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::{Policy, PolicySpec};

/// Policies API client.
pub struct PoliciesApi {
    client: AdminClient,
}

impl PoliciesApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List policies in all vhosts.
    pub async fn list(&self) -> Result<Vec<Policy>> {
        self.client
            .fetch(&api_path(&["policies"])?, RequestOptions::new())
            .await
    }

    /// List policies in a vhost.
    pub async fn list_for_vhost(&self, vhost: &str) -> Result<Vec<Policy>> {
        self.client
            .fetch(&api_path(&["policies", vhost])?, RequestOptions::new())
            .await
    }

    /// Get a policy.
    pub async fn get(&self, vhost: &str, name: &str) -> Result<Policy> {
        self.client
            .fetch(&api_path(&["policies", vhost, name])?, RequestOptions::new())
            .await
    }

    /// Create or replace a policy.
    pub async fn set(&self, vhost: &str, name: &str, spec: &PolicySpec) -> Result<()> {
        self.client
            .upsert(&api_path(&["policies", vhost, name])?, Some(spec), RequestOptions::new())
            .await
    }

    /// Delete a policy.
    pub async fn delete(&self, vhost: &str, name: &str) -> Result<()> {
        self.client
            .remove(&api_path(&["policies", vhost, name])?, RequestOptions::new())
            .await
    }
}
