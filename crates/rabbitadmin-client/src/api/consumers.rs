//! Consumers API.

use serde_json::Value;

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;

/// Consumers API client.
pub struct ConsumersApi {
    client: AdminClient,
}

impl ConsumersApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List all consumers.
    pub async fn list(&self) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["consumers"])?, RequestOptions::new())
            .await
    }

    /// List consumers in a vhost.
    pub async fn list_for_vhost(&self, vhost: &str) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["consumers", vhost])?, RequestOptions::new())
            .await
    }
}
