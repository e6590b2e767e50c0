//! Channels API.

use serde_json::Value;

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;

/// Channels API client.
pub struct ChannelsApi {
    client: AdminClient,
}

impl ChannelsApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List all open channels.
    pub async fn list(&self) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["channels"])?, RequestOptions::new())
            .await
    }

    /// List channels in a vhost.
    pub async fn list_for_vhost(&self, vhost: &str) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["vhosts", vhost, "channels"])?, RequestOptions::new())
            .await
    }

    /// Get a channel by name.
    pub async fn get(&self, name: &str) -> Result<Value> {
        self.client
            .fetch(&api_path(&["channels", name])?, RequestOptions::new())
            .await
    }
}
