//! Queues API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::{BindingInfo, QueueInfo, QueueSpec};

/// Queues API client.
pub struct QueuesApi {
    client: AdminClient,
}

impl QueuesApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List queues in all vhosts.
    pub async fn list(&self) -> Result<Vec<QueueInfo>> {
        self.client
            .fetch(&api_path(&["queues"])?, RequestOptions::new())
            .await
    }

    /// List queues in a vhost.
    pub async fn list_for_vhost(&self, vhost: &str) -> Result<Vec<QueueInfo>> {
        self.client
            .fetch(&api_path(&["queues", vhost])?, RequestOptions::new())
            .await
    }

    /// Get a queue.
    pub async fn get(&self, vhost: &str, name: &str) -> Result<QueueInfo> {
        self.client
            .fetch(&api_path(&["queues", vhost, name])?, RequestOptions::new())
            .await
    }

    /// Declare a queue.
    pub async fn declare(&self, vhost: &str, name: &str, spec: &QueueSpec) -> Result<()> {
        self.client
            .upsert(&api_path(&["queues", vhost, name])?, Some(spec), RequestOptions::new())
            .await
    }

    /// Delete a queue.
    pub async fn delete(&self, vhost: &str, name: &str) -> Result<()> {
        self.client
            .remove(&api_path(&["queues", vhost, name])?, RequestOptions::new())
            .await
    }

    /// Drop every ready message in a queue.
    pub async fn purge(&self, vhost: &str, name: &str) -> Result<()> {
        self.client
            .remove(&api_path(&["queues", vhost, name, "contents"])?, RequestOptions::new())
            .await
    }

    /// Bindings whose destination is this queue.
    pub async fn bindings(&self, vhost: &str, name: &str) -> Result<Vec<BindingInfo>> {
        self.client
            .fetch(&api_path(&["queues", vhost, name, "bindings"])?, RequestOptions::new())
            .await
    }
}
