//! Definitions API (topology export/import).

use serde_json::Value;

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;

/// Definitions API client.
///
/// A definitions document describes users, vhosts, permissions, policies,
/// queues, exchanges and bindings; it is the broker's backup format.
pub struct DefinitionsApi {
    client: AdminClient,
}

impl DefinitionsApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Export the broker-wide definitions document.
    pub async fn export(&self) -> Result<Value> {
        self.client
            .fetch(&api_path(&["definitions"])?, RequestOptions::new())
            .await
    }

    /// Import a definitions document, merging it into the broker.
    pub async fn import(&self, definitions: &Value) -> Result<()> {
        self.client
            .create(&api_path(&["definitions"])?, Some(definitions), RequestOptions::new())
            .await
    }

    /// Export the definitions of a single vhost.
    pub async fn export_for_vhost(&self, vhost: &str) -> Result<Value> {
        self.client
            .fetch(&api_path(&["definitions", vhost])?, RequestOptions::new())
            .await
    }

    /// Import definitions into a single vhost.
    pub async fn import_for_vhost(&self, vhost: &str, definitions: &Value) -> Result<()> {
        self.client
            .create(
                &api_path(&["definitions", vhost])?,
                Some(definitions),
                RequestOptions::new(),
            )
            .await
    }
}
