//! Connections API.

use serde_json::Value;

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;

/// Header carrying the human-readable reason for a forced close.
const REASON_HEADER: &str = "X-Reason";

/// Connections API client.
pub struct ConnectionsApi {
    client: AdminClient,
}

impl ConnectionsApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List all open AMQP connections.
    pub async fn list(&self) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["connections"])?, RequestOptions::new())
            .await
    }

    /// List connections in a vhost.
    pub async fn list_for_vhost(&self, vhost: &str) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["vhosts", vhost, "connections"])?, RequestOptions::new())
            .await
    }

    /// Get a connection by name.
    pub async fn get(&self, name: &str) -> Result<Value> {
        self.client
            .fetch(&api_path(&["connections", name])?, RequestOptions::new())
            .await
    }

    /// Force-close a connection, optionally telling the client why.
    pub async fn delete(&self, name: &str, reason: Option<&str>) -> Result<()> {
        let options = match reason {
            Some(reason) => RequestOptions::new().header(REASON_HEADER, reason),
            None => RequestOptions::new(),
        };
        self.client
            .remove(&api_path(&["connections", name])?, options)
            .await
    }

    /// List the channels of a connection.
    pub async fn channels(&self, name: &str) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["connections", name, "channels"])?, RequestOptions::new())
            .await
    }
}
