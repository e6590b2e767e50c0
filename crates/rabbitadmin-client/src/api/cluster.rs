//! Cluster API.

use serde_json::Value;

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::ClusterName;

/// Cluster-wide information: overview, name, nodes and extensions.
pub struct ClusterApi {
    client: AdminClient,
}

impl ClusterApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Broker overview (versions, message rates, listeners, ...).
    pub async fn overview(&self) -> Result<Value> {
        self.client
            .fetch(&api_path(&["overview"])?, RequestOptions::new())
            .await
    }

    /// Get the cluster name.
    pub async fn name(&self) -> Result<ClusterName> {
        self.client
            .fetch(&api_path(&["cluster-name"])?, RequestOptions::new())
            .await
    }

    /// Rename the cluster.
    pub async fn set_name(&self, name: &str) -> Result<()> {
        let body = ClusterName {
            name: name.to_string(),
        };
        self.client
            .upsert(&api_path(&["cluster-name"])?, Some(&body), RequestOptions::new())
            .await
    }

    /// List cluster nodes.
    pub async fn nodes(&self) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["nodes"])?, RequestOptions::new())
            .await
    }

    /// Get a node by name, e.g. `rabbit@rabbit1`.
    pub async fn node(&self, name: &str) -> Result<Value> {
        self.client
            .fetch(&api_path(&["nodes", name])?, RequestOptions::new())
            .await
    }

    /// List management plugin extensions.
    pub async fn extensions(&self) -> Result<Vec<Value>> {
        self.client
            .fetch(&api_path(&["extensions"])?, RequestOptions::new())
            .await
    }
}
