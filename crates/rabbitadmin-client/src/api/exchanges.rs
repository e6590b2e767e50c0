//! Exchanges API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::{BindingInfo, ExchangeInfo, ExchangeSpec};

/// Exchanges API client.
pub struct ExchangesApi {
    client: AdminClient,
}

impl ExchangesApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List exchanges in all vhosts.
    pub async fn list(&self) -> Result<Vec<ExchangeInfo>> {
        self.client
            .fetch(&api_path(&["exchanges"])?, RequestOptions::new())
            .await
    }

    /// List exchanges in a vhost.
    pub async fn list_for_vhost(&self, vhost: &str) -> Result<Vec<ExchangeInfo>> {
        self.client
            .fetch(&api_path(&["exchanges", vhost])?, RequestOptions::new())
            .await
    }

    /// Get an exchange.
    pub async fn get(&self, vhost: &str, name: &str) -> Result<ExchangeInfo> {
        self.client
            .fetch(&api_path(&["exchanges", vhost, name])?, RequestOptions::new())
            .await
    }

    /// Declare an exchange. Re-declaring with identical settings is a no-op.
    pub async fn declare(&self, vhost: &str, name: &str, spec: &ExchangeSpec) -> Result<()> {
        self.client
            .upsert(&api_path(&["exchanges", vhost, name])?, Some(spec), RequestOptions::new())
            .await
    }

    /// Delete an exchange.
    pub async fn delete(&self, vhost: &str, name: &str) -> Result<()> {
        self.client
            .remove(&api_path(&["exchanges", vhost, name])?, RequestOptions::new())
            .await
    }

    /// Bindings in which this exchange is the source.
    pub async fn bindings_as_source(&self, vhost: &str, name: &str) -> Result<Vec<BindingInfo>> {
        self.client
            .fetch(
                &api_path(&["exchanges", vhost, name, "bindings", "source"])?,
                RequestOptions::new(),
            )
            .await
    }

    /// Bindings in which this exchange is the destination.
    pub async fn bindings_as_destination(
        &self,
        vhost: &str,
        name: &str,
    ) -> Result<Vec<BindingInfo>> {
        self.client
            .fetch(
                &api_path(&["exchanges", vhost, name, "bindings", "destination"])?,
                RequestOptions::new(),
            )
            .await
    }
}
