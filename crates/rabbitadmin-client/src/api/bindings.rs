//! Bindings API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::{BindingInfo, BindingSpec};

/// Bindings API client.
pub struct BindingsApi {
    client: AdminClient,
}

impl BindingsApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List bindings in all vhosts.
    pub async fn list(&self) -> Result<Vec<BindingInfo>> {
        self.client
            .fetch(&api_path(&["bindings"])?, RequestOptions::new())
            .await
    }

    /// List bindings in a vhost.
    pub async fn list_for_vhost(&self, vhost: &str) -> Result<Vec<BindingInfo>> {
        self.client
            .fetch(&api_path(&["bindings", vhost])?, RequestOptions::new())
            .await
    }

    /// Bind a queue to an exchange.
    pub async fn bind_queue(
        &self,
        vhost: &str,
        exchange: &str,
        queue: &str,
        spec: &BindingSpec,
    ) -> Result<()> {
        self.client
            .create(
                &api_path(&["bindings", vhost, "e", exchange, "q", queue])?,
                Some(spec),
                RequestOptions::new(),
            )
            .await
    }

    /// List the bindings between an exchange and a queue.
    pub async fn list_between(
        &self,
        vhost: &str,
        exchange: &str,
        queue: &str,
    ) -> Result<Vec<BindingInfo>> {
        self.client
            .fetch(
                &api_path(&["bindings", vhost, "e", exchange, "q", queue])?,
                RequestOptions::new(),
            )
            .await
    }
}
