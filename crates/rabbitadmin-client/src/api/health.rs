//! Health API.

use super::api_path;
use crate::client::{AdminClient, RequestOptions};
use crate::error::Result;
use crate::types::AlivenessStatus;

/// Health API client.
pub struct HealthApi {
    client: AdminClient,
}

impl HealthApi {
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// Publish and consume a test message in `vhost`.
    pub async fn aliveness(&self, vhost: &str) -> Result<AlivenessStatus> {
        self.client
            .fetch(&api_path(&["aliveness-test", vhost])?, RequestOptions::new())
            .await
    }

    /// Simple check - true only if the aliveness test reported `ok`.
    pub async fn is_alive(&self, vhost: &str) -> bool {
        match self.aliveness(vhost).await {
            Ok(status) => status.is_ok(),
            Err(e) => {
                tracing::debug!(vhost, error = %e, "aliveness test failed");
                false
            }
        }
    }
}
