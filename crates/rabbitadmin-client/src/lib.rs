//! Async client SDK for the RabbitMQ management HTTP API.
//!
//! Every endpoint is a thin call onto four resource primitives on
//! [`AdminClient`]: `fetch` (GET), `upsert` (PUT), `create` (POST) and
//! `remove` (DELETE). They share one pipeline: base URL + path, default
//! headers overlaid with per-call headers, HTTP Basic auth, JSON bodies,
//! and non-2xx statuses turned into [`Error::HttpStatus`].
//!
//! # Example
//!
//! ```no_run
//! use rabbitadmin_client::{AdminClient, ExchangeSpec, Result, UserCredential};
//!
//! # async fn example() -> Result<()> {
//! let client = AdminClient::builder()
//!     .base_url("http://localhost:15672")
//!     .credentials("guest", "guest")
//!     .build()?;
//!
//! client.vhosts().create("orders", Some(true)).await?;
//! client
//!     .users()
//!     .create("svc-orders", &UserCredential::Plain("s3cret".into()), "")
//!     .await?;
//! client
//!     .permissions()
//!     .grant("orders", "svc-orders", &Default::default())
//!     .await?;
//! client
//!     .exchanges()
//!     .declare("orders", "events", &ExchangeSpec::new("topic"))
//!     .await?;
//!
//! // The default vhost is literally "/"; path segments are escaped for you.
//! for exchange in client.exchanges().list_for_vhost("/").await? {
//!     println!("{} ({})", exchange.name, exchange.kind);
//! }
//!
//! match client.connections().delete("gone", Some("maintenance")).await {
//!     Err(e) if e.is_not_found() => {}
//!     other => other?,
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Cluster**: overview, cluster name, nodes, extensions
//! - **Definitions**: export/import, broker-wide or per vhost
//! - **Connections / Channels / Consumers**: list, inspect, force-close
//! - **Exchanges / Queues / Bindings**: list, declare, delete, purge, bind
//! - **Vhosts / Users / Permissions**: full CRUD plus `whoami`
//! - **Policies**: list, set, delete
//! - **Health**: aliveness test

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use client::{AdminClient, ClientBuilder, RequestOptions};
pub use error::{Error, Result};
pub use types::*;
