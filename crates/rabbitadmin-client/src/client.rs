//! Main client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{
    BindingsApi, ChannelsApi, ClusterApi, ConnectionsApi, ConsumersApi, DefinitionsApi,
    ExchangesApi, HealthApi, PermissionsApi, PoliciesApi, QueuesApi, UsersApi, VhostsApi,
};
use crate::error::{Error, Result};

/// RabbitMQ management API client.
///
/// Cloning is cheap; clones share the same configuration and connection pool.
///
/// # Example
///
/// ```no_run
/// use rabbitadmin_client::AdminClient;
///
/// # async fn example() -> rabbitadmin_client::Result<()> {
/// let client = AdminClient::builder()
///     .base_url("http://localhost:15672")
///     .credentials("guest", "guest")
///     .build()?;
///
/// let vhosts = client.vhosts().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones, never mutated).
struct ClientInner {
    /// HTTP client.
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    /// Basic-auth user name.
    username: String,
    /// Basic-auth password.
    password: String,
    /// Headers sent with every request.
    default_headers: HeaderMap,
    /// Request timeout, if any beyond the transport's own.
    timeout: Option<Duration>,
}

/// Per-call additions to a request.
///
/// Headers set here replace a default header with the same name and leave
/// the others in place. `Authorization` is always taken from the client.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl RequestOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header for this call.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter for this call.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

impl fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url)
            .field("username", &self.inner.username)
            .finish_non_exhaustive()
    }
}

impl AdminClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client from the current context of the user's contexts file.
    pub fn from_current_context() -> Result<Self> {
        let file = rabbitadmin_config::load_contexts()?;
        let context = file
            .current()
            .ok_or_else(|| Error::Config("no current-context configured".to_string()))?;
        let mut builder = ClientBuilder::from_context(context)?;
        if let Some(secs) = file.timeout_for(context) {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the cluster API (overview, nodes, extensions).
    pub fn cluster(&self) -> ClusterApi {
        ClusterApi::new(self.clone())
    }

    /// Access the definitions API.
    pub fn definitions(&self) -> DefinitionsApi {
        DefinitionsApi::new(self.clone())
    }

    /// Access the connections API.
    pub fn connections(&self) -> ConnectionsApi {
        ConnectionsApi::new(self.clone())
    }

    /// Access the channels API.
    pub fn channels(&self) -> ChannelsApi {
        ChannelsApi::new(self.clone())
    }

    /// Access the consumers API.
    pub fn consumers(&self) -> ConsumersApi {
        ConsumersApi::new(self.clone())
    }

    /// Access the exchanges API.
    pub fn exchanges(&self) -> ExchangesApi {
        ExchangesApi::new(self.clone())
    }

    /// Access the queues API.
    pub fn queues(&self) -> QueuesApi {
        QueuesApi::new(self.clone())
    }

    /// Access the bindings API.
    pub fn bindings(&self) -> BindingsApi {
        BindingsApi::new(self.clone())
    }

    /// Access the vhosts API.
    pub fn vhosts(&self) -> VhostsApi {
        VhostsApi::new(self.clone())
    }

    /// Access the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access the permissions API.
    pub fn permissions(&self) -> PermissionsApi {
        PermissionsApi::new(self.clone())
    }

    /// Access the policies API.
    pub fn policies(&self) -> PoliciesApi {
        PoliciesApi::new(self.clone())
    }

    /// Access the health API.
    pub fn health(&self) -> HealthApi {
        HealthApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resource primitives
    // ─────────────────────────────────────────────────────────────────────────

    /// GET `path` and decode the JSON response.
    ///
    /// `path` must start with `/` and have caller-supplied segments
    /// percent-encoded already.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let response = self.send(Method::GET, path, None, options).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// PUT `path`, JSON-encoding `body` when present. The response body is discarded.
    pub async fn upsert<B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_vec).transpose()?;
        self.send(Method::PUT, path, body, options).await?;
        Ok(())
    }

    /// POST `path`, JSON-encoding `body` when present. The response body is discarded.
    pub async fn create<B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_vec).transpose()?;
        self.send(Method::POST, path, body, options).await?;
        Ok(())
    }

    /// DELETE `path`.
    pub async fn remove(&self, path: &str, options: RequestOptions) -> Result<()> {
        self.send(Method::DELETE, path, None, options).await?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build the absolute URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.inner.base_url, path))?)
    }

    /// Defaults overlaid with the per-call headers, minus any per-call `Authorization`.
    pub(crate) fn merged_headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = self.inner.default_headers.clone();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidArgument(format!("invalid header name '{name}'")))?;
            if name == AUTHORIZATION {
                continue;
            }
            let value = HeaderValue::from_str(value).map_err(|_| {
                Error::InvalidArgument(format!("invalid value for header '{name}'"))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Issue one request and fail on any non-2xx status.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: RequestOptions,
    ) -> Result<reqwest::Response> {
        let url = self.url(path)?;
        let mut headers = self.merged_headers(&options)?;

        tracing::debug!(%method, %url, has_body = body.is_some(), "sending management API request");

        let mut request = self
            .inner
            .http
            .request(method.clone(), url.clone())
            .basic_auth(&self.inner.username, Some(&self.inner.password));

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }

        if let Some(body) = body {
            headers
                .entry(CONTENT_TYPE)
                .or_insert(HeaderValue::from_static("application/json"));
            request = request.body(body);
        }

        let response = request.headers(headers).send().await?;
        let status = response.status();

        tracing::debug!(%method, %url, status = status.as_u16(), "management API responded");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Builder for creating an [`AdminClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            headers: Vec::new(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Start a builder from a named connection context.
    pub fn from_context(context: &rabbitadmin_config::Context) -> Result<Self> {
        let password = context.credentials.resolve_password()?;
        let mut builder = Self::new()
            .base_url(&context.server)
            .credentials(&context.credentials.username, password);
        if let Some(secs) = context.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Set the management API base URL, e.g. `http://localhost:15672`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the basic-auth credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a request timeout. Unset, requests are only bounded by the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<AdminClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let (Some(username), Some(password)) = (self.username, self.password) else {
            return Err(Error::Config("credentials are required".to_string()));
        };

        Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Config(format!("invalid header name '{name}'")))?;
            if name == AUTHORIZATION {
                return Err(Error::Config(
                    "Authorization is derived from credentials".to_string(),
                ));
            }
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::Config(format!("invalid value for header '{name}'")))?;
            default_headers.insert(name, value);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("rabbitadmin-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(AdminClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                username,
                password,
                default_headers,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AdminClient {
        ClientBuilder::new()
            .base_url("http://localhost:15672")
            .credentials("guest", "guest")
            .header("X-Team", "platform")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_base_url() {
        let err = ClientBuilder::new()
            .credentials("guest", "guest")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_requires_credentials() {
        let err = ClientBuilder::new()
            .base_url("http://localhost:15672")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let err = ClientBuilder::new()
            .base_url("not a url")
            .credentials("guest", "guest")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_builder_rejects_authorization_default() {
        let err = ClientBuilder::new()
            .base_url("http://localhost:15672")
            .credentials("guest", "guest")
            .header("Authorization", "Bearer x")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_leaves_timeout_to_transport() {
        assert!(client().inner.timeout.is_none());

        let client = ClientBuilder::new()
            .base_url("http://localhost:15672")
            .credentials("guest", "guest")
            .timeout(Duration::from_secs(90))
            .build()
            .unwrap();
        assert_eq!(client.inner.timeout, Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:15672//")
            .credentials("guest", "guest")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:15672");
    }

    #[test]
    fn test_url_keeps_encoded_segments() {
        let url = client().url("/api/vhosts/%2F").unwrap();
        assert_eq!(url.as_str(), "http://localhost:15672/api/vhosts/%2F");
    }

    #[test]
    fn test_url_with_path_prefix() {
        let client = ClientBuilder::new()
            .base_url("https://rabbit.example.com/management/")
            .credentials("guest", "guest")
            .build()
            .unwrap();
        let url = client.url("/api/overview").unwrap();
        assert_eq!(url.as_str(), "https://rabbit.example.com/management/api/overview");
    }

    #[test]
    fn test_merged_headers_keep_defaults() {
        let headers = client().merged_headers(&RequestOptions::new()).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("x-team").unwrap(), "platform");
    }

    #[test]
    fn test_merged_headers_call_specific_wins() {
        let options = RequestOptions::new()
            .header("X-Team", "storage")
            .header("X-Reason", "maintenance");
        let headers = client().merged_headers(&options).unwrap();
        assert_eq!(headers.get("x-team").unwrap(), "storage");
        assert_eq!(headers.get("x-reason").unwrap(), "maintenance");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_merged_headers_ignore_authorization() {
        let options = RequestOptions::new().header("Authorization", "Basic Zm9vOmJhcg==");
        let headers = client().merged_headers(&options).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_merged_headers_reject_invalid_name() {
        let options = RequestOptions::new().header("bad header", "x");
        let err = client().merged_headers(&options).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_builder_from_context() {
        use rabbitadmin_config::{Context, Credentials};

        let context = Context::new(
            "staging",
            "https://rabbit.staging.lan:15671/",
            Credentials::plain("ops", "s3cret"),
        )
        .with_timeout(5);
        let builder = ClientBuilder::from_context(&context).unwrap();
        assert_eq!(builder.timeout, Some(Duration::from_secs(5)));

        let client = builder.build().unwrap();
        assert_eq!(client.base_url(), "https://rabbit.staging.lan:15671");
        assert_eq!(client.inner.username, "ops");
    }

    #[test]
    fn test_builder_from_context_without_password() {
        use rabbitadmin_config::{Context, Credentials};

        let context = Context::new(
            "broken",
            "http://localhost:15672",
            Credentials::from_env("ops", "RABBITADMIN_CLIENT_TEST_NEVER_SET"),
        );
        let err = ClientBuilder::from_context(&context).unwrap_err();
        assert!(matches!(err, Error::Profile(_)));
    }

    #[test]
    fn test_debug_hides_password() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:15672")
            .credentials("ops", "hunter2")
            .build()
            .unwrap();
        let rendered = format!("{client:?}");
        assert!(rendered.contains("localhost:15672"));
        assert!(rendered.contains("ops"));
        assert!(!rendered.contains("hunter2"));
    }
}
