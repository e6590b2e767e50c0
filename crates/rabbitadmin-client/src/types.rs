//! Request and response types for the management API.
//!
//! Response types keep the fields callers usually need and collect the rest
//! in `extra`, since the broker adds fields between releases.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Free-form JSON object (exchange arguments, policy definitions, ...).
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

// ─────────────────────────────────────────────────────────────────────────────
// Cluster
// ─────────────────────────────────────────────────────────────────────────────

/// Cluster name as returned by `/api/cluster-name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterName {
    /// Cluster name, e.g. `rabbit@rabbit1`.
    pub name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Vhosts
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a vhost creation request.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct CreateVhostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracing: Option<bool>,
}

/// A virtual host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VhostInfo {
    /// Vhost name; the default vhost is `/`.
    pub name: String,
    /// Whether message tracing is enabled.
    #[serde(default)]
    pub tracing: bool,
    /// Remaining fields reported by the broker.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// How a new user's password is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCredential {
    /// Plaintext password, hashed by the broker.
    Plain(String),
    /// Pre-computed password hash.
    Hashed(String),
}

impl UserCredential {
    /// Choose a credential from two optional inputs.
    ///
    /// Exactly one of `password` and `password_hash` must be given.
    pub fn from_parts(password: Option<&str>, password_hash: Option<&str>) -> crate::Result<Self> {
        match (password, password_hash) {
            (Some(password), None) => Ok(Self::Plain(password.to_string())),
            (None, Some(hash)) => Ok(Self::Hashed(hash.to_string())),
            (Some(_), Some(_)) => Err(crate::Error::InvalidArgument(
                "supply either password or password_hash, not both".to_string(),
            )),
            (None, None) => Err(crate::Error::InvalidArgument(
                "one of password or password_hash is required".to_string(),
            )),
        }
    }
}

/// Body of a user creation request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<&'a str>,
    pub tags: &'a str,
}

impl<'a> CreateUserRequest<'a> {
    pub(crate) fn new(credential: &'a UserCredential, tags: &'a str) -> Self {
        let (password, password_hash) = match credential {
            UserCredential::Plain(password) => (Some(password.as_str()), None),
            UserCredential::Hashed(hash) => (None, Some(hash.as_str())),
        };
        Self {
            password,
            password_hash,
            tags,
        }
    }
}

/// User tags.
///
/// Older brokers report tags as a comma-separated string, newer ones as a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserTags(pub Vec<String>);

impl UserTags {
    /// Check whether a tag is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }
}

impl<'de> Deserialize<'de> for UserTags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            List(Vec<String>),
            Joined(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::List(tags) => UserTags(tags),
            Raw::Joined(joined) => UserTags(
                joined
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        })
    }
}

/// A broker user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// User name.
    pub name: String,
    /// User tags (`administrator`, `monitoring`, ...).
    #[serde(default)]
    pub tags: UserTags,
    /// Stored password hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Hashing algorithm used for `password_hash`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashing_algorithm: Option<String>,
    /// Remaining fields reported by the broker.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The authenticated user, from `/api/whoami`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmI {
    /// User name.
    pub name: String,
    /// User tags.
    #[serde(default)]
    pub tags: UserTags,
    /// Remaining fields reported by the broker.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Permissions
// ─────────────────────────────────────────────────────────────────────────────

/// Configure/write/read regexes granted to a user in a vhost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSpec {
    /// Resources the user may declare or delete.
    pub configure: String,
    /// Resources the user may publish to.
    pub write: String,
    /// Resources the user may consume from.
    pub read: String,
}

impl Default for PermissionSpec {
    fn default() -> Self {
        Self {
            configure: ".*".to_string(),
            write: ".*".to_string(),
            read: ".*".to_string(),
        }
    }
}

/// A permission entry as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// User the permission applies to.
    pub user: String,
    /// Vhost the permission applies to.
    pub vhost: String,
    /// Configure regex.
    pub configure: String,
    /// Write regex.
    pub write: String,
    /// Read regex.
    pub read: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Exchanges
// ─────────────────────────────────────────────────────────────────────────────

/// Body of an exchange declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeSpec {
    /// Exchange type: `direct`, `fanout`, `topic`, `headers`, or a plugin type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Survive broker restarts.
    pub durable: bool,
    /// Delete when the last binding is removed.
    pub auto_delete: bool,
    /// Only reachable from other exchanges.
    pub internal: bool,
    /// Optional exchange arguments.
    #[serde(default)]
    pub arguments: JsonMap,
}

impl ExchangeSpec {
    /// A durable exchange of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            durable: true,
            auto_delete: false,
            internal: false,
            arguments: JsonMap::new(),
        }
    }

    /// Set durability.
    pub fn durable(mut self, durable: bool) -> Self {
        self.durable = durable;
        self
    }

    /// Set auto-delete.
    pub fn auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = auto_delete;
        self
    }

    /// Set the internal flag.
    pub fn internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    /// Add an exchange argument.
    pub fn argument(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }
}

impl Default for ExchangeSpec {
    fn default() -> Self {
        Self::new("direct")
    }
}

/// An exchange as reported by the broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeInfo {
    /// Exchange name (empty for the default exchange).
    pub name: String,
    /// Owning vhost.
    pub vhost: String,
    /// Exchange type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Durability.
    #[serde(default)]
    pub durable: bool,
    /// Auto-delete.
    #[serde(default)]
    pub auto_delete: bool,
    /// Internal flag.
    #[serde(default)]
    pub internal: bool,
    /// Exchange arguments.
    #[serde(default)]
    pub arguments: JsonMap,
    /// Remaining fields reported by the broker.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Queues
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a queue declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueSpec {
    /// Survive broker restarts.
    pub durable: bool,
    /// Delete when the last consumer unsubscribes.
    pub auto_delete: bool,
    /// Queue arguments (`x-queue-type`, `x-message-ttl`, ...).
    #[serde(default)]
    pub arguments: JsonMap,
}

impl QueueSpec {
    /// A durable classic queue.
    pub fn durable() -> Self {
        Self {
            durable: true,
            auto_delete: false,
            arguments: JsonMap::new(),
        }
    }

    /// A durable quorum queue.
    pub fn quorum() -> Self {
        Self::durable().argument("x-queue-type", serde_json::json!("quorum"))
    }

    /// Set auto-delete.
    pub fn auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = auto_delete;
        self
    }

    /// Add a queue argument.
    pub fn argument(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }
}

impl Default for QueueSpec {
    fn default() -> Self {
        Self::durable()
    }
}

/// A queue as reported by the broker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueInfo {
    /// Queue name.
    pub name: String,
    /// Owning vhost.
    pub vhost: String,
    /// Durability.
    #[serde(default)]
    pub durable: bool,
    /// Auto-delete.
    #[serde(default)]
    pub auto_delete: bool,
    /// Queue arguments.
    #[serde(default)]
    pub arguments: JsonMap,
    /// Ready plus unacknowledged messages; absent until stats are collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<u64>,
    /// Remaining fields reported by the broker.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Bindings
// ─────────────────────────────────────────────────────────────────────────────

/// Body of a binding creation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingSpec {
    /// Routing key.
    #[serde(default)]
    pub routing_key: String,
    /// Binding arguments.
    #[serde(default)]
    pub arguments: JsonMap,
}

impl BindingSpec {
    /// Binding with a routing key and no arguments.
    pub fn routing_key(key: impl Into<String>) -> Self {
        Self {
            routing_key: key.into(),
            arguments: JsonMap::new(),
        }
    }
}

/// A binding as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingInfo {
    /// Source exchange (empty for the default exchange).
    pub source: String,
    /// Owning vhost.
    pub vhost: String,
    /// Destination queue or exchange.
    pub destination: String,
    /// `queue` or `exchange`.
    pub destination_type: String,
    /// Routing key.
    #[serde(default)]
    pub routing_key: String,
    /// Binding arguments.
    #[serde(default)]
    pub arguments: JsonMap,
    /// Key identifying the binding in `DELETE` paths.
    #[serde(default)]
    pub properties_key: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Policies
// ─────────────────────────────────────────────────────────────────────────────

/// What a policy applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyTarget {
    /// Queues and exchanges.
    #[default]
    All,
    /// All queues.
    Queues,
    /// Exchanges only.
    Exchanges,
    /// Classic queues only.
    ClassicQueues,
    /// Quorum queues only.
    QuorumQueues,
    /// Streams only.
    Streams,
}

/// Body of a policy declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySpec {
    /// Regex matched against queue/exchange names.
    pub pattern: String,
    /// Policy keys, e.g. `{"ha-mode": "all"}`.
    pub definition: JsonMap,
    /// Higher priority wins when several policies match.
    #[serde(default)]
    pub priority: i32,
    /// Resource kinds the policy applies to.
    #[serde(rename = "apply-to", default)]
    pub apply_to: PolicyTarget,
}

impl PolicySpec {
    /// A policy applying `definition` to every name matching `pattern`.
    pub fn new(pattern: impl Into<String>, definition: JsonMap) -> Self {
        Self {
            pattern: pattern.into(),
            definition,
            priority: 0,
            apply_to: PolicyTarget::All,
        }
    }

    /// Set the priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set what the policy applies to.
    pub fn apply_to(mut self, target: PolicyTarget) -> Self {
        self.apply_to = target;
        self
    }
}

/// A policy as reported by the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Owning vhost.
    pub vhost: String,
    /// Policy name.
    pub name: String,
    /// Name pattern.
    pub pattern: String,
    /// Resource kinds, kept as a string since brokers add new targets.
    #[serde(rename = "apply-to")]
    pub apply_to: String,
    /// Policy keys.
    pub definition: JsonMap,
    /// Priority.
    #[serde(default)]
    pub priority: i32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

/// Result of `/api/aliveness-test/{vhost}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlivenessStatus {
    /// `ok` when the broker could publish and consume a test message.
    pub status: String,
    /// Failure reason, when the check failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AlivenessStatus {
    /// Whether the check passed.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_from_parts() {
        assert_eq!(
            UserCredential::from_parts(Some("pw"), None).unwrap(),
            UserCredential::Plain("pw".to_string())
        );
        assert_eq!(
            UserCredential::from_parts(None, Some("hash")).unwrap(),
            UserCredential::Hashed("hash".to_string())
        );
        assert!(matches!(
            UserCredential::from_parts(Some(""), Some("hash")),
            Err(crate::Error::InvalidArgument(_))
        ));
        assert!(matches!(
            UserCredential::from_parts(None, None),
            Err(crate::Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_create_user_body() {
        let plain = UserCredential::Plain("secret".to_string());
        let body = serde_json::to_value(CreateUserRequest::new(&plain, "administrator")).unwrap();
        assert_eq!(body, json!({"password": "secret", "tags": "administrator"}));

        let hashed = UserCredential::Hashed("5f4dcc3b".to_string());
        let body = serde_json::to_value(CreateUserRequest::new(&hashed, "")).unwrap();
        assert_eq!(body, json!({"password_hash": "5f4dcc3b", "tags": ""}));
    }

    #[test]
    fn test_create_vhost_body() {
        let body = serde_json::to_value(CreateVhostRequest::default()).unwrap();
        assert_eq!(body, json!({}));

        let body = serde_json::to_value(CreateVhostRequest {
            tracing: Some(false),
        })
        .unwrap();
        assert_eq!(body, json!({"tracing": false}));
    }

    #[test]
    fn test_user_tags_from_string_or_list() {
        let joined: UserTags = serde_json::from_value(json!("administrator, monitoring")).unwrap();
        assert_eq!(joined.0, vec!["administrator", "monitoring"]);

        let listed: UserTags = serde_json::from_value(json!(["management"])).unwrap();
        assert!(listed.contains("management"));

        let empty: UserTags = serde_json::from_value(json!("")).unwrap();
        assert!(empty.0.is_empty());
    }

    #[test]
    fn test_user_info_keeps_extra_fields() {
        let user: UserInfo = serde_json::from_value(json!({
            "name": "guest",
            "tags": "administrator",
            "password_hash": "abc",
            "hashing_algorithm": "rabbit_password_hashing_sha256",
            "limits": {}
        }))
        .unwrap();
        assert_eq!(user.name, "guest");
        assert!(user.tags.contains("administrator"));
        assert!(user.extra.contains_key("limits"));
    }

    #[test]
    fn test_permission_spec_default() {
        let body = serde_json::to_value(PermissionSpec::default()).unwrap();
        assert_eq!(body, json!({"configure": ".*", "write": ".*", "read": ".*"}));
    }

    #[test]
    fn test_exchange_spec_body() {
        let spec = ExchangeSpec::new("topic")
            .durable(false)
            .argument("alternate-exchange", json!("unrouted"));
        let body = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            body,
            json!({
                "type": "topic",
                "durable": false,
                "auto_delete": false,
                "internal": false,
                "arguments": {"alternate-exchange": "unrouted"}
            })
        );
    }

    #[test]
    fn test_quorum_queue_spec() {
        let body = serde_json::to_value(QueueSpec::quorum()).unwrap();
        assert_eq!(body["arguments"]["x-queue-type"], "quorum");
        assert_eq!(body["durable"], true);
    }

    #[test]
    fn test_policy_spec_body() {
        let mut definition = JsonMap::new();
        definition.insert("ha-mode".to_string(), json!("all"));
        let spec = PolicySpec::new("^ha\\.", definition)
            .priority(1)
            .apply_to(PolicyTarget::ClassicQueues);
        let body = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            body,
            json!({
                "pattern": "^ha\\.",
                "definition": {"ha-mode": "all"},
                "priority": 1,
                "apply-to": "classic_queues"
            })
        );
    }

    #[test]
    fn test_aliveness_status() {
        let ok: AlivenessStatus = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert!(ok.is_ok());

        let failed: AlivenessStatus =
            serde_json::from_value(json!({"status": "failed", "reason": "nodedown"})).unwrap();
        assert!(!failed.is_ok());
        assert_eq!(failed.reason.as_deref(), Some("nodedown"));
    }
}
