//! Named broker contexts for the management client.
//!
//! ```yaml
//! api-version: v1
//! kind: Contexts
//!
//! current-context: local
//!
//! contexts:
//!   - name: local
//!     server: http://localhost:15672
//!     credentials:
//!       username: guest
//!       password: guest
//!   - name: staging
//!     server: https://rabbit.staging.lan:15671
//!     credentials:
//!       username: ops
//!       password-env: STAGING_RABBIT_PASSWORD
//!     timeout: 10
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Contexts File
// ─────────────────────────────────────────────────────────────────────────────

/// API version for the contexts file format.
pub const API_VERSION: &str = "v1";

/// Kind identifier for contexts files.
pub const KIND: &str = "Contexts";

/// Default contexts filename.
const CONTEXTS_FILE: &str = "contexts.yaml";

/// Application name for XDG directory resolution.
const APP_NAME: &str = "rabbitadmin";

/// Environment variable overriding the config directory.
const CONFIG_DIR_ENV: &str = "RABBITADMIN_CONFIG_DIR";

/// Root structure of a contexts file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContextsFile {
    /// API version (always "v1" currently).
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// File kind (always "Contexts").
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Name of the current/default context.
    #[serde(default)]
    pub current_context: Option<String>,

    /// Named broker contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,

    /// Default settings applied to all contexts.
    #[serde(default)]
    pub defaults: ContextDefaults,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

impl ContextsFile {
    /// Create an empty contexts file.
    pub fn new() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            ..Default::default()
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        serde_yaml::from_str(yaml_str).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Serialize to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseYaml(e.to_string()))
    }

    /// Get the current context, if set and valid.
    pub fn current(&self) -> Option<&Context> {
        self.current_context
            .as_ref()
            .and_then(|name| self.get_context(name))
    }

    /// Get a context by name.
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Get a context by name, or an error naming the missing context.
    pub fn require_context(&self, name: &str) -> Result<&Context> {
        self.get_context(name)
            .ok_or_else(|| ConfigError::ContextNotFound(name.to_string()))
    }

    /// Add or replace a context.
    pub fn set_context(&mut self, context: Context) {
        if let Some(existing) = self.contexts.iter_mut().find(|c| c.name == context.name) {
            *existing = context;
        } else {
            self.contexts.push(context);
        }
    }

    /// Remove a context by name.
    pub fn remove_context(&mut self, name: &str) -> Option<Context> {
        let pos = self.contexts.iter().position(|c| c.name == name)?;
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        Some(self.contexts.remove(pos))
    }

    /// Set the current context by name.
    ///
    /// Returns an error if the context doesn't exist.
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        self.require_context(name)?;
        self.current_context = Some(name.to_string());
        Ok(())
    }

    /// List all context names.
    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.iter().map(|c| c.name.as_str()).collect()
    }

    /// Request timeout in seconds for a context, falling back to the defaults.
    pub fn timeout_for(&self, context: &Context) -> Option<u64> {
        context.timeout.or(self.defaults.timeout)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// A named broker context (management URL + credentials).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Context {
    /// Unique name for this context.
    pub name: String,

    /// Management API base URL (e.g., "http://localhost:15672").
    pub server: String,

    /// Basic-auth credentials.
    pub credentials: Credentials,

    /// Request timeout override (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Context {
    /// Create a new context.
    pub fn new(name: impl Into<String>, server: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            credentials,
            timeout: None,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Credentials
// ─────────────────────────────────────────────────────────────────────────────

/// Username plus one of several password sources.
///
/// Sources are consulted in order: inline `password`, `password-file`,
/// then `password-env`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Credentials {
    /// Management user name.
    pub username: String,

    /// Inline password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Path to a file containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_file: Option<PathBuf>,

    /// Environment variable containing the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,
}

impl Credentials {
    /// Credentials with an inline password.
    pub fn plain(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
            password_file: None,
            password_env: None,
        }
    }

    /// Credentials reading the password from an environment variable.
    pub fn from_env(username: impl Into<String>, var: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
            password_file: None,
            password_env: Some(var.into()),
        }
    }

    /// Credentials reading the password from a file.
    pub fn from_file(username: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            username: username.into(),
            password: None,
            password_file: Some(path.into()),
            password_env: None,
        }
    }

    /// Resolve the actual password value.
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }

        if let Some(path) = &self.password_file {
            let expanded = expand_path(path);
            if expanded.exists() {
                let password = std::fs::read_to_string(&expanded)
                    .map_err(|e| ConfigError::ReadFile {
                        path: expanded.display().to_string(),
                        source: e,
                    })?
                    .trim()
                    .to_string();
                return Ok(password);
            }
        }

        if let Some(var) = &self.password_env
            && let Ok(password) = std::env::var(var)
        {
            return Ok(password);
        }

        Err(ConfigError::PasswordUnresolved {
            username: self.username.clone(),
            reason: "no password, readable password-file, or set password-env".to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Default settings applied to all contexts.
///
/// With no `timeout` here or on the context, requests only have the HTTP
/// transport's own limits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContextDefaults {
    /// Default request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading / Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Get the rabbitadmin config directory.
///
/// `RABBITADMIN_CONFIG_DIR` wins over the platform config directory.
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the path to the contexts file.
pub fn contexts_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(CONTEXTS_FILE))
}

/// Load the contexts file.
///
/// Returns an empty file if none exists.
pub fn load_contexts() -> Result<ContextsFile> {
    load_contexts_from(contexts_path().as_deref())
}

/// Load contexts from a specific path.
pub fn load_contexts_from(path: Option<&Path>) -> Result<ContextsFile> {
    let Some(path) = path else {
        return Ok(ContextsFile::new());
    };

    if !path.exists() {
        return Ok(ContextsFile::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    ContextsFile::from_yaml(&contents)
}

/// Save contexts to a specific path.
pub fn save_contexts_to(file: &ContextsFile, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = file.to_yaml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Expand ~ to home directory in paths.
fn expand_path(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/"))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let file = ContextsFile::new();
        assert_eq!(file.api_version, API_VERSION);
        assert_eq!(file.kind, KIND);
        assert!(file.current_context.is_none());
        assert!(file.contexts.is_empty());
        assert_eq!(file.defaults.timeout, None);
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
api-version: v1
kind: Contexts
current-context: staging

contexts:
  - name: local
    server: http://localhost:15672
    credentials:
      username: guest
      password: guest

  - name: staging
    server: https://rabbit.staging.lan:15671
    credentials:
      username: ops
      password-env: STAGING_RABBIT_PASSWORD
    timeout: 10

defaults:
  timeout: 45
"#;
        let file = ContextsFile::from_yaml(yaml).unwrap();

        assert_eq!(file.current_context.as_deref(), Some("staging"));
        assert_eq!(file.contexts.len(), 2);

        let local = file.get_context("local").unwrap();
        assert_eq!(local.server, "http://localhost:15672");
        assert_eq!(local.credentials.username, "guest");
        assert_eq!(local.credentials.password.as_deref(), Some("guest"));
        assert_eq!(file.timeout_for(local), Some(45));

        let staging = file.current().unwrap();
        assert_eq!(staging.name, "staging");
        assert_eq!(
            staging.credentials.password_env.as_deref(),
            Some("STAGING_RABBIT_PASSWORD")
        );
        assert_eq!(file.timeout_for(staging), Some(10));
    }

    #[test]
    fn test_timeout_unset_without_defaults() {
        let yaml = r#"
contexts:
  - name: local
    server: http://localhost:15672
    credentials:
      username: guest
      password: guest
"#;
        let file = ContextsFile::from_yaml(yaml).unwrap();
        let local = file.get_context("local").unwrap();
        assert_eq!(file.timeout_for(local), None);
        assert!(!file.to_yaml().unwrap().contains("timeout"));
    }

    #[test]
    fn test_set_and_remove_context() {
        let mut file = ContextsFile::new();
        file.set_context(Context::new(
            "local",
            "http://localhost:15672",
            Credentials::plain("guest", "guest"),
        ));
        file.set_context(Context::new(
            "local",
            "http://localhost:25672",
            Credentials::plain("guest", "guest"),
        ));
        assert_eq!(file.contexts.len(), 1);
        assert_eq!(file.contexts[0].server, "http://localhost:25672");

        file.use_context("local").unwrap();
        let removed = file.remove_context("local").unwrap();
        assert_eq!(removed.name, "local");
        assert!(file.current_context.is_none());
        assert!(file.remove_context("local").is_none());
    }

    #[test]
    fn test_use_missing_context() {
        let mut file = ContextsFile::new();
        let err = file.use_context("nope").unwrap_err();
        assert!(matches!(err, ConfigError::ContextNotFound(name) if name == "nope"));
    }

    #[test]
    fn test_context_names() {
        let mut file = ContextsFile::new();
        file.set_context(Context::new("a", "http://a", Credentials::plain("u", "p")));
        file.set_context(Context::new("b", "http://b", Credentials::plain("u", "p")));
        assert_eq!(file.context_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_inline_password_wins() {
        let mut creds = Credentials::plain("guest", "inline");
        creds.password_env = Some("RABBITADMIN_TEST_UNUSED".to_string());
        assert_eq!(creds.resolve_password().unwrap(), "inline");
    }

    #[test]
    fn test_password_from_env() {
        // SAFETY: Test is single-threaded, env var is test-specific
        unsafe {
            std::env::set_var("RABBITADMIN_TEST_PASSWORD", "s3cret");
        }
        let creds = Credentials::from_env("ops", "RABBITADMIN_TEST_PASSWORD");
        assert_eq!(creds.resolve_password().unwrap(), "s3cret");
        // SAFETY: Cleanup test env var
        unsafe {
            std::env::remove_var("RABBITADMIN_TEST_PASSWORD");
        }
    }

    #[test]
    fn test_password_from_file_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("password");
        std::fs::write(&path, "from-file\n").unwrap();

        let creds = Credentials::from_file("ops", &path);
        assert_eq!(creds.resolve_password().unwrap(), "from-file");
    }

    #[test]
    fn test_unresolved_password() {
        let creds = Credentials::from_env("ops", "RABBITADMIN_TEST_NEVER_SET");
        let err = creds.resolve_password().unwrap_err();
        assert!(matches!(err, ConfigError::PasswordUnresolved { username, .. } if username == "ops"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_contexts_from(Some(&dir.path().join("absent.yaml"))).unwrap();
        assert!(file.contexts.is_empty());

        let file = load_contexts_from(None).unwrap();
        assert!(file.contexts.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONTEXTS_FILE);

        let mut file = ContextsFile::new();
        file.set_context(
            Context::new(
                "local",
                "http://localhost:15672",
                Credentials::plain("guest", "guest"),
            )
            .with_timeout(5),
        );
        file.use_context("local").unwrap();
        save_contexts_to(&file, &path).unwrap();

        let loaded = load_contexts_from(Some(&path)).unwrap();
        assert_eq!(loaded.current_context.as_deref(), Some("local"));
        let local = loaded.current().unwrap();
        assert_eq!(local.timeout, Some(5));
        assert_eq!(local.credentials.password.as_deref(), Some("guest"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = ContextsFile::from_yaml("contexts: [ {name: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseYaml(_)));
    }

    #[test]
    fn test_expand_path() {
        let path = PathBuf::from("~/secrets/rabbit");
        let expanded = expand_path(&path);
        if dirs::home_dir().is_some() {
            assert!(!expanded.to_str().unwrap().starts_with("~/"));
        }

        let path2 = PathBuf::from("/absolute/path");
        assert_eq!(expand_path(&path2), path2);
    }
}
