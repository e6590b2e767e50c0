//! Connection profiles for the rabbitadmin management client.
//!
//! Provides kubeconfig-style configuration with:
//! - Named broker contexts (management URL + credentials)
//! - `current-context` for default selection
//! - Passwords inline, from an environment variable, or from a file
//!
//! The default file lives at `$XDG_CONFIG_HOME/rabbitadmin/contexts.yaml`
//! and can be relocated with `RABBITADMIN_CONFIG_DIR`.

pub mod contexts;
pub mod error;

pub use contexts::{
    Context, ContextDefaults, ContextsFile, Credentials, contexts_path, load_contexts,
    load_contexts_from, save_contexts_to, xdg_config_dir,
};
pub use error::{ConfigError, Result};
