//! API endpoint implementations.

mod bindings;
mod channels;
mod cluster;
mod connections;
mod consumers;
mod definitions;
mod exchanges;
mod health;
mod permissions;
mod policies;
mod queues;
mod users;
mod vhosts;

pub use bindings::BindingsApi;
pub use channels::ChannelsApi;
pub use cluster::ClusterApi;
pub use connections::ConnectionsApi;
pub use consumers::ConsumersApi;
pub use definitions::DefinitionsApi;
pub use exchanges::ExchangesApi;
pub use health::HealthApi;
pub use permissions::PermissionsApi;
pub use policies::PoliciesApi;
pub use queues::QueuesApi;
pub use users::UsersApi;
pub use vhosts::VhostsApi;

use crate::error::{Error, Result};

/// Build `/api/<seg>/<seg>...`, percent-encoding every segment.
///
/// Vhost names routinely contain `/` (the default vhost is `/`), so each
/// segment is encoded on its own and never split. `.` and `..` are
/// rejected: URL parsing drops dot-segments even when percent-encoded, so
/// they cannot reach the broker as names.
pub(crate) fn api_path(segments: &[&str]) -> Result<String> {
    segments.iter().try_fold(String::from("/api"), |mut path, segment| {
        if matches!(*segment, "." | "..") {
            return Err(Error::InvalidArgument(format!(
                "'{segment}' cannot be used as a resource name"
            )));
        }
        path.push('/');
        path.push_str(&urlencoding::encode(segment));
        Ok(path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_path_static() {
        assert_eq!(api_path(&["overview"]).unwrap(), "/api/overview");
        assert_eq!(api_path(&["cluster-name"]).unwrap(), "/api/cluster-name");
    }

    #[test]
    fn test_api_path_default_vhost() {
        assert_eq!(api_path(&["vhosts", "/"]).unwrap(), "/api/vhosts/%2F");
        assert_eq!(
            api_path(&["exchanges", "/", "myexchange"]).unwrap(),
            "/api/exchanges/%2F/myexchange"
        );
    }

    #[test]
    fn test_api_path_connection_name() {
        assert_eq!(
            api_path(&["connections", "127.0.0.1:5678 -> 127.0.0.1:5672"]).unwrap(),
            "/api/connections/127.0.0.1%3A5678%20-%3E%20127.0.0.1%3A5672"
        );
    }

    #[test]
    fn test_api_path_reserved_characters() {
        assert_eq!(api_path(&["users", "a%b?c#d"]).unwrap(), "/api/users/a%25b%3Fc%23d");
    }

    #[test]
    fn test_api_path_keeps_dots_inside_names() {
        assert_eq!(
            api_path(&["queues", "/", "orders.v2"]).unwrap(),
            "/api/queues/%2F/orders.v2"
        );
        assert_eq!(api_path(&["users", "..."]).unwrap(), "/api/users/...");
    }

    #[test]
    fn test_api_path_rejects_dot_segments() {
        for name in [".", ".."] {
            let err = api_path(&["users", name, "permissions"]).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)));
        }
        assert!(api_path(&["queues", "..", "q"]).is_err());
    }
}
