//! reqwest client reuse across calls
//!
//! Connection parameters arrive on every call, so clients are cached by the
//! parts of the configuration that actually shape the underlying client.

use crate::connection::PanelConnection;
use crate::error::{ClientError, ClientResult};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Static identifying user agent sent on every request.
pub const USER_AGENT: &str = concat!("panelbridge/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    connect_timeout_ms: u64,
    verify_certs: bool,
}

impl ClientKey {
    fn from_connection(conn: &PanelConnection) -> Self {
        Self {
            connect_timeout_ms: conn.timeout_config().connect_ms,
            verify_certs: conn.verify_certs,
        }
    }

    fn build_client(&self) -> ClientResult<Client> {
        Client::builder()
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .danger_accept_invalid_certs(!self.verify_certs)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::InvalidConfig { message: format!("failed to build HTTP client: {}", e) })
    }
}

/// Cache of configured reqwest clients, keyed by effective configuration.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClientCache {
    cache: Arc<RwLock<HashMap<ClientKey, Arc<Client>>>>,
}

impl ClientCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get_client(&self, conn: &PanelConnection) -> ClientResult<Arc<Client>> {
        let key = ClientKey::from_connection(conn);

        {
            let cache = self.cache.read().unwrap();
            if let Some(client) = cache.get(&key) {
                return Ok(client.clone());
            }
        }

        let mut cache = self.cache.write().unwrap();
        // Another caller may have built it while we waited for the lock.
        if let Some(client) = cache.get(&key) {
            return Ok(client.clone());
        }

        let client = Arc::new(key.build_client()?);
        cache.insert(key, client.clone());
        Ok(client)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.cache.read().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::TimeoutConfig;

    #[test]
    fn identical_configs_share_a_client() {
        let cache = ClientCache::new();
        let a = PanelConnection::new("a.example.com", 8090, "admin", "x");
        let b = PanelConnection::new("b.example.com", 8090, "admin", "y");

        // Host and credentials are per-request, not part of the client key.
        let client_a = cache.get_client(&a).unwrap();
        let client_b = cache.get_client(&b).unwrap();
        assert!(Arc::ptr_eq(&client_a, &client_b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn differing_tls_or_timeouts_build_new_clients() {
        let cache = ClientCache::new();
        let base = PanelConnection::new("panel.example.com", 8090, "admin", "x");

        let mut slow = base.clone();
        slow.timeout = Some(TimeoutConfig { connect_ms: 2_000, total_ms: 30_000 });

        let strict = base.clone().with_verify_certs(true);

        let c1 = cache.get_client(&base).unwrap();
        let c2 = cache.get_client(&slow).unwrap();
        let c3 = cache.get_client(&strict).unwrap();
        assert!(!Arc::ptr_eq(&c1, &c2));
        assert!(!Arc::ptr_eq(&c1, &c3));
        assert_eq!(cache.len(), 3);
    }
}
