use serde::{Deserialize, Serialize};

/// Timeout configuration for a single API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Time allowed to establish the TCP/TLS connection.
    pub connect_ms: u64,
    /// Total time allowed for the whole request/response cycle.
    pub total_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { connect_ms: 10_000, total_ms: 30_000 }
    }
}

/// Retry policy for transport-level failures.
///
/// Fixed delay, no exponential backoff, no jitter. Non-transport failures
/// (unexpected status, unparsable body) are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Delay between attempts.
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 1, delay_ms: 1_000 }
    }
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `attempt` failed ones.
    /// `attempt` is 1-based: 1 means the initial attempt just failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt <= self.max_retries
    }

    /// Total number of attempts this policy permits.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Connection parameters for one CyberPanel server.
///
/// Supplied by the caller on every call and never persisted; the billing
/// platform owns the server records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConnection {
    pub host: String,
    pub port: u16,
    /// Selects the URL scheme: `https` when true, `http` otherwise.
    pub use_tls: bool,
    pub admin_user: String,
    pub admin_pass: String,

    /// Verify the server certificate on TLS connections.
    ///
    /// Defaults to `false`: the target is typically a self-signed
    /// control-panel certificate on a private management network. This is a
    /// deliberate trust trade-off; enabling it restores full transport
    /// authenticity checks.
    #[serde(default)]
    pub verify_certs: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryPolicy>,
}

impl PanelConnection {
    pub fn new(host: impl Into<String>, port: u16, admin_user: impl Into<String>, admin_pass: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            use_tls: false,
            admin_user: admin_user.into(),
            admin_pass: admin_pass.into(),
            verify_certs: false,
            timeout: None,
            retry: None,
        }
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    pub fn with_verify_certs(mut self, verify: bool) -> Self {
        self.verify_certs = verify;
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_tls {
            "https"
        } else {
            "http"
        }
    }

    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default()
    }
}
