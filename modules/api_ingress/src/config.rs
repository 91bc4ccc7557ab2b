use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Listener and middleware settings for the HTTP ingress.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    /// Per-request timeout in seconds; 0 disables it.
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_timeout_sec() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            timeout_sec: default_timeout_sec(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl ApiIngressConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_sec > 0).then(|| Duration::from_secs(self.timeout_sec))
    }
}
