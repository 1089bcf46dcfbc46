//! Simulated network latency.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delays applied by the mock services, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub vrm_lookup_ms: u64,
    pub parts_lookup_ms: u64,
    pub login_ms: u64,
    pub checkout_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            vrm_lookup_ms: 800,
            parts_lookup_ms: 500,
            login_ms: 800,
            checkout_ms: 2000,
        }
    }
}

impl LatencyConfig {
    /// No delays. Used by tests and scripted runs.
    pub fn zero() -> Self {
        Self {
            vrm_lookup_ms: 0,
            parts_lookup_ms: 0,
            login_ms: 0,
            checkout_ms: 0,
        }
    }

    pub fn vrm_lookup(&self) -> Duration {
        Duration::from_millis(self.vrm_lookup_ms)
    }

    pub fn parts_lookup(&self) -> Duration {
        Duration::from_millis(self.parts_lookup_ms)
    }

    pub fn login(&self) -> Duration {
        Duration::from_millis(self.login_ms)
    }

    pub fn checkout(&self) -> Duration {
        Duration::from_millis(self.checkout_ms)
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let latency = LatencyConfig::default();
        assert_eq!(latency.vrm_lookup(), Duration::from_millis(800));
        assert_eq!(latency.checkout(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let latency: LatencyConfig = serde_json::from_str(r#"{"login_ms": 0}"#).unwrap();
        assert_eq!(latency.login_ms, 0);
        assert_eq!(latency.parts_lookup_ms, 500);
    }
}
