//! Application Configuration
//!
//! Configuration for the signup application layer. Nothing here reads the
//! environment; the binary builds these values and passes them in.

use std::path::PathBuf;
use std::time::Duration;

pub use platform::mail::DEFAULT_RELAY_ENDPOINT;

/// E-mail relay credentials
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Account public key, sent as `user_id`
    pub public_key: String,
    pub service_id: String,
    pub template_id: String,
}

impl RelayConfig {
    pub fn new(
        public_key: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
        }
    }

    /// All three credentials are present
    pub fn is_complete(&self) -> bool {
        [&self.public_key, &self.service_id, &self.template_id]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

/// Signup application configuration
#[derive(Debug, Clone)]
pub struct SignupConfig {
    /// Relay credentials
    pub relay: RelayConfig,
    /// Relay send URL
    pub relay_endpoint: String,
    /// Whole-request timeout for relay calls; `None` waits indefinitely
    pub relay_timeout: Option<Duration>,
    /// Sender identity shown in the e-mail (`from_name`)
    pub sender_name: String,
    /// Directory saved certificates are written to
    pub certificates_dir: PathBuf,
    /// Form sessions untouched for this long are discarded
    pub session_idle_ttl: Duration,
    /// How often idle sessions are swept
    pub session_sweep_interval: Duration,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            relay_timeout: Some(Duration::from_secs(30)),
            sender_name: "PlantTech".to_string(),
            certificates_dir: PathBuf::from("certificates"),
            session_idle_ttl: Duration::from_secs(3600),
            session_sweep_interval: Duration::from_secs(300),
        }
    }
}

impl SignupConfig {
    /// Create config for development (short idle TTL, local certificate dir)
    pub fn development() -> Self {
        Self {
            certificates_dir: PathBuf::from("target/certificates"),
            session_idle_ttl: Duration::from_secs(600),
            session_sweep_interval: Duration::from_secs(60),
            ..Default::default()
        }
    }

    /// Idle TTL in milliseconds, saturating at `i64::MAX`
    pub fn session_idle_ttl_ms(&self) -> i64 {
        i64::try_from(self.session_idle_ttl.as_millis()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_config_completeness() {
        assert!(!RelayConfig::default().is_complete());
        assert!(!RelayConfig::new("pk", " ", "tpl").is_complete());
        assert!(RelayConfig::new("pk", "svc", "tpl").is_complete());
    }

    #[test]
    fn test_defaults() {
        let config = SignupConfig::default();
        assert_eq!(config.relay_endpoint, DEFAULT_RELAY_ENDPOINT);
        assert_eq!(config.sender_name, "PlantTech");
        assert_eq!(config.session_idle_ttl_ms(), 3_600_000);
    }

    #[test]
    fn test_huge_idle_ttl_saturates() {
        let config = SignupConfig {
            session_idle_ttl: Duration::MAX,
            ..Default::default()
        };
        assert_eq!(config.session_idle_ttl_ms(), i64::MAX);
    }
}
