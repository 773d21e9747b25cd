//! Server configuration.

use std::time::Duration;

use taskboard_settings::{Environment, Settings};

/// Configuration for the taskboard server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `0` for auto-assign).
    pub port: u16,
    /// Upper bound on a single request, including time queued for a
    /// connection.
    pub request_timeout: Duration,
    /// Deployment posture. `Production` redacts 500 bodies.
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            request_timeout: Duration::from_secs(30),
            environment: Environment::Development,
        }
    }
}

impl From<&Settings> for ServerConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            host: settings.server.host.clone(),
            port: settings.server.port,
            request_timeout: Duration::from_secs(settings.server.request_timeout_secs.max(1)),
            environment: settings.environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_loopback_on_any_port() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 0);
    }

    #[test]
    fn default_is_development() {
        assert_eq!(ServerConfig::default().environment, Environment::Development);
    }

    #[test]
    fn from_default_settings() {
        let cfg = ServerConfig::from(&Settings::default());
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn from_settings_carries_environment() {
        let mut settings = Settings::default();
        settings.environment = Environment::Production;
        settings.server.port = 8080;
        let cfg = ServerConfig::from(&settings);
        assert_eq!(cfg.environment, Environment::Production);
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn zero_timeout_clamped() {
        let mut settings = Settings::default();
        settings.server.request_timeout_secs = 0;
        assert_eq!(
            ServerConfig::from(&settings).request_timeout,
            Duration::from_secs(1)
        );
    }
}
