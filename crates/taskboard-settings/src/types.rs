//! Settings type definitions.
//!
//! Every struct is `#[serde(default)]` so a settings file may specify only
//! the keys it wants to change. Field names are camelCase on disk.

use serde::{Deserialize, Serialize};

/// Deployment posture.
///
/// In [`Environment::Production`] internal error detail is kept out of HTTP
/// responses and only written to the log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local or test deployment. Raw store errors reach the client.
    #[default]
    Development,
    /// Production deployment. Store errors are redacted.
    Production,
}

impl Environment {
    /// Parse a posture name. Accepts `production`/`prod` and
    /// `development`/`dev`/`test`, case-insensitively.
    pub fn parse(val: &str) -> Option<Self> {
        match val.to_lowercase().as_str() {
            "production" | "prod" => Some(Self::Production),
            "development" | "dev" | "test" => Some(Self::Development),
            _ => None,
        }
    }

    /// Whether this is the production posture.
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Root settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Deployment posture.
    pub environment: Environment,
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Relational store settings.
    pub database: DatabaseSettings,
    /// Schema initialization policy.
    pub schema: SchemaSettings,
    /// Log output settings.
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Listening port.
    pub port: u16,
    /// Upper bound on a single request, including pool wait.
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 30,
        }
    }
}

/// Relational store settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// `sqlite://<path>`, a bare path, or `:memory:`.
    pub url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long a request may wait for a free connection.
    pub acquire_timeout_ms: u64,
    /// How long a statement may wait on a locked database file.
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "taskboard.db".to_string(),
            pool_size: 10,
            acquire_timeout_ms: 5_000,
            busy_timeout_ms: 5_000,
        }
    }
}

/// Schema initialization policy.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaSettings {
    /// Abort startup when the schema cannot be ensured. When `false`, the
    /// failure is logged and the server starts anyway.
    pub fail_fast: bool,
}

/// Log output settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive. `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parse() {
        assert_eq!(Environment::parse("production"), Some(Environment::Production));
        assert_eq!(Environment::parse("PROD"), Some(Environment::Production));
        assert_eq!(Environment::parse("dev"), Some(Environment::Development));
        assert_eq!(Environment::parse("test"), Some(Environment::Development));
        assert_eq!(Environment::parse("staging"), None);
    }

    #[test]
    fn environment_serde_lowercase() {
        let json = serde_json::to_string(&Environment::Production).unwrap();
        assert_eq!(json, "\"production\"");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"server":{"port":8080}}"#).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.url, "taskboard.db");
    }

    #[test]
    fn camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert!(json["database"].get("poolSize").is_some());
        assert!(json["database"].get("acquireTimeoutMs").is_some());
        assert!(json["schema"].get("failFast").is_some());
        assert!(json["server"].get("requestTimeoutSecs").is_some());
    }
}
