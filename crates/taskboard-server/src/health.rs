//! `/health` endpoint.

use serde::{Deserialize, Serialize};

/// Status string reported while the process is up.
pub const HEALTH_STATUS: &str = "Server is running";

/// Health check response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always [`HEALTH_STATUS`]. Store reachability is not reported.
    pub status: String,
}

/// Build a health response.
pub fn health_check() -> HealthResponse {
    HealthResponse {
        status: HEALTH_STATUS.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_running() {
        assert_eq!(health_check().status, "Server is running");
    }

    #[test]
    fn serializes_single_field() {
        let json = serde_json::to_value(health_check()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "Server is running"}));
    }
}
