//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`Settings::default()`]
//! 2. If a settings file was given and exists, deep-merge it over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)
//!
//! Loading runs before logging is configured, so non-fatal problems are
//! returned as [`SettingsWarning`]s for the caller to log once a subscriber
//! is installed.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::errors::Result;
use crate::types::{Environment, Settings};

/// A non-fatal problem found while loading settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsWarning {
    /// The settings file was given but does not exist; defaults were used.
    MissingFile(PathBuf),
    /// An environment variable failed to parse or was out of range.
    InvalidEnv {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

impl SettingsWarning {
    /// Emit this warning through `tracing`.
    pub fn log(&self) {
        match self {
            Self::MissingFile(path) => {
                warn!(path = %path.display(), "settings file not found, using defaults");
            }
            Self::InvalidEnv { key, value } => {
                warn!(key, value = %value, "invalid env var, ignoring");
            }
        }
    }
}

/// Load settings from an optional JSON file, then apply env overrides.
///
/// A missing file is not an error: defaults are used and a warning is
/// returned. A file that exists but is not valid JSON is an error.
pub fn load_settings(path: Option<&Path>) -> Result<(Settings, Vec<SettingsWarning>)> {
    let defaults = serde_json::to_value(Settings::default())?;
    let mut warnings = Vec::new();

    let merged = match path {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(path)?;
            let user: Value = serde_json::from_str(&content)?;
            deep_merge(defaults, user)
        }
        Some(path) => {
            warnings.push(SettingsWarning::MissingFile(path.to_path_buf()));
            defaults
        }
        None => defaults,
    };

    let mut settings: Settings = serde_json::from_value(merged)?;
    warnings.extend(apply_env_overrides(&mut settings));
    Ok((settings, warnings))
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(settings: &mut Settings) -> Vec<SettingsWarning> {
    apply_overrides_from(settings, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup.
///
/// Empty values are treated as unset. Values that fail to parse or fall
/// outside their range are ignored and reported.
pub fn apply_overrides_from<F>(settings: &mut Settings, lookup: F) -> Vec<SettingsWarning>
where
    F: Fn(&str) -> Option<String>,
{
    let mut warnings = Vec::new();
    let w = &mut warnings;
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    // ── Posture ─────────────────────────────────────────────────────
    if let Some(v) = read("TASKBOARD_ENV") {
        let parsed = Environment::parse(&v);
        if let Some(env) = checked(w, "TASKBOARD_ENV", v, parsed) {
            settings.environment = env;
        }
    }

    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = read("PORT") {
        let parsed = parse_u16_range(&v, 1, 65535);
        if let Some(port) = checked(w, "PORT", v, parsed) {
            settings.server.port = port;
        }
    }
    if let Some(v) = read("TASKBOARD_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read("TASKBOARD_REQUEST_TIMEOUT_SECS") {
        let parsed = parse_u64_range(&v, 1, 3600);
        if let Some(secs) = checked(w, "TASKBOARD_REQUEST_TIMEOUT_SECS", v, parsed) {
            settings.server.request_timeout_secs = secs;
        }
    }

    // ── Database ────────────────────────────────────────────────────
    if let Some(v) = read("DATABASE_URL") {
        settings.database.url = v;
    }
    if let Some(v) = read("TASKBOARD_POOL_SIZE") {
        let parsed = parse_u32_range(&v, 1, 256);
        if let Some(size) = checked(w, "TASKBOARD_POOL_SIZE", v, parsed) {
            settings.database.pool_size = size;
        }
    }
    if let Some(v) = read("TASKBOARD_ACQUIRE_TIMEOUT_MS") {
        let parsed = parse_u64_range(&v, 1, 600_000);
        if let Some(ms) = checked(w, "TASKBOARD_ACQUIRE_TIMEOUT_MS", v, parsed) {
            settings.database.acquire_timeout_ms = ms;
        }
    }
    if let Some(v) = read("TASKBOARD_BUSY_TIMEOUT_MS") {
        let parsed = parse_u32_range(&v, 0, 600_000);
        if let Some(ms) = checked(w, "TASKBOARD_BUSY_TIMEOUT_MS", v, parsed) {
            settings.database.busy_timeout_ms = ms;
        }
    }

    // ── Schema ──────────────────────────────────────────────────────
    if let Some(v) = read("TASKBOARD_SCHEMA_FAIL_FAST") {
        let parsed = parse_bool(&v);
        if let Some(flag) = checked(w, "TASKBOARD_SCHEMA_FAIL_FAST", v, parsed) {
            settings.schema.fail_fast = flag;
        }
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read("TASKBOARD_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read("TASKBOARD_LOG_JSON") {
        let parsed = parse_bool(&v);
        if let Some(flag) = checked(w, "TASKBOARD_LOG_JSON", v, parsed) {
            settings.logging.json = flag;
        }
    }

    warnings
}

fn checked<T>(
    warnings: &mut Vec<SettingsWarning>,
    key: &'static str,
    raw: String,
    parsed: Option<T>,
) -> Option<T> {
    if parsed.is_none() {
        warnings.push(SettingsWarning::InvalidEnv { key, value: raw });
    }
    parsed
}

// ── Pure parsing functions ──────────────────────────────────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u32` within a range.
pub fn parse_u32_range(val: &str, min: u32, max: u32) -> Option<u32> {
    let n: u32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
