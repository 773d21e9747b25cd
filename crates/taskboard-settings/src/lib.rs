//! # taskboard-settings
//!
//! Configuration for the taskboard service, loaded from three layers (in
//! priority order):
//! 1. **Compiled defaults**: [`Settings::default()`]
//! 2. **Settings file**: optional JSON file, deep-merged over defaults
//! 3. **Environment variables**: `DATABASE_URL`, `PORT`, `TASKBOARD_*`
//!
//! Settings are loaded once in `main` and passed down by value; there is no
//! global instance.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    SettingsWarning, apply_env_overrides, apply_overrides_from, deep_merge, load_settings,
};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
