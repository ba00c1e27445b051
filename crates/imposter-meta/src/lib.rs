//! Settings schema and loading for gh-imposter.
//!
//! This crate describes the declarative settings file (a list of
//! branch-protection rules keyed by pattern) and knows how to find,
//! read and decode it.

pub mod error;
pub mod loader;
pub mod path;
pub mod schema;

pub use error::{Error, Result};
pub use loader::{
    MAX_SETTINGS_SIZE, SettingsFormat, load_settings, load_settings_with_home, parse_settings,
};
pub use path::{
    DEFAULT_SETTINGS_PATH, expand_home, resolve_settings_path, resolve_settings_path_with,
};
pub use schema::{BranchProtectionRule, RequiredStatusCheck, Settings};
