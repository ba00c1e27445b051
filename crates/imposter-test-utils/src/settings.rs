//! Settings file fixtures.

use std::fs;
use std::path::{Path, PathBuf};

/// A settings document with one rule per pattern and nothing else set.
pub fn rules_yaml(patterns: &[&str]) -> String {
    let mut yaml = String::from("branchProtectionRules:\n");
    for pattern in patterns {
        yaml.push_str(&format!("  - pattern: \"{}\"\n", pattern));
    }
    yaml
}

/// Write `content` to `dir/config.yaml` and return the path.
///
/// # Panics
/// Panics if the file cannot be written.
pub fn write_settings(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, content)
        .unwrap_or_else(|e| panic!("write_settings: failed to write {}: {e}", path.display()));
    path
}
