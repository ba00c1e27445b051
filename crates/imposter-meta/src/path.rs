//! Settings path handling

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Where the settings file lives when no `--config` is given.
pub const DEFAULT_SETTINGS_PATH: &str = "~/.config/gh-imposter/config.yaml";

/// Replace the first `~` in `path` with `home`.
///
/// Only the first occurrence is replaced, wherever it appears, so
/// `./a~b` also expands. Paths without a tilde are returned unchanged.
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    match path.find('~') {
        Some(idx) => {
            let home = home.to_string_lossy();
            let mut expanded = String::with_capacity(path.len() + home.len());
            expanded.push_str(&path[..idx]);
            expanded.push_str(&home);
            expanded.push_str(&path[idx + 1..]);
            PathBuf::from(expanded)
        }
        None => PathBuf::from(path),
    }
}

/// Expand `~` using the current user's home directory.
///
/// The home directory is only looked up when the path needs it.
pub fn resolve_settings_path(path: &str) -> Result<PathBuf> {
    resolve_settings_path_with(path, dirs::home_dir)
}

/// Like [`resolve_settings_path`], asking `home_dir` for the home directory.
pub fn resolve_settings_path_with<F>(path: &str, home_dir: F) -> Result<PathBuf>
where
    F: FnOnce() -> Option<PathBuf>,
{
    if !path.contains('~') {
        return Ok(PathBuf::from(path));
    }
    let home = home_dir().ok_or(Error::HomeDirUnavailable)?;
    Ok(expand_home(path, &home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_leading_tilde() {
        let expanded = expand_home("~/.config/gh-imposter/config.yaml", Path::new("/home/dev"));
        assert_eq!(
            expanded,
            PathBuf::from("/home/dev/.config/gh-imposter/config.yaml")
        );
    }

    #[test]
    fn test_expand_only_first_tilde() {
        let expanded = expand_home("~/a~b", Path::new("/h"));
        assert_eq!(expanded, PathBuf::from("/h/a~b"));
    }

    #[test]
    fn test_no_tilde_is_untouched() {
        let expanded = expand_home("/etc/imposter.yaml", Path::new("/h"));
        assert_eq!(expanded, PathBuf::from("/etc/imposter.yaml"));
    }

    #[test]
    fn test_resolve_absolute_path_skips_home_lookup() {
        let resolved = resolve_settings_path("/tmp/settings.yaml").unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/settings.yaml"));
    }

    #[test]
    fn test_resolve_default_path_under_home() {
        let resolved =
            resolve_settings_path_with(DEFAULT_SETTINGS_PATH, || Some(PathBuf::from("/home/dev")))
                .unwrap();
        assert_eq!(
            resolved,
            PathBuf::from("/home/dev/.config/gh-imposter/config.yaml")
        );
    }

    #[test]
    fn test_resolve_without_home() {
        let err = resolve_settings_path_with("~/config.yaml", || None).unwrap_err();
        assert!(matches!(err, Error::HomeDirUnavailable));
    }

    #[test]
    fn test_resolve_skips_home_lookup_without_tilde() {
        let resolved = resolve_settings_path_with("./config.yaml", || {
            panic!("home directory looked up for a path without '~'")
        })
        .unwrap();
        assert_eq!(resolved, PathBuf::from("./config.yaml"));
    }
}
