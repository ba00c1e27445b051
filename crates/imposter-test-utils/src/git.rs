//! Git checkout fixtures.

use std::path::Path;

/// Initialises a real git repository using `git2` (no commits).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialises a repository with the given `(name, url)` remotes.
///
/// # Panics
/// Panics if the repository or any remote cannot be created.
pub fn git_repo_with_remotes(path: &Path, remotes: &[(&str, &str)]) -> git2::Repository {
    let repo = real_git_repo(path);
    for (name, url) in remotes {
        repo.remote(name, url).unwrap_or_else(|e| {
            panic!("git_repo_with_remotes: failed to add remote {name} -> {url}: {e}")
        });
    }
    repo
}
