//! Discover the target repository from the environment and git remotes

use std::path::Path;

use git2::Repository;

use crate::reference::{DEFAULT_HOST, RepositoryRef, normalize_host, parse_remote_url};
use crate::{Error, Result};

/// Remote names in the order they are tried. Other remotes follow, sorted.
const REMOTE_PRIORITY: [&str; 3] = ["upstream", "github", "origin"];

/// Environment overrides that influence repository resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoEnv {
    /// `GH_REPO`: `owner/name`, `host/owner/name` or a repository URL
    pub gh_repo: Option<String>,
    /// `GH_HOST`: host for references that do not carry one
    pub gh_host: Option<String>,
    /// Further GitHub hosts, typically the ones gh is logged in to
    pub known_hosts: Vec<String>,
}

impl RepoEnv {
    /// Read overrides from the process environment. Empty values count as unset.
    pub fn from_process() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            gh_repo: read("GH_REPO"),
            gh_host: read("GH_HOST"),
            known_hosts: Vec::new(),
        }
    }

    pub fn with_known_hosts(mut self, hosts: impl IntoIterator<Item = String>) -> Self {
        self.known_hosts.extend(hosts);
        self
    }

    pub fn host(&self) -> &str {
        self.gh_host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Whether a remote on `host` can be a GitHub repository.
    ///
    /// `github.com`, `GH_HOST` and [`known_hosts`](Self::known_hosts) qualify.
    pub fn is_github_host(&self, host: &str) -> bool {
        std::iter::once(DEFAULT_HOST)
            .chain(self.gh_host.as_deref())
            .chain(self.known_hosts.iter().map(String::as_str))
            .any(|known| normalize_host(known).eq_ignore_ascii_case(host))
    }
}

/// Resolve the target: an explicit `owner/name` wins, otherwise the
/// repository checked out at `cwd`.
pub fn select_repository(explicit: Option<&str>, cwd: &Path, env: &RepoEnv) -> Result<RepositoryRef> {
    match explicit.filter(|s| !s.is_empty()) {
        Some(name) => RepositoryRef::parse_with_host(name, env.host()),
        None => current_repository(cwd, env),
    }
}

/// The repository for the current directory.
///
/// `GH_REPO` is honoured first. Failing that, the git repository containing
/// `cwd` is opened and its remotes are tried by priority; the first remote
/// whose URL names a repository on a GitHub host wins.
pub fn current_repository(cwd: &Path, env: &RepoEnv) -> Result<RepositoryRef> {
    if let Some(repo) = &env.gh_repo {
        return parse_remote_url(repo)
            .or_else(|_| RepositoryRef::parse_qualified(repo, env.host()));
    }

    let repo = Repository::discover(cwd).map_err(|e| {
        tracing::debug!(path = %cwd.display(), error = %e, "No git repository found");
        Error::RepositoryNotSpecified
    })?;

    for (remote_name, url) in ordered_remotes(&repo)? {
        match parse_remote_url(&url) {
            Ok(found) if env.is_github_host(&found.host) => {
                tracing::debug!(remote = %remote_name, repository = %found, "Using git remote");
                return Ok(found);
            }
            Ok(found) => {
                tracing::debug!(
                    remote = %remote_name,
                    host = %found.host,
                    "Skipping remote on a non-GitHub host"
                );
            }
            Err(e) => {
                tracing::debug!(remote = %remote_name, error = %e, "Skipping remote");
            }
        }
    }

    Err(Error::RepositoryNotSpecified)
}

/// Remote names with their URLs, in lookup priority order.
fn ordered_remotes(repo: &Repository) -> Result<Vec<(String, String)>> {
    let names = repo.remotes()?;
    let mut remotes: Vec<(String, String)> = names
        .iter()
        .flatten()
        .filter_map(|name| {
            let remote = repo.find_remote(name).ok()?;
            let url = remote.url()?.to_string();
            Some((name.to_string(), url))
        })
        .collect();

    remotes.sort_by(|(a, _), (b, _)| {
        let rank = |name: &str| {
            REMOTE_PRIORITY
                .iter()
                .position(|p| *p == name)
                .unwrap_or(REMOTE_PRIORITY.len())
        };
        rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
    });

    Ok(remotes)
}
