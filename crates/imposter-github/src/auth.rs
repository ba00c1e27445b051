//! Endpoint and token resolution
//!
//! Follows the same lookup the `gh` CLI uses: environment tokens first,
//! then the `hosts.yml` file in the gh configuration directory.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

use crate::{Error, Result};

const GITHUB_HOST: &str = "github.com";

/// GraphQL endpoint for a host.
pub fn graphql_endpoint(host: &str) -> String {
    if host.eq_ignore_ascii_case(GITHUB_HOST) {
        "https://api.github.com/graphql".to_string()
    } else {
        format!("https://{}/api/graphql", host)
    }
}

/// Snapshot of the environment that token lookup depends on.
#[derive(Debug, Clone, Default)]
pub struct AuthEnv {
    pub gh_token: Option<String>,
    pub github_token: Option<String>,
    pub gh_enterprise_token: Option<String>,
    pub github_enterprise_token: Option<String>,
    pub gh_config_dir: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub home: Option<PathBuf>,
}

impl AuthEnv {
    /// Read the process environment. Empty values count as unset.
    pub fn from_process() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            gh_token: read("GH_TOKEN"),
            github_token: read("GITHUB_TOKEN"),
            gh_enterprise_token: read("GH_ENTERPRISE_TOKEN"),
            github_enterprise_token: read("GITHUB_ENTERPRISE_TOKEN"),
            gh_config_dir: read("GH_CONFIG_DIR").map(PathBuf::from),
            xdg_config_home: read("XDG_CONFIG_HOME").map(PathBuf::from),
            home: dirs::home_dir(),
        }
    }

    /// Directory holding gh's `hosts.yml`.
    pub fn gh_config_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.gh_config_dir {
            return Some(dir.clone());
        }
        if let Some(xdg) = &self.xdg_config_home {
            return Some(xdg.join("gh"));
        }
        self.home.as_ref().map(|home| home.join(".config").join("gh"))
    }

    fn env_token(&self, host: &str) -> Option<&str> {
        let candidates = if host.eq_ignore_ascii_case(GITHUB_HOST) {
            [&self.gh_token, &self.github_token]
        } else {
            [&self.gh_enterprise_token, &self.github_enterprise_token]
        };
        candidates.into_iter().flatten().map(String::as_str).next()
    }
}

#[derive(Debug, Deserialize)]
struct HostEntry {
    #[serde(default)]
    oauth_token: Option<String>,
}

type HostsFile = HashMap<String, HostEntry>;

/// Find an API token for `host`.
pub fn resolve_token(host: &str, env: &AuthEnv) -> Result<SecretString> {
    if let Some(token) = env.env_token(host) {
        tracing::debug!(host = %host, "Using token from environment");
        return Ok(SecretString::from(token.to_string()));
    }

    let hosts = read_hosts_file(env)?;
    let token = hosts
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(host))
        .and_then(|(_, entry)| entry.oauth_token)
        .filter(|token| !token.is_empty());
    if let Some(token) = token {
        tracing::debug!(host = %host, "Using token from gh hosts file");
        return Ok(SecretString::from(token));
    }

    Err(Error::AuthTokenMissing {
        host: host.to_string(),
    })
}

/// Hosts gh has been logged in to, as listed in `hosts.yml`.
///
/// A missing or unreadable file lists no hosts.
pub fn authenticated_hosts(env: &AuthEnv) -> Result<Vec<String>> {
    let mut hosts: Vec<String> = read_hosts_file(env)?.into_keys().collect();
    hosts.sort();
    Ok(hosts)
}

fn read_hosts_file(env: &AuthEnv) -> Result<HostsFile> {
    let Some(dir) = env.gh_config_dir() else {
        return Ok(HostsFile::new());
    };
    let path = dir.join("hosts.yml");
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "gh hosts file not readable");
            return Ok(HostsFile::new());
        }
    };
    if content.trim().is_empty() {
        return Ok(HostsFile::new());
    }

    serde_yaml::from_str(&content).map_err(|e| Error::InvalidHostsFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
