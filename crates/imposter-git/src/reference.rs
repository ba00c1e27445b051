//! Repository references and remote URL parsing

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{Error, Result};

/// Host used when nothing else names one.
pub const DEFAULT_HOST: &str = "github.com";

static URL_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?|ssh|git|git\+ssh)://(?:[^@/]+@)?([^/:]+)(?::\d+)?/([^/]+)/([^/]+?)(?:\.git)?/?$",
    )
    .expect("remote URL pattern is valid")
});

static SCP_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^@/]+@)?([^:/]+):/?([^/]+)/([^/]+?)(?:\.git)?/?$")
        .expect("scp-like remote pattern is valid")
});

/// A repository on a GitHub host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryRef {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: normalize_host(&host.into()),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `owner/name`, attaching `host`.
    ///
    /// Anything other than exactly two non-empty segments is rejected.
    pub fn parse_with_host(s: &str, host: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(host, *owner, *name))
            }
            _ => Err(Error::RepositoryNotSpecified),
        }
    }

    /// Parse `owner/name` or `host/owner/name`.
    pub fn parse_qualified(s: &str, default_host: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [host, owner, name] if parts.iter().all(|p| !p.is_empty()) => {
                Ok(Self::new(*host, *owner, *name))
            }
            _ => Self::parse_with_host(s, default_host),
        }
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse_with_host(s, DEFAULT_HOST)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parse a git remote URL into a repository reference.
///
/// Accepts `https://`, `http://`, `ssh://`, `git://` URLs and scp-like
/// `git@host:owner/name.git` forms.
pub fn parse_remote_url(url: &str) -> Result<RepositoryRef> {
    let url = url.trim();
    let captures = if url.contains("://") {
        URL_REMOTE.captures(url)
    } else {
        SCP_REMOTE.captures(url)
    };

    captures
        .map(|c| RepositoryRef::new(&c[1], &c[2], &c[3]))
        .ok_or_else(|| Error::UnrecognizedRemote {
            url: url.to_string(),
        })
}

pub(crate) fn normalize_host(host: &str) -> String {
    let host = host.to_lowercase();
    if host == "ssh.github.com" || host == "www.github.com" {
        DEFAULT_HOST.to_string()
    } else {
        host
    }
}
