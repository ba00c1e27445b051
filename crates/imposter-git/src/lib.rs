//! Target repository resolution for gh-imposter
//!
//! A target is named either explicitly (`owner/name`) or derived from the
//! git checkout the command runs in.

pub mod discovery;
pub mod error;
pub mod reference;

pub use discovery::{RepoEnv, current_repository, select_repository};
pub use error::{Error, Result};
pub use reference::{DEFAULT_HOST, RepositoryRef, parse_remote_url};
