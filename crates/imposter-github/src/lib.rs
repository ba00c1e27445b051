//! GitHub GraphQL access to branch protection rules.
//!
//! [`GitHubClient`] talks to the GraphQL endpoint of a GitHub host and
//! implements [`BranchProtectionApi`], the seam the reconciler is written
//! against.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod mutations;
pub mod queries;

pub use api::{BranchProtectionApi, ExistingRule, RepositorySnapshot};
pub use auth::{AuthEnv, authenticated_hosts, graphql_endpoint, resolve_token};
pub use client::GitHubClient;
pub use error::{Error, Result};
