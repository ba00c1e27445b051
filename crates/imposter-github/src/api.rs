//! The branch protection API seam

use async_trait::async_trait;
use imposter_meta::BranchProtectionRule;
use serde::{Deserialize, Serialize};

use crate::{GitHubClient, Result, mutations, queries};

/// A rule that already exists remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingRule {
    /// Node ID of the rule
    pub id: String,
    pub pattern: String,
}

/// Repository node ID plus its current rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub id: String,
    pub rules: Vec<ExistingRule>,
}

impl RepositorySnapshot {
    /// The first existing rule whose pattern equals `pattern` exactly.
    pub fn find_rule(&self, pattern: &str) -> Option<&ExistingRule> {
        self.rules.iter().find(|rule| rule.pattern == pattern)
    }
}

/// Operations the reconciler needs from the remote side.
#[async_trait]
pub trait BranchProtectionApi: Send + Sync {
    /// Repository node ID and all existing rules.
    async fn repository_rules(&self, owner: &str, name: &str) -> Result<RepositorySnapshot>;

    /// Create `rule` on the repository with node ID `repository_id`.
    async fn create_rule(
        &self,
        repository_id: &str,
        rule: &BranchProtectionRule,
    ) -> Result<ExistingRule>;

    /// Overwrite the rule with node ID `rule_id` with the set fields of `rule`.
    async fn update_rule(&self, rule_id: &str, rule: &BranchProtectionRule)
    -> Result<ExistingRule>;
}

#[async_trait]
impl BranchProtectionApi for GitHubClient {
    async fn repository_rules(&self, owner: &str, name: &str) -> Result<RepositorySnapshot> {
        queries::fetch_repository_rules(self, owner, name).await
    }

    async fn create_rule(
        &self,
        repository_id: &str,
        rule: &BranchProtectionRule,
    ) -> Result<ExistingRule> {
        mutations::create_rule(self, repository_id, rule).await
    }

    async fn update_rule(
        &self,
        rule_id: &str,
        rule: &BranchProtectionRule,
    ) -> Result<ExistingRule> {
        mutations::update_rule(self, rule_id, rule).await
    }
}
