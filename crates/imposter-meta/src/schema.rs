//! Settings file schema
//!
//! The settings file is a single document with a `branchProtectionRules`
//! list. Every rule field except `pattern` is optional; fields that are
//! left out are not sent to the API, so an update leaves them as they are.

use serde::{Deserialize, Serialize};

/// The whole settings document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Desired branch-protection rules, in application order
    #[serde(default)]
    pub branch_protection_rules: Vec<BranchProtectionRule>,
}

impl Settings {
    /// Rules that can be reconciled. Rules with an empty pattern are skipped.
    pub fn declared_rules(&self) -> impl Iterator<Item = &BranchProtectionRule> {
        self.branch_protection_rules.iter().filter(|rule| {
            if rule.pattern.is_empty() {
                tracing::debug!("Skipping branch protection rule with empty pattern");
                false
            } else {
                true
            }
        })
    }

    /// Number of rules that will be skipped for having no pattern.
    pub fn skipped_count(&self) -> usize {
        self.branch_protection_rules
            .iter()
            .filter(|rule| rule.pattern.is_empty())
            .count()
    }
}

/// A required status check, optionally pinned to the app that reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredStatusCheck {
    /// Name of the status check context
    pub context: String,
    /// Node ID of the app that must provide the status
    #[serde(default, alias = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

/// One desired branch-protection rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchProtectionRule {
    /// Glob pattern of the branches this rule protects; the matching key
    #[serde(default)]
    pub pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_approving_reviews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_commit_signatures: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_linear_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks_creations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_force_pushes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_deletions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin_enforced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_status_checks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_strict_status_checks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_code_owner_reviews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismisses_stale_reviews: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricts_review_dismissals: Option<bool>,

    #[serde(
        default,
        rename = "reviewDismissalActorIDs",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_dismissal_actor_ids: Option<Vec<String>>,
    #[serde(
        default,
        rename = "bypassPullRequestActorIDs",
        skip_serializing_if = "Option::is_none"
    )]
    pub bypass_pull_request_actor_ids: Option<Vec<String>>,
    #[serde(
        default,
        rename = "bypassForcePushActorIDs",
        skip_serializing_if = "Option::is_none"
    )]
    pub bypass_force_push_actor_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricts_pushes: Option<bool>,
    #[serde(
        default,
        rename = "pushActorIDs",
        skip_serializing_if = "Option::is_none"
    )]
    pub push_actor_ids: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_status_check_contexts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<Vec<RequiredStatusCheck>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_deployments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_deployment_environments: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_conversation_resolution: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_last_push_approval: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_branch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_allows_fetch_and_merge: Option<bool>,

    /// Opaque identifier echoed back by the API
    #[serde(
        default,
        rename = "clientMutationID",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_mutation_id: Option<String>,
}

impl BranchProtectionRule {
    /// A rule with only its pattern set.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }
}
