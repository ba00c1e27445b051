//! Create and update mutations
//!
//! Input objects borrow from the declared [`BranchProtectionRule`]. Fields
//! the settings file leaves unset are omitted so the API keeps its current
//! value on update and its default on create.

use imposter_meta::{BranchProtectionRule, RequiredStatusCheck};
use serde::{Deserialize, Serialize};

use crate::api::ExistingRule;
use crate::{Error, GitHubClient, Result};

pub const CREATE_RULE_MUTATION: &str = r#"mutation CreateBranchProtectionRule($input: CreateBranchProtectionRuleInput!) {
  createBranchProtectionRule(input: $input) {
    clientMutationId
    branchProtectionRule { id pattern }
  }
}"#;

pub const UPDATE_RULE_MUTATION: &str = r#"mutation UpdateBranchProtectionRule($input: UpdateBranchProtectionRuleInput!) {
  updateBranchProtectionRule(input: $input) {
    clientMutationId
    branchProtectionRule { id pattern }
  }
}"#;

/// `RequiredStatusCheckInput`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheckInput<'a> {
    pub context: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<&'a str>,
}

impl<'a> From<&'a RequiredStatusCheck> for StatusCheckInput<'a> {
    fn from(check: &'a RequiredStatusCheck) -> Self {
        Self {
            context: &check.context,
            app_id: check.app_id.as_deref(),
        }
    }
}

/// Rule fields shared by the create and update inputs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFields<'a> {
    pub pattern: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_approving_reviews: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_commit_signatures: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_linear_history: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks_creations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_force_pushes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_deletions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin_enforced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_status_checks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_strict_status_checks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_code_owner_reviews: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismisses_stale_reviews: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricts_review_dismissals: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_dismissal_actor_ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_pull_request_actor_ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass_force_push_actor_ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restricts_pushes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_actor_ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_status_check_contexts: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<Vec<StatusCheckInput<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_deployments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_deployment_environments: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_conversation_resolution: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_last_push_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_branch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_allows_fetch_and_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_mutation_id: Option<&'a str>,
}

impl<'a> From<&'a BranchProtectionRule> for RuleFields<'a> {
    fn from(rule: &'a BranchProtectionRule) -> Self {
        Self {
            pattern: &rule.pattern,
            requires_approving_reviews: rule.requires_approving_reviews,
            required_approving_review_count: rule.required_approving_review_count,
            requires_commit_signatures: rule.requires_commit_signatures,
            requires_linear_history: rule.requires_linear_history,
            blocks_creations: rule.blocks_creations,
            allows_force_pushes: rule.allows_force_pushes,
            allows_deletions: rule.allows_deletions,
            is_admin_enforced: rule.is_admin_enforced,
            requires_status_checks: rule.requires_status_checks,
            requires_strict_status_checks: rule.requires_strict_status_checks,
            requires_code_owner_reviews: rule.requires_code_owner_reviews,
            dismisses_stale_reviews: rule.dismisses_stale_reviews,
            restricts_review_dismissals: rule.restricts_review_dismissals,
            review_dismissal_actor_ids: rule.review_dismissal_actor_ids.as_deref(),
            bypass_pull_request_actor_ids: rule.bypass_pull_request_actor_ids.as_deref(),
            bypass_force_push_actor_ids: rule.bypass_force_push_actor_ids.as_deref(),
            restricts_pushes: rule.restricts_pushes,
            push_actor_ids: rule.push_actor_ids.as_deref(),
            required_status_check_contexts: rule.required_status_check_contexts.as_deref(),
            required_status_checks: rule
                .required_status_checks
                .as_ref()
                .map(|checks| checks.iter().map(StatusCheckInput::from).collect()),
            requires_deployments: rule.requires_deployments,
            required_deployment_environments: rule.required_deployment_environments.as_deref(),
            requires_conversation_resolution: rule.requires_conversation_resolution,
            require_last_push_approval: rule.require_last_push_approval,
            lock_branch: rule.lock_branch,
            lock_allows_fetch_and_merge: rule.lock_allows_fetch_and_merge,
            client_mutation_id: rule.client_mutation_id.as_deref(),
        }
    }
}

/// `CreateBranchProtectionRuleInput`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleInput<'a> {
    pub repository_id: &'a str,
    #[serde(flatten)]
    pub fields: RuleFields<'a>,
}

impl<'a> CreateRuleInput<'a> {
    pub fn new(repository_id: &'a str, rule: &'a BranchProtectionRule) -> Self {
        Self {
            repository_id,
            fields: RuleFields::from(rule),
        }
    }
}

/// `UpdateBranchProtectionRuleInput`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleInput<'a> {
    pub branch_protection_rule_id: &'a str,
    #[serde(flatten)]
    pub fields: RuleFields<'a>,
}

impl<'a> UpdateRuleInput<'a> {
    pub fn new(rule_id: &'a str, rule: &'a BranchProtectionRule) -> Self {
        Self {
            branch_protection_rule_id: rule_id,
            fields: RuleFields::from(rule),
        }
    }
}

#[derive(Serialize)]
struct MutationVariables<I> {
    input: I,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationPayload {
    branch_protection_rule: Option<ExistingRule>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateData {
    create_branch_protection_rule: Option<MutationPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    update_branch_protection_rule: Option<MutationPayload>,
}

fn rule_from_payload(operation: &str, payload: Option<MutationPayload>) -> Result<ExistingRule> {
    payload
        .and_then(|p| p.branch_protection_rule)
        .ok_or_else(|| Error::MissingData {
            operation: operation.to_string(),
        })
}

pub(crate) async fn create_rule(
    client: &GitHubClient,
    repository_id: &str,
    rule: &BranchProtectionRule,
) -> Result<ExistingRule> {
    const OPERATION: &str = "CreateBranchProtectionRule";
    let variables = MutationVariables {
        input: CreateRuleInput::new(repository_id, rule),
    };
    let data: CreateData = client
        .execute(OPERATION, CREATE_RULE_MUTATION, variables)
        .await?;
    rule_from_payload(OPERATION, data.create_branch_protection_rule)
}

pub(crate) async fn update_rule(
    client: &GitHubClient,
    rule_id: &str,
    rule: &BranchProtectionRule,
) -> Result<ExistingRule> {
    const OPERATION: &str = "UpdateBranchProtectionRule";
    let variables = MutationVariables {
        input: UpdateRuleInput::new(rule_id, rule),
    };
    let data: UpdateData = client
        .execute(OPERATION, UPDATE_RULE_MUTATION, variables)
        .await?;
    rule_from_payload(OPERATION, data.update_branch_protection_rule)
}
