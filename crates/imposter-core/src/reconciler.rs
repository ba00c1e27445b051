//! Reconciler implementation
//!
//! Fetches the remote snapshot once, plans every declared rule, then
//! applies the plan one mutation at a time. The first failed mutation
//! ends the run; nothing after it is attempted and nothing before it is
//! rolled back.

use std::ops::ControlFlow;

use imposter_git::RepositoryRef;
use imposter_github::BranchProtectionApi;
use imposter_meta::Settings;
use serde::Serialize;

use crate::plan::{PlannedRule, RuleAction, plan};
use crate::{Error, Result};

/// Whether mutations are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
    #[default]
    Apply,
    /// Plan only; no mutation is sent
    DryRun,
}

/// One planned rule and what became of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedAction {
    pub pattern: String,
    #[serde(flatten)]
    pub action: RuleAction,
    /// Node ID of the rule after the mutation; `None` on dry runs of a create
    pub result_id: Option<String>,
    pub applied: bool,
}

/// Report from a reconcile run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// `owner/name`
    pub repository: String,
    pub repository_id: String,
    pub actions: Vec<AppliedAction>,
    pub skipped: usize,
    pub dry_run: bool,
}

impl ReconcileReport {
    pub fn created(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.action == RuleAction::Create)
            .count()
    }

    pub fn updated(&self) -> usize {
        self.actions.len() - self.created()
    }
}

/// Drives one repository towards its declared rules.
pub struct Reconciler<'a, A: BranchProtectionApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: BranchProtectionApi + ?Sized> Reconciler<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Reconcile `repo` against `settings`.
    pub async fn run(
        &self,
        repo: &RepositoryRef,
        settings: &Settings,
        mode: ApplyMode,
    ) -> Result<ReconcileReport> {
        self.run_observed(repo, settings, mode, |_| ControlFlow::Continue(()))
            .await
    }

    /// Like [`run`](Self::run), calling `observe` right before each rule is applied.
    ///
    /// `ControlFlow::Break` from `observe` ends the run with [`Error::Stopped`]
    /// before that rule is touched.
    pub async fn run_observed<F>(
        &self,
        repo: &RepositoryRef,
        settings: &Settings,
        mode: ApplyMode,
        mut observe: F,
    ) -> Result<ReconcileReport>
    where
        F: FnMut(&PlannedRule<'_>) -> ControlFlow<()>,
    {
        tracing::info!(owner = %repo.owner, name = %repo.name, "Reconciling branch protection rules");

        let snapshot = self.api.repository_rules(&repo.owner, &repo.name).await?;
        let plan = plan(settings, &snapshot);

        tracing::debug!(
            existing = snapshot.rules.len(),
            create = plan.create_count(),
            update = plan.update_count(),
            skipped = plan.skipped,
            "Planned branch protection changes"
        );

        let mut actions = Vec::with_capacity(plan.rules.len());
        for planned in &plan.rules {
            if observe(planned).is_break() {
                tracing::warn!(pattern = %planned.pattern(), "Stopped by observer");
                return Err(Error::Stopped {
                    action: planned.action.verb().to_string(),
                    pattern: planned.pattern().to_string(),
                });
            }

            if mode == ApplyMode::DryRun {
                tracing::info!(pattern = %planned.pattern(), "[dry-run] Would {}", planned.action.verb());
                actions.push(AppliedAction {
                    pattern: planned.pattern().to_string(),
                    action: planned.action.clone(),
                    result_id: match &planned.action {
                        RuleAction::Update { rule_id } => Some(rule_id.clone()),
                        RuleAction::Create => None,
                    },
                    applied: false,
                });
                continue;
            }

            tracing::info!(pattern = %planned.pattern(), "{} {}", planned.action.verb(), planned.pattern());
            let result = match &planned.action {
                RuleAction::Update { rule_id } => self.api.update_rule(rule_id, planned.rule).await,
                RuleAction::Create => self.api.create_rule(&snapshot.id, planned.rule).await,
            };
            let rule = result.map_err(|source| {
                tracing::warn!(pattern = %planned.pattern(), error = %source, "Mutation failed; stopping");
                Error::Mutation {
                    action: planned.action.verb().to_string(),
                    pattern: planned.pattern().to_string(),
                    source,
                }
            })?;

            actions.push(AppliedAction {
                pattern: planned.pattern().to_string(),
                action: planned.action.clone(),
                result_id: Some(rule.id),
                applied: true,
            });
        }

        Ok(ReconcileReport {
            repository: repo.full_name(),
            repository_id: snapshot.id,
            actions,
            skipped: plan.skipped,
            dry_run: mode == ApplyMode::DryRun,
        })
    }
}
