//! In-memory [`BranchProtectionApi`] for reconciler and CLI tests.

use std::sync::Mutex;

use async_trait::async_trait;
use imposter_github::{BranchProtectionApi, Error, ExistingRule, RepositorySnapshot, Result};
use imposter_meta::BranchProtectionRule;

/// A call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    RepositoryRules { owner: String, name: String },
    Create { repository_id: String, pattern: String },
    Update { rule_id: String, pattern: String },
}

#[derive(Debug, Default)]
struct State {
    snapshot: Option<RepositorySnapshot>,
    calls: Vec<ApiCall>,
    fail_pattern: Option<String>,
    next_id: usize,
}

/// Holds one repository's rules in memory and records every call.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    /// A repository with node ID `repository_id` and the given `(id, pattern)` rules.
    pub fn with_rules(repository_id: &str, rules: &[(&str, &str)]) -> Self {
        let snapshot = RepositorySnapshot {
            id: repository_id.to_string(),
            rules: rules
                .iter()
                .map(|(id, pattern)| ExistingRule {
                    id: id.to_string(),
                    pattern: pattern.to_string(),
                })
                .collect(),
        };
        Self {
            state: Mutex::new(State {
                snapshot: Some(snapshot),
                ..State::default()
            }),
        }
    }

    /// An API on which every repository lookup fails.
    pub fn missing_repository() -> Self {
        Self::default()
    }

    /// Make any mutation for `pattern` fail.
    pub fn fail_on(self, pattern: &str) -> Self {
        self.lock().fail_pattern = Some(pattern.to_string());
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Mutations only, in order.
    pub fn mutations(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, ApiCall::RepositoryRules { .. }))
            .collect()
    }

    /// Current remote rules.
    pub fn rules(&self) -> Vec<ExistingRule> {
        self.lock()
            .snapshot
            .as_ref()
            .map(|s| s.rules.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_failure(state: &State, pattern: &str) -> Result<()> {
        match &state.fail_pattern {
            Some(fail) if fail == pattern => Err(Error::GraphQl {
                messages: vec![format!("refusing to change {pattern}")],
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl BranchProtectionApi for FakeApi {
    async fn repository_rules(&self, owner: &str, name: &str) -> Result<RepositorySnapshot> {
        let mut state = self.lock();
        state.calls.push(ApiCall::RepositoryRules {
            owner: owner.to_string(),
            name: name.to_string(),
        });
        state
            .snapshot
            .clone()
            .ok_or_else(|| Error::RepositoryNotFound {
                owner: owner.to_string(),
                name: name.to_string(),
            })
    }

    async fn create_rule(
        &self,
        repository_id: &str,
        rule: &BranchProtectionRule,
    ) -> Result<ExistingRule> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Create {
            repository_id: repository_id.to_string(),
            pattern: rule.pattern.clone(),
        });
        Self::check_failure(&state, &rule.pattern)?;

        state.next_id += 1;
        let created = ExistingRule {
            id: format!("BPR_new{}", state.next_id),
            pattern: rule.pattern.clone(),
        };
        if let Some(snapshot) = state.snapshot.as_mut() {
            snapshot.rules.push(created.clone());
        }
        Ok(created)
    }

    async fn update_rule(
        &self,
        rule_id: &str,
        rule: &BranchProtectionRule,
    ) -> Result<ExistingRule> {
        let mut state = self.lock();
        state.calls.push(ApiCall::Update {
            rule_id: rule_id.to_string(),
            pattern: rule.pattern.clone(),
        });
        Self::check_failure(&state, &rule.pattern)?;

        let existing = state
            .snapshot
            .as_mut()
            .and_then(|s| s.rules.iter_mut().find(|r| r.id == rule_id))
            .ok_or_else(|| Error::GraphQl {
                messages: vec![format!("Could not resolve to a node with the global id of '{rule_id}'")],
            })?;
        existing.pattern = rule.pattern.clone();
        Ok(existing.clone())
    }
}
