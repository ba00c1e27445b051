//! Create-or-update planning
//!
//! Declared rules are matched to existing rules by exact pattern equality.
//! Declared patterns are never compared with each other, so a pattern listed
//! twice is planned twice.

use std::fmt;

use imposter_github::RepositorySnapshot;
use imposter_meta::{BranchProtectionRule, Settings};
use serde::Serialize;

/// What to do with one declared rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum RuleAction {
    /// No existing rule has this pattern
    Create,
    /// An existing rule with this pattern will be overwritten
    Update { rule_id: String },
}

impl RuleAction {
    pub fn verb(&self) -> &'static str {
        match self {
            RuleAction::Create => "create",
            RuleAction::Update { .. } => "update",
        }
    }
}

/// A declared rule paired with its action.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRule<'a> {
    pub rule: &'a BranchProtectionRule,
    pub action: RuleAction,
}

impl PlannedRule<'_> {
    pub fn pattern(&self) -> &str {
        &self.rule.pattern
    }
}

impl fmt::Display for PlannedRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action.verb(), self.rule.pattern)
    }
}

/// Actions for every declared rule, in settings order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan<'a> {
    pub rules: Vec<PlannedRule<'a>>,
    /// Declared rules skipped for having an empty pattern
    pub skipped: usize,
}

impl Plan<'_> {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn create_count(&self) -> usize {
        self.rules
            .iter()
            .filter(|p| p.action == RuleAction::Create)
            .count()
    }

    pub fn update_count(&self) -> usize {
        self.rules.len() - self.create_count()
    }
}

/// Decide create or update for each declared rule.
pub fn plan<'a>(settings: &'a Settings, snapshot: &RepositorySnapshot) -> Plan<'a> {
    let rules = settings
        .declared_rules()
        .map(|rule| {
            let action = match snapshot.find_rule(&rule.pattern) {
                Some(existing) => RuleAction::Update {
                    rule_id: existing.id.clone(),
                },
                None => RuleAction::Create,
            };
            PlannedRule { rule, action }
        })
        .collect();

    Plan {
        rules,
        skipped: settings.skipped_count(),
    }
}
