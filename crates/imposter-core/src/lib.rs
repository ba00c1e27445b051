//! Branch protection reconciliation for gh-imposter
//!
//! This crate matches declared rules to existing rules by pattern and
//! applies the matching mutation for each:
//!
//! - **plan**: decide create or update per declared rule
//! - **reconcile**: fetch the remote snapshot, plan, then apply sequentially
//!
//! # Architecture
//!
//! ```text
//!                  imposter-cli
//!                       |
//!                 imposter-core
//!                       |
//!     +-----------------+-----------------+
//!     |                 |                 |
//! imposter-meta   imposter-git    imposter-github
//! ```

pub mod error;
pub mod plan;
pub mod reconciler;

pub use error::{Error, Result};
pub use plan::{Plan, PlannedRule, RuleAction, plan};
pub use reconciler::{AppliedAction, ApplyMode, ReconcileReport, Reconciler};
