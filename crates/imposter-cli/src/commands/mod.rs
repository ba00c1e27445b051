//! Command implementations for imposter-cli

pub mod apply;

pub use apply::run_apply;
