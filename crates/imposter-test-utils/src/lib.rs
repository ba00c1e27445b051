//! Shared test utilities for the gh-imposter workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only; it is never published.
//!
//! # Modules
//!
//! - [`git`]: git checkouts with remotes
//! - [`settings`]: settings files on disk
//! - [`api`]: [`FakeApi`](api::FakeApi), an in-memory branch protection API

pub mod api;
pub mod git;
pub mod settings;
