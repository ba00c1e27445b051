//! The reconcile command
//!
//! Loads the settings file, resolves the target repository and brings its
//! branch protection rules in line with the settings.

use std::io::Write;
use std::ops::ControlFlow;
use std::path::Path;

use colored::Colorize;

use imposter_core::{ApplyMode, PlannedRule, ReconcileReport, Reconciler, RuleAction};
use imposter_git::{RepoEnv, RepositoryRef, select_repository};
use imposter_github::{AuthEnv, BranchProtectionApi, GitHubClient, authenticated_hosts};
use imposter_meta::{Settings, load_settings};

use crate::cli::Cli;
use crate::error::Result;

/// Output and mutation switches for [`apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub dry_run: bool,
    pub json: bool,
}

impl From<&Cli> for ApplyOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            dry_run: cli.dry_run,
            json: cli.json,
        }
    }
}

/// Run the command against the real API for the resolved repository's host.
pub async fn run_apply(cli: &Cli, cwd: &Path) -> Result<()> {
    let settings = load_settings(&cli.config)?;

    // Remotes on hosts gh is logged in to count as GitHub remotes
    let known_hosts = authenticated_hosts(&AuthEnv::from_process()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable gh hosts file");
        Vec::new()
    });
    let repo_env = RepoEnv::from_process().with_known_hosts(known_hosts);
    let repo = select_repository(cli.repository.as_deref(), cwd, &repo_env)?;
    let client = GitHubClient::for_host(&repo.host)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    apply(&client, &repo, &settings, ApplyOptions::from(cli), &mut out).await?;
    Ok(())
}

/// Reconcile `repo` through `api`, writing progress to `out`.
///
/// A failed write to `out` stops the run before the next rule is applied.
pub async fn apply<A, W>(
    api: &A,
    repo: &RepositoryRef,
    settings: &Settings,
    options: ApplyOptions,
    out: &mut W,
) -> Result<ReconcileReport>
where
    A: BranchProtectionApi + ?Sized,
    W: Write,
{
    if !options.json {
        writeln!(out, "owner: {}", repo.owner)?;
        writeln!(out, "name: {}", repo.name)?;
    }

    let mode = if options.dry_run {
        ApplyMode::DryRun
    } else {
        ApplyMode::Apply
    };

    let mut write_error = None;
    let result = Reconciler::new(api)
        .run_observed(repo, settings, mode, |planned| {
            if options.json {
                return ControlFlow::Continue(());
            }
            match write_action(out, planned, options.dry_run) {
                Ok(()) => ControlFlow::Continue(()),
                Err(e) => {
                    write_error = Some(e);
                    ControlFlow::Break(())
                }
            }
        })
        .await;
    if let Some(e) = write_error {
        return Err(e.into());
    }
    let report = result?;

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write_summary(out, &report)?;
    }

    Ok(report)
}

fn write_action<W: Write>(out: &mut W, planned: &PlannedRule<'_>, dry_run: bool) -> std::io::Result<()> {
    let verb = match planned.action {
        RuleAction::Create => planned.action.verb().green(),
        RuleAction::Update { .. } => planned.action.verb().yellow(),
    };
    if dry_run {
        writeln!(out, "{} {} {}", "[dry-run]".dimmed(), verb, planned.pattern())
    } else {
        writeln!(out, "{} {}", verb, planned.pattern())
    }
}

fn write_summary<W: Write>(out: &mut W, report: &ReconcileReport) -> std::io::Result<()> {
    if report.actions.is_empty() {
        return writeln!(
            out,
            "{} No branch protection rules declared.",
            "OK".green().bold()
        );
    }

    if report.dry_run {
        writeln!(
            out,
            "{} Would create {} and update {} rule(s). No changes were made.",
            "DRY-RUN".cyan().bold(),
            report.created(),
            report.updated()
        )
    } else {
        writeln!(
            out,
            "{} Created {} and updated {} rule(s).",
            "OK".green().bold(),
            report.created(),
            report.updated()
        )
    }
}
