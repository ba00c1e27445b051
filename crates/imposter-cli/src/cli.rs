//! CLI argument parsing using clap derive

use clap::Parser;
use imposter_meta::DEFAULT_SETTINGS_PATH;

/// gh-imposter - configure repositories based on a settings file
///
/// Reads branch protection rules from the settings file and creates or
/// updates them on the target repository, matching existing rules by
/// pattern.
///
/// Examples:
///   gh-imposter                              # Current repository, default settings
///   gh-imposter -r octo/widgets              # Explicit repository
///   gh-imposter -c ./protection.yaml --dry-run
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gh-imposter")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "An empty settings file declares no rules: the repository is looked up \
and nothing is created or updated.")]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        env = "GH_IMPOSTER_CONFIG",
        default_value = DEFAULT_SETTINGS_PATH
    )]
    pub config: String,

    /// Repository in OWNER/NAME format (default: repository of the current directory)
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Show what would be created or updated without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gh-imposter"]).unwrap();
        // GH_IMPOSTER_CONFIG may be set in the environment running the tests
        if std::env::var_os("GH_IMPOSTER_CONFIG").is_none() {
            assert_eq!(cli.config, "~/.config/gh-imposter/config.yaml");
        }
        assert_eq!(cli.repository, None);
        assert!(!cli.dry_run);
        assert!(!cli.json);
    }

    #[test]
    fn test_short_flags() {
        let cli =
            Cli::try_parse_from(["gh-imposter", "-c", "rules.yaml", "-r", "octo/widgets", "-v"])
                .unwrap();
        assert_eq!(cli.config, "rules.yaml");
        assert_eq!(cli.repository.as_deref(), Some("octo/widgets"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "gh-imposter",
            "--config",
            "rules.yaml",
            "--repository",
            "octo/widgets",
            "--dry-run",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config, "rules.yaml");
        assert!(cli.dry_run);
        assert!(cli.json);
    }

    #[test]
    fn test_help_mentions_empty_settings() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("An empty settings file declares no rules"), "got: {help}");
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["gh-imposter", "--delete"]).is_err());
    }
}
