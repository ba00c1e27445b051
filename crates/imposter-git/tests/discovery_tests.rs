//! Repository discovery against real git checkouts.

use imposter_git::{Error, RepoEnv, RepositoryRef, current_repository, select_repository};
use imposter_test_utils::git::{git_repo_with_remotes, real_git_repo};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;

fn discover(remotes: &[(&str, &str)]) -> imposter_git::Result<RepositoryRef> {
    discover_with(remotes, &RepoEnv::default())
}

fn discover_with(remotes: &[(&str, &str)], env: &RepoEnv) -> imposter_git::Result<RepositoryRef> {
    let temp = TempDir::new().unwrap();
    git_repo_with_remotes(temp.path(), remotes);
    current_repository(temp.path(), env)
}

#[test]
fn test_origin_remote() {
    let repo = discover(&[("origin", "git@github.com:octo/widgets.git")]).unwrap();
    assert_eq!(repo.full_name(), "octo/widgets");
    assert_eq!(repo.host, "github.com");
}

#[rstest]
#[case::upstream_before_origin(
    &[("origin", "https://github.com/fork/widgets.git"), ("upstream", "https://github.com/octo/widgets.git")],
    "octo/widgets"
)]
#[case::github_before_origin(
    &[("origin", "https://github.com/fork/widgets"), ("github", "https://github.com/octo/widgets")],
    "octo/widgets"
)]
#[case::origin_before_others(
    &[("aaa", "https://github.com/other/widgets"), ("origin", "https://github.com/octo/widgets")],
    "octo/widgets"
)]
#[case::others_alphabetical(
    &[("zeta", "https://github.com/zeta/widgets"), ("beta", "https://github.com/beta/widgets")],
    "beta/widgets"
)]
fn test_remote_priority(#[case] remotes: &[(&str, &str)], #[case] expected: &str) {
    let repo = discover(remotes).unwrap();
    assert_eq!(repo.full_name(), expected);
}

#[test]
fn test_unparseable_remote_is_skipped() {
    let repo = discover(&[
        ("upstream", "/srv/git/widgets.git"),
        ("origin", "ssh://git@ssh.github.com/octo/widgets.git"),
    ])
    .unwrap();
    assert_eq!(repo.full_name(), "octo/widgets");
    assert_eq!(repo.host, "github.com");
}

#[rstest]
#[case::gitlab_only(&[("origin", "git@gitlab.com:octo/widgets.git")])]
#[case::bitbucket_and_gitlab(&[
    ("origin", "https://bitbucket.org/octo/widgets.git"),
    ("upstream", "https://gitlab.com/octo/widgets.git"),
])]
#[case::unknown_enterprise_host(&[("origin", "https://ghe.example.com/octo/widgets")])]
fn test_non_github_remotes_rejected(#[case] remotes: &[(&str, &str)]) {
    let err = discover(remotes).unwrap_err();
    assert!(matches!(err, Error::RepositoryNotSpecified));
}

#[test]
fn test_non_github_remote_falls_through_to_github_remote() {
    let repo = discover(&[
        ("origin", "git@gitlab.com:mirror/widgets.git"),
        ("zeta", "git@github.com:octo/widgets.git"),
    ])
    .unwrap();
    assert_eq!(repo.host, "github.com");
    assert_eq!(repo.full_name(), "octo/widgets");
}

#[rstest]
#[case::gh_host(RepoEnv { gh_host: Some("ghe.example.com".into()), ..RepoEnv::default() })]
#[case::logged_in_host(RepoEnv::default().with_known_hosts(["GHE.example.com".to_string()]))]
fn test_enterprise_remote_accepted_when_known(#[case] env: RepoEnv) {
    let repo = discover_with(
        &[
            ("upstream", "https://gitlab.com/octo/widgets.git"),
            ("origin", "git@ghe.example.com:octo/widgets.git"),
        ],
        &env,
    )
    .unwrap();
    assert_eq!(repo.host, "ghe.example.com");
    assert_eq!(repo.full_name(), "octo/widgets");
}

#[test]
fn test_checkout_without_remotes() {
    let err = discover(&[]).unwrap_err();
    assert!(matches!(err, Error::RepositoryNotSpecified));
}

#[test]
fn test_discovery_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    git_repo_with_remotes(temp.path(), &[("origin", "https://github.com/octo/widgets")]);
    let nested = temp.path().join("src").join("deep");
    std::fs::create_dir_all(&nested).unwrap();

    let repo = select_repository(None, &nested, &RepoEnv::default()).unwrap();
    assert_eq!(repo.full_name(), "octo/widgets");
}

#[test]
fn test_explicit_repository_ignores_checkout() {
    let temp = TempDir::new().unwrap();
    real_git_repo(temp.path());

    let repo = select_repository(Some("octo/gadgets"), temp.path(), &RepoEnv::default()).unwrap();
    assert_eq!(repo.full_name(), "octo/gadgets");
}

proptest! {
    #[test]
    fn prop_owner_name_parses_back(
        owner in "[A-Za-z0-9][A-Za-z0-9-]{0,20}",
        name in "[A-Za-z0-9._-]{1,30}",
    ) {
        let input = format!("{owner}/{name}");
        let repo: RepositoryRef = input.parse().unwrap();
        prop_assert_eq!(repo.to_string(), input);
        prop_assert_eq!(repo.owner, owner);
        prop_assert_eq!(repo.name, name);
    }

    #[test]
    fn prop_segment_count_other_than_two_rejected(
        parts in prop::collection::vec("[a-z]{1,8}", 3..6),
    ) {
        let input = parts.join("/");
        prop_assert!(input.parse::<RepositoryRef>().is_err());
    }
}
