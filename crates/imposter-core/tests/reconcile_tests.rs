//! Integration tests for the reconciler against an in-memory API

use std::ops::ControlFlow;

use imposter_core::{ApplyMode, Error, Reconciler, RuleAction};
use imposter_git::RepositoryRef;
use imposter_meta::{BranchProtectionRule, Settings};
use imposter_test_utils::api::{ApiCall, FakeApi};
use pretty_assertions::assert_eq;

fn repo() -> RepositoryRef {
    "octo/widgets".parse().unwrap()
}

fn settings(patterns: &[&str]) -> Settings {
    Settings {
        branch_protection_rules: patterns
            .iter()
            .map(|p| BranchProtectionRule::new(*p))
            .collect(),
    }
}

#[tokio::test]
async fn test_creates_and_updates_in_order() {
    let api = FakeApi::with_rules("R_1", &[("BPR_1", "main")]);
    let settings = settings(&["release/*", "main"]);

    let report = Reconciler::new(&api)
        .run(&repo(), &settings, ApplyMode::Apply)
        .await
        .unwrap();

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::RepositoryRules {
                owner: "octo".into(),
                name: "widgets".into()
            },
            ApiCall::Create {
                repository_id: "R_1".into(),
                pattern: "release/*".into()
            },
            ApiCall::Update {
                rule_id: "BPR_1".into(),
                pattern: "main".into()
            },
        ]
    );
    assert_eq!(report.repository, "octo/widgets");
    assert_eq!(report.repository_id, "R_1");
    assert_eq!(report.created(), 1);
    assert_eq!(report.updated(), 1);
    assert!(report.actions.iter().all(|a| a.applied));
    assert_eq!(report.actions[0].result_id.as_deref(), Some("BPR_new1"));
}

#[tokio::test]
async fn test_empty_patterns_are_skipped() {
    let api = FakeApi::with_rules("R_1", &[]);
    let settings = settings(&["", "main", ""]);

    let report = Reconciler::new(&api)
        .run(&repo(), &settings, ApplyMode::Apply)
        .await
        .unwrap();

    assert_eq!(report.skipped, 2);
    assert_eq!(api.mutations().len(), 1);
}

#[tokio::test]
async fn test_first_error_aborts_run() {
    let api = FakeApi::with_rules("R_1", &[("BPR_1", "main")]).fail_on("develop");
    let settings = settings(&["main", "develop", "release/*"]);

    let err = Reconciler::new(&api)
        .run(&repo(), &settings, ApplyMode::Apply)
        .await
        .unwrap_err();

    match err {
        Error::Mutation {
            action, pattern, ..
        } => {
            assert_eq!(action, "create");
            assert_eq!(pattern, "develop");
        }
        other => panic!("expected Mutation error, got {other:?}"),
    }

    // main was updated, develop was attempted, release/* never was
    assert_eq!(
        api.mutations(),
        vec![
            ApiCall::Update {
                rule_id: "BPR_1".into(),
                pattern: "main".into()
            },
            ApiCall::Create {
                repository_id: "R_1".into(),
                pattern: "develop".into()
            },
        ]
    );
}

#[tokio::test]
async fn test_missing_repository_stops_before_mutations() {
    let api = FakeApi::missing_repository();

    let err = Reconciler::new(&api)
        .run(&repo(), &settings(&["main"]), ApplyMode::Apply)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::GitHub(imposter_github::Error::RepositoryNotFound { .. })
    ));
    assert!(api.mutations().is_empty());
}

#[tokio::test]
async fn test_dry_run_sends_no_mutations() {
    let api = FakeApi::with_rules("R_1", &[("BPR_1", "main")]);
    let settings = settings(&["main", "hotfix/*"]);

    let report = Reconciler::new(&api)
        .run(&repo(), &settings, ApplyMode::DryRun)
        .await
        .unwrap();

    assert!(api.mutations().is_empty());
    assert!(report.dry_run);
    assert!(report.actions.iter().all(|a| !a.applied));
    assert_eq!(
        report.actions[0].action,
        RuleAction::Update {
            rule_id: "BPR_1".into()
        }
    );
    assert_eq!(report.actions[1].action, RuleAction::Create);
    assert_eq!(report.actions[1].result_id, None);
}

#[tokio::test]
async fn test_observer_sees_each_rule_before_it_is_applied() {
    let api = FakeApi::with_rules("R_1", &[("BPR_1", "main")]).fail_on("develop");
    let settings = settings(&["main", "develop", "release/*"]);
    let mut seen = Vec::new();

    let _ = Reconciler::new(&api)
        .run_observed(&repo(), &settings, ApplyMode::Apply, |planned| {
            seen.push(planned.to_string());
            ControlFlow::Continue(())
        })
        .await;

    assert_eq!(seen, vec!["update main", "create develop"]);
}

#[tokio::test]
async fn test_observer_break_stops_before_the_rule() {
    let api = FakeApi::with_rules("R_1", &[]);
    let settings = settings(&["main", "develop", "release/*"]);

    let err = Reconciler::new(&api)
        .run_observed(&repo(), &settings, ApplyMode::Apply, |planned| {
            if planned.pattern() == "develop" {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .await
        .unwrap_err();

    assert!(
        matches!(&err, Error::Stopped { action, pattern } if action == "create" && pattern == "develop"),
        "unexpected error: {err}"
    );
    assert_eq!(
        api.mutations(),
        vec![ApiCall::Create {
            repository_id: "R_1".into(),
            pattern: "main".into(),
        }]
    );
}

#[tokio::test]
async fn test_second_run_only_updates() {
    let api = FakeApi::with_rules("R_1", &[]);
    let settings = settings(&["main", "release/*"]);
    let reconciler = Reconciler::new(&api);

    reconciler
        .run(&repo(), &settings, ApplyMode::Apply)
        .await
        .unwrap();
    let second = reconciler
        .run(&repo(), &settings, ApplyMode::Apply)
        .await
        .unwrap();

    assert_eq!(second.created(), 0);
    assert_eq!(second.updated(), 2);
    assert_eq!(api.rules().len(), 2);
}

#[tokio::test]
async fn test_report_json_shape() {
    let api = FakeApi::with_rules("R_1", &[("BPR_1", "main")]);
    let settings = settings(&["main", "develop"]);

    let report = Reconciler::new(&api)
        .run(&repo(), &settings, ApplyMode::Apply)
        .await
        .unwrap();

    insta::assert_json_snapshot!(report, @r#"
    {
      "repository": "octo/widgets",
      "repository_id": "R_1",
      "actions": [
        {
          "pattern": "main",
          "action": "update",
          "rule_id": "BPR_1",
          "result_id": "BPR_1",
          "applied": true
        },
        {
          "pattern": "develop",
          "action": "create",
          "result_id": "BPR_new1",
          "applied": true
        }
      ],
      "skipped": 0,
      "dry_run": false
    }
    "#);
}
