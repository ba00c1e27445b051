//! Read queries

use serde::{Deserialize, Serialize};

use crate::api::{ExistingRule, RepositorySnapshot};
use crate::{Error, GitHubClient, Result};

/// Rules fetched per page; the API maximum.
pub const RULES_PAGE_SIZE: u32 = 100;

pub const REPOSITORY_RULES_QUERY: &str = r#"query GetRepoID($owner: String!, $name: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    id
    branchProtectionRules(first: $first, after: $after) {
      nodes { id pattern }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct RepositoryRulesVariables<'a> {
    owner: &'a str,
    name: &'a str,
    first: u32,
    after: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct RepositoryRulesData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    id: String,
    branch_protection_rules: RuleConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleConnection {
    #[serde(default)]
    nodes: Vec<ExistingRule>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

/// Fetch the repository ID and every branch protection rule, page by page.
pub(crate) async fn fetch_repository_rules(
    client: &GitHubClient,
    owner: &str,
    name: &str,
) -> Result<RepositorySnapshot> {
    let mut rules = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let variables = RepositoryRulesVariables {
            owner,
            name,
            first: RULES_PAGE_SIZE,
            after: after.as_deref(),
        };
        let data: RepositoryRulesData = client
            .execute("GetRepoID", REPOSITORY_RULES_QUERY, variables)
            .await?;

        let repository = data.repository.ok_or_else(|| Error::RepositoryNotFound {
            owner: owner.to_string(),
            name: name.to_string(),
        })?;

        let connection = repository.branch_protection_rules;
        rules.extend(connection.nodes);

        match connection.page_info {
            PageInfo {
                has_next_page: true,
                end_cursor: Some(cursor),
            } => after = Some(cursor),
            _ => {
                tracing::debug!(
                    repository = %format!("{owner}/{name}"),
                    rules = rules.len(),
                    "Fetched branch protection rules"
                );
                return Ok(RepositorySnapshot {
                    id: repository.id,
                    rules,
                });
            }
        }
    }
}
