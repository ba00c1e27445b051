//! GraphQL HTTP client

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthEnv, graphql_endpoint, resolve_token};
use crate::{Error, Result};

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout for HTTP requests (30 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of characters of an error body kept in [`Error::Status`].
const MAX_ERROR_BODY_LENGTH: usize = 200;

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_LENGTH) {
        Some((end, _)) => format!("{}... (truncated)", &body[..end]),
        None => body.to_string(),
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Authenticated client for one GitHub GraphQL endpoint.
pub struct GitHubClient {
    http: Client,
    endpoint: String,
    token: SecretString,
}

impl GitHubClient {
    /// Client for `host`, authenticating the way `gh` does.
    pub fn for_host(host: &str) -> Result<Self> {
        let token = resolve_token(host, &AuthEnv::from_process())?;
        Self::with_endpoint(graphql_endpoint(host), token)
    }

    /// Client for an explicit endpoint URL.
    pub fn with_endpoint(endpoint: impl Into<String>, token: SecretString) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .user_agent(concat!("gh-imposter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            token,
        })
    }

    /// Run one GraphQL operation and decode its `data`.
    ///
    /// Any entry in `errors` fails the call, even when partial data came back.
    pub async fn execute<V, T>(&self, operation: &str, query: &str, variables: V) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!(operation = %operation, endpoint = %self.endpoint, "GraphQL request");

        let request = GraphQlRequest {
            query,
            operation_name: operation,
            variables,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.token.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
                body: truncate_body(&body),
            });
        }

        let body: GraphQlResponse<T> = response.json().await?;
        if !body.errors.is_empty() {
            return Err(Error::GraphQl {
                messages: body.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        body.data.ok_or_else(|| Error::MissingData {
            operation: operation.to_string(),
        })
    }
}
