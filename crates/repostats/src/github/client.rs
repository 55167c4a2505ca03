//! GitHub API client over the injected transport.
//!
//! The client owns the authentication token and the standard request headers;
//! it performs no retries and no caching. One failed exchange is reported
//! upward as a typed error and the engine decides what it means.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{Result, StatsError};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};

use super::types::{Account, RepoRecord};

/// Fixed page size for repository listings. A page with fewer items than
/// this is the last page.
pub const PAGE_SIZE: usize = 100;

const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "repostats";

/// GitHub API client.
///
/// Cheap to clone; the transport and token are shared.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    token: Arc<str>,
    api_base: String,
}

impl GitHubClient {
    /// Create a client from a transport and an access token.
    ///
    /// The token is required: unauthenticated requests hit the remote's
    /// anonymous rate limit almost immediately.
    pub fn new(transport: Arc<dyn HttpTransport>, token: impl Into<String>) -> Self {
        Self {
            transport,
            token: token.into().into(),
            api_base: GITHUB_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (self-hosted instances, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn request(&self, url: impl Into<String>) -> HttpRequest {
        HttpRequest {
            url: url.into(),
            headers: vec![
                (
                    "Accept".to_string(),
                    "application/vnd.github+json".to_string(),
                ),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.token),
                ),
            ],
        }
    }

    async fn get(&self, url: impl Into<String>) -> Result<HttpResponse> {
        self.transport
            .get(self.request(url))
            .await
            .map_err(|e| StatsError::internal(e.to_string()))
    }

    fn parse<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
        serde_json::from_slice(&response.body)
            .map_err(|e| StatsError::internal(format!("JSON parse error: {e}")))
    }

    /// Resolve an account and obtain its repository-listing endpoint.
    ///
    /// Any non-success status is surfaced as [`StatsError::NotFound`] with
    /// the remote's status and message forwarded verbatim.
    pub async fn resolve_account(&self, username: &str) -> Result<Account> {
        let url = format!("{}/users/{}", self.api_base, username);
        let response = self.get(url).await?;

        if !response.is_success() {
            return Err(StatsError::not_found(response.status, response.body_text()));
        }

        Self::parse(&response)
    }

    /// Fetch one page of repository listings, `page >= 1`.
    ///
    /// A non-success status aborts the whole run, so it maps to
    /// [`StatsError::Upstream`] with the response body verbatim.
    pub async fn fetch_repo_page(&self, repos_url: &str, page: u32) -> Result<Vec<RepoRecord>> {
        let url = format!("{repos_url}?per_page={PAGE_SIZE}&page={page}");
        let response = self.get(url).await?;

        if !response.is_success() {
            return Err(StatsError::upstream(response.status, response.body_text()));
        }

        Self::parse(&response)
    }

    /// Fetch the language byte counts for one repository.
    ///
    /// Entries are returned in the order the remote reported them, which is
    /// what makes the final tie-break ordering deterministic.
    pub async fn fetch_languages(&self, languages_url: &str) -> Result<Vec<(String, u64)>> {
        let response = self.get(languages_url).await?;

        if !response.is_success() {
            return Err(StatsError::upstream(response.status, response.body_text()));
        }

        let map: serde_json::Map<String, serde_json::Value> = Self::parse(&response)?;
        Ok(map
            .into_iter()
            .map(|(lang, bytes)| (lang, bytes.as_u64().unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;

    fn client(transport: &MockTransport) -> GitHubClient {
        GitHubClient::new(Arc::new(transport.clone()), "test-token")
    }

    #[tokio::test]
    async fn resolve_account_returns_repos_url() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.github.com/users/octocat",
            r#"{"login":"octocat","repos_url":"https://api.github.com/users/octocat/repos"}"#,
        );

        let account = client(&transport)
            .resolve_account("octocat")
            .await
            .expect("resolve should succeed");
        assert_eq!(
            account.repos_url,
            "https://api.github.com/users/octocat/repos"
        );
    }

    #[tokio::test]
    async fn resolve_account_sends_auth_and_accept_headers() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.github.com/users/octocat",
            r#"{"repos_url":"https://api.github.com/users/octocat/repos"}"#,
        );

        client(&transport)
            .resolve_account("octocat")
            .await
            .expect("resolve should succeed");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        assert!(headers.contains(&(
            "Authorization".to_string(),
            "Bearer test-token".to_string()
        )));
        assert!(headers.contains(&(
            "Accept".to_string(),
            "application/vnd.github+json".to_string()
        )));
        assert!(headers.contains(&("User-Agent".to_string(), "repostats".to_string())));
    }

    #[tokio::test]
    async fn resolve_account_forwards_remote_status_as_not_found() {
        let transport = MockTransport::new();
        transport.push_status(
            "https://api.github.com/users/ghost",
            404,
            r#"{"message":"Not Found"}"#,
        );

        let err = client(&transport)
            .resolve_account("ghost")
            .await
            .expect_err("404 should map to NotFound");
        match err {
            StatsError::NotFound { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("Not Found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolve_account_transport_fault_is_internal() {
        // Nothing registered: the mock reports a transport-level error.
        let transport = MockTransport::new();

        let err = client(&transport)
            .resolve_account("octocat")
            .await
            .expect_err("unregistered URL should fail");
        assert!(matches!(err, StatsError::Internal { .. }));
    }

    #[tokio::test]
    async fn fetch_repo_page_builds_paginated_route() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.github.com/users/octocat/repos?per_page=100&page=3",
            r#"[{"name":"a","fork":false,"size":10,"stargazers_count":1,"forks_count":0,
                "languages_url":"https://api.github.com/repos/octocat/a/languages"}]"#,
        );

        let repos = client(&transport)
            .fetch_repo_page("https://api.github.com/users/octocat/repos", 3)
            .await
            .expect("page fetch should succeed");
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "a");
    }

    #[tokio::test]
    async fn fetch_repo_page_non_success_is_upstream_verbatim() {
        let transport = MockTransport::new();
        transport.push_status(
            "https://api.github.com/users/octocat/repos?per_page=100&page=2",
            403,
            "API rate limit exceeded",
        );

        let err = client(&transport)
            .fetch_repo_page("https://api.github.com/users/octocat/repos", 2)
            .await
            .expect_err("403 should map to Upstream");
        match err {
            StatsError::Upstream { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "API rate limit exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_languages_preserves_document_order() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.github.com/repos/octocat/a/languages",
            r#"{"Rust": 5000, "Shell": 120, "Makefile": 120}"#,
        );

        let langs = client(&transport)
            .fetch_languages("https://api.github.com/repos/octocat/a/languages")
            .await
            .expect("language fetch should succeed");
        assert_eq!(
            langs,
            vec![
                ("Rust".to_string(), 5000),
                ("Shell".to_string(), 120),
                ("Makefile".to_string(), 120),
            ]
        );
    }

    #[tokio::test]
    async fn with_api_base_overrides_resolution_route() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://git.example.com/api/v3/users/octocat",
            r#"{"repos_url":"https://git.example.com/api/v3/users/octocat/repos"}"#,
        );

        let client = client(&transport).with_api_base("https://git.example.com/api/v3");
        let account = client
            .resolve_account("octocat")
            .await
            .expect("resolve should succeed");
        assert!(account.repos_url.starts_with("https://git.example.com"));
    }
}
