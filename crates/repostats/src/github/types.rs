//! GitHub API data types.
//!
//! Only the fields the aggregation engine consumes are modeled; everything
//! else in the remote payloads is ignored.

use serde::Deserialize;

/// A resolved account, from `GET /users/{username}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// The account's repository-listing endpoint.
    pub repos_url: String,
}

/// One repository record from a listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    /// Repository name, used only for logging.
    #[serde(default)]
    pub name: String,
    /// Whether the repository is a fork.
    #[serde(default)]
    pub fork: bool,
    /// Repository size in KiB, as reported by the remote.
    #[serde(default)]
    pub size: u64,
    /// Stargazer count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// The repository's language endpoint.
    pub languages_url: String,
}
