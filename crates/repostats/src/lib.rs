//! Repostats - aggregate repository statistics for a GitHub account.
//!
//! This library fetches every repository owned by an account, page by page,
//! and folds them into a single statistics record: repository count, total
//! stargazers, total forks, a human-readable average repository size, and a
//! byte-weighted language breakdown.
//!
//! All remote I/O flows through the [`http::HttpTransport`] seam, so the
//! aggregation logic can be exercised entirely in-memory.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use repostats::{GitHubClient, AggregateOptions, aggregate_user_stats};
//! use repostats::http::ReqwestTransport;
//!
//! let transport = Arc::new(ReqwestTransport::new(reqwest::Client::new()));
//! let client = GitHubClient::new(transport, "ghp_...");
//! let stats = aggregate_user_stats(&client, "octocat", &AggregateOptions::default()).await?;
//! println!("{}", serde_json::to_string(&stats)?);
//! ```

pub mod error;
pub mod github;
pub mod http;
pub mod stats;

pub use error::{Result, StatsError};
pub use github::{GitHubClient, PAGE_SIZE};
pub use stats::{
    AggregateOptions, AggregateResult, UnitSystem, aggregate_user_stats,
};
