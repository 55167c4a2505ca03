//! GitHub REST API client and wire types.

mod client;
mod types;

pub use client::{GitHubClient, PAGE_SIZE};
pub use types::{Account, RepoRecord};
