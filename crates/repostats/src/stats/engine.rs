//! Aggregation engine: pagination, accumulation, finalization.
//!
//! The run is fail-fast at the listing level: any page fetch that does not
//! succeed aborts the whole run and no partial result is returned. A failed
//! language fetch for a single repository is fail-soft: its contribution is
//! omitted and the run continues.

use std::sync::Arc;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tokio::sync::Semaphore;

use crate::error::Result;
use crate::github::{GitHubClient, PAGE_SIZE, RepoRecord};

use super::accumulator::RepoTotals;
use super::format::{UnitSystem, format_size};
use super::languages::LanguageTally;

/// Default number of concurrent language fetches per page.
///
/// Language fetches for repositories on a completed page are independent, and
/// the tally merge is commutative, so they can run concurrently. Kept modest
/// to stay clear of secondary rate limits.
pub const DEFAULT_LANGUAGE_CONCURRENCY: usize = 8;

/// Options for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Include forked repositories in the totals.
    pub include_forks: bool,
    /// Unit system for the average-size string.
    pub unit_system: UnitSystem,
    /// Maximum concurrent language fetches.
    pub language_concurrency: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            include_forks: true,
            unit_system: UnitSystem::Binary,
            language_concurrency: DEFAULT_LANGUAGE_CONCURRENCY,
        }
    }
}

/// The finished statistics record for one account.
///
/// Constructed exactly once, after pagination completes; never mutated
/// afterwards. Serializes to the wire envelope:
/// `{"repoCount": ..., "stargazers": ..., "forks": ..., "avgRepoSize": "...",
/// "languages": {...}}` with languages as an ordered map, descending by byte
/// count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    /// Repositories counted (after the fork filter).
    pub repo_count: u64,
    /// Total stargazers across those repositories.
    pub stargazers: u64,
    /// Total forks across those repositories.
    pub forks: u64,
    /// Human-readable average repository size, e.g. `"2.000 MB"`.
    pub avg_repo_size: String,
    /// Cumulative language byte counts, descending, first-seen tie-break.
    #[serde(serialize_with = "serialize_languages")]
    pub languages: Vec<(String, u64)>,
}

fn serialize_languages<S: Serializer>(
    languages: &[(String, u64)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(languages.len()))?;
    for (language, bytes) in languages {
        map.serialize_entry(language, bytes)?;
    }
    map.end()
}

/// Aggregate statistics for every repository owned by `username`.
///
/// Resolves the account, then walks the repository listing one page at a
/// time. A page with fewer than [`PAGE_SIZE`] items (including an empty one)
/// is the last page. All language fetches for repositories already read
/// complete before the result is finalized.
pub async fn aggregate_user_stats(
    client: &GitHubClient,
    username: &str,
    options: &AggregateOptions,
) -> Result<AggregateResult> {
    let account = client.resolve_account(username).await?;

    let mut totals = RepoTotals::default();
    let mut tally = LanguageTally::new();
    let mut page = 1u32;

    loop {
        let repos = client.fetch_repo_page(&account.repos_url, page).await?;
        let page_len = repos.len();

        let kept: Vec<RepoRecord> = repos
            .into_iter()
            .filter(|repo| options.include_forks || !repo.fork)
            .collect();

        for repo in &kept {
            totals.record(repo);
        }

        merge_page_languages(
            client,
            &kept,
            options.language_concurrency.max(1),
            &mut tally,
        )
        .await;

        tracing::debug!(
            username,
            page,
            page_len,
            kept = kept.len(),
            "processed repository page"
        );

        if page_len < PAGE_SIZE {
            break;
        }
        page += 1;
    }

    Ok(AggregateResult {
        repo_count: totals.repo_count,
        stargazers: totals.stargazers,
        forks: totals.forks,
        avg_repo_size: format_size(totals.average_size_kib(), options.unit_system),
        languages: tally.into_sorted(),
    })
}

/// Fetch language maps for one page of repositories and merge them.
///
/// Fetches run with bounded concurrency, but results are merged in listing
/// order so the first-seen tie-break stays deterministic. A failed fetch for
/// a single repository is logged and its contribution omitted.
async fn merge_page_languages(
    client: &GitHubClient,
    repos: &[RepoRecord],
    concurrency: usize,
    tally: &mut LanguageTally,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(repos.len());

    for repo in repos {
        let task_semaphore = Arc::clone(&semaphore);
        let task_client = client.clone();
        let name = repo.name.clone();
        let url = repo.languages_url.clone();

        handles.push(tokio::spawn(async move {
            let _permit = task_semaphore.acquire().await.ok()?;
            match task_client.fetch_languages(&url).await {
                Ok(languages) => Some(languages),
                Err(e) => {
                    tracing::debug!(repo = %name, error = %e, "language fetch failed, omitting contribution");
                    None
                }
            }
        }));
    }

    for handle in handles {
        if let Ok(Some(languages)) = handle.await {
            tally.merge(languages);
        }
    }
}
