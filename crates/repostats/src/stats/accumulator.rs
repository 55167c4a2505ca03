//! Running totals over repository records.

use crate::github::RepoRecord;

/// Running totals for one aggregation run.
///
/// Pure accumulation: every field only ever grows, and recording repositories
/// in any order yields the same totals.
#[derive(Debug, Default)]
pub struct RepoTotals {
    /// Repositories that passed the fork filter.
    pub repo_count: u64,
    /// Sum of repository sizes in KiB over those repositories.
    pub total_size_kib: u64,
    /// Total stargazers.
    pub stargazers: u64,
    /// Total forks.
    pub forks: u64,
}

impl RepoTotals {
    /// Fold one repository record into the totals.
    ///
    /// Called once per repository that passed the fork filter.
    pub fn record(&mut self, repo: &RepoRecord) {
        self.repo_count += 1;
        self.total_size_kib += repo.size;
        self.stargazers += repo.stargazers_count;
        self.forks += repo.forks_count;
    }

    /// Average repository size in KiB.
    ///
    /// The denominator is clamped to 1 so an empty account averages to 0
    /// instead of faulting.
    #[must_use]
    pub fn average_size_kib(&self) -> f64 {
        self.total_size_kib as f64 / self.repo_count.max(1) as f64
    }
}
