//! Aggregation of per-repository records into account-level statistics.

mod accumulator;
mod engine;
mod format;
mod languages;

pub use accumulator::RepoTotals;
pub use engine::{
    AggregateOptions, AggregateResult, DEFAULT_LANGUAGE_CONCURRENCY, aggregate_user_stats,
};
pub use format::{UnitSystem, format_size};
pub use languages::LanguageTally;
