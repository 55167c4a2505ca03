//! Repostats CLI - aggregate repository statistics for a GitHub account.

mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use repostats::http::ReqwestTransport;
use repostats::{AggregateOptions, GitHubClient, StatsError, UnitSystem, aggregate_user_stats};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "repostats")]
#[command(version)]
#[command(about = "Aggregate repository statistics for a GitHub account")]
#[command(
    long_about = "Repostats fetches every repository owned by a GitHub account and prints \
aggregate statistics as JSON: repository count, total stargazers, total \
forks, average repository size, and a byte-weighted language breakdown."
)]
#[command(after_long_help = r#"EXAMPLES
    Stats for a user, forks included:
        $ repostats octocat

    Exclude forks and use SI units:
        $ repostats octocat --no-forks --units si

CONFIGURATION
    Repostats reads configuration from:
      1. ~/.config/repostats/config.toml (or $XDG_CONFIG_HOME/repostats/config.toml)
      2. ./repostats.toml
      3. Environment variables (REPOSTATS_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    REPOSTATS_GITHUB_TOKEN    GitHub personal access token (required)
"#)]
struct Cli {
    /// Username of the target GitHub account
    username: String,

    /// Exclude forked repositories from the totals
    #[arg(short = 'F', long)]
    no_forks: bool,

    /// Unit system for the average repository size (default from config or binary)
    #[arg(short, long, value_enum)]
    units: Option<Units>,

    /// Maximum concurrent language fetches (default from config or 8)
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout_secs: u64,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Units {
    /// Powers of 1024
    Binary,
    /// Powers of 1000
    Si,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Binary => UnitSystem::Binary,
            Units::Si => UnitSystem::Si,
        }
    }
}

/// Exit codes distinguishing the failure kinds for scripting callers.
fn exit_code(err: &StatsError) -> i32 {
    match err {
        StatsError::NotFound { .. } => 2,
        StatsError::Upstream { .. } => 3,
        StatsError::Internal { .. } => 1,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("repostats=info,repostats_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::load();
    let cli = Cli::parse();

    let Some(token) = config.github_token() else {
        eprintln!(
            "error: no GitHub token configured; set REPOSTATS_GITHUB_TOKEN or add \
             [github] token to the config file"
        );
        std::process::exit(1);
    };

    let transport = Arc::new(ReqwestTransport::with_timeout(Duration::from_secs(
        cli.timeout_secs,
    ))?);
    let client = GitHubClient::new(transport, token);

    let options = AggregateOptions {
        include_forks: !cli.no_forks && config.stats.include_forks,
        unit_system: cli
            .units
            .map(UnitSystem::from)
            .or(config.stats.units)
            .unwrap_or_default(),
        language_concurrency: cli.concurrency.unwrap_or(config.stats.concurrency),
    };

    match aggregate_user_stats(&client, &cli.username, &options).await {
        Ok(stats) => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&stats)?
            } else {
                serde_json::to_string(&stats)?
            };
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(exit_code(&err));
        }
    }
}
