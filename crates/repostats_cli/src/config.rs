//! Configuration file support for repostats.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `REPOSTATS_`, e.g.,
//!    `REPOSTATS_GITHUB_TOKEN`)
//! 3. Config file (~/.config/repostats/config.toml or ./repostats.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use REPOSTATS_GITHUB_TOKEN env var
//!
//! [stats]
//! include_forks = true
//! units = "BINARY"       # or "SI"
//! concurrency = 8
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use repostats::stats::DEFAULT_LANGUAGE_CONCURRENCY;
use repostats::UnitSystem;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Default aggregation options.
    pub stats: StatsConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via REPOSTATS_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

/// Default aggregation options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Include forked repositories in the totals.
    pub include_forks: bool,
    /// Unit system for the average repository size.
    pub units: Option<UnitSystem>,
    /// Maximum concurrent language fetches.
    pub concurrency: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            include_forks: true,
            units: None,
            concurrency: DEFAULT_LANGUAGE_CONCURRENCY,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/repostats/config.toml)
    /// 3. Local config file (./repostats.toml)
    /// 4. Environment variables with REPOSTATS_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "repostats") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("repostats.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./repostats.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("REPOSTATS")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub token.
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert!(config.stats.include_forks);
        assert!(config.stats.units.is_none());
        assert_eq!(config.stats.concurrency, DEFAULT_LANGUAGE_CONCURRENCY);
    }

    #[test]
    fn test_config_builder_with_toml_string() {
        let toml_content = r#"
            [github]
            token = "ghp_test123"

            [stats]
            include_forks = false
            units = "SI"
            concurrency = 4
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.github_token(), Some("ghp_test123".to_string()));
        assert!(!config.stats.include_forks);
        assert_eq!(config.stats.units, Some(UnitSystem::Si));
        assert_eq!(config.stats.concurrency, 4);
    }

    #[test]
    fn test_config_builder_partial_override() {
        let toml_content = r#"
            [stats]
            concurrency = 2
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.stats.concurrency, 2);
        // Other values should be defaults
        assert!(config.stats.include_forks);
        assert!(config.github.token.is_none());
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let toml_content = r#"
            [stats]
            include_forks = true
            unknown_field = "should be ignored"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();
        assert!(config.stats.include_forks);
    }

    #[test]
    fn test_config_invalid_toml() {
        let invalid_toml = r#"
            [stats
            include_forks = true
        "#;

        let result = ConfigBuilder::builder()
            .add_source(config::File::from_str(invalid_toml, FileFormat::Toml))
            .build();

        assert!(result.is_err());
    }
}
