use anyhow::{Context, Result};
use confyg::{env, Confygery};
use marquee_core::FeatureSet;
use marquee_search::{QueryOptions, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for marquee.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (MARQUEE_* prefix)
/// 3. Config file (~/.config/marquee/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the movie metadata CSV.
    ///
    /// Can be set via:
    /// - CLI: --data /path/to/movies.csv
    /// - ENV: MARQUEE_DATA_PATH
    /// - Config: data_path = "/path/to/movies.csv"
    /// - Default: movies.csv in the working directory
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Text fields combined for similarity, in order.
    #[serde(default)]
    pub features: FeatureSet,

    /// Number of suggestions per query.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Minimum title similarity for a query to match (0.0 - 1.0).
    #[serde(default = "default_match_cutoff")]
    pub match_cutoff: f64,

    /// Upper bound on loading and indexing the dataset, in seconds.
    #[serde(default = "default_build_timeout_secs")]
    pub build_timeout_secs: u64,

    /// Address `marquee serve` listens on.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            features: FeatureSet::default(),
            limit: default_limit(),
            match_cutoff: default_match_cutoff(),
            build_timeout_secs: default_build_timeout_secs(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/marquee/config.toml
    /// Reads environment variables with MARQUEE_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("marquee");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, then apply command-line overrides.
    pub fn load_with_overrides(
        data_path: Option<PathBuf>,
        features: Option<FeatureSet>,
    ) -> Result<Self> {
        Ok(Self::load()?.with_overrides(data_path, features))
    }

    #[must_use]
    pub fn with_overrides(
        mut self,
        data_path: Option<PathBuf>,
        features: Option<FeatureSet>,
    ) -> Self {
        if let Some(path) = data_path {
            self.data_path = path;
        }
        if let Some(features) = features {
            self.features = features;
        }
        self
    }

    /// Query options derived from this configuration.
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions::default()
            .with_limit(self.limit)
            .with_cutoff(self.match_cutoff)
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("movies.csv")
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_match_cutoff() -> f64 {
    0.6
}

fn default_build_timeout_secs() -> u64 {
    120
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/marquee/config.toml
/// - macOS: ~/Library/Application Support/marquee/config.toml
/// - Windows: %APPDATA%\marquee\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Marquee Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (MARQUEE_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Movie metadata CSV. Needs a `title` column and one column per feature;
# an `index` column is used when present.
#
# Can also be set via:
# - CLI: marquee --data /path/to/movies.csv recommend Avatar
# - Environment: MARQUEE_DATA_PATH=/path/to/movies.csv
data_path = "movies.csv"

# Text fields compared between movies, joined in this order.
features = ["genres", "keywords", "tagline", "cast", "director"]

# Suggestions per query
limit = 30

# How close a typed title must be to a known one (0.0 - 1.0)
match_cutoff = 0.6

# Give up on loading and indexing the dataset after this many seconds
build_timeout_secs = 120

# Where `marquee serve` listens
host = "127.0.0.1"
port = 8080
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}
