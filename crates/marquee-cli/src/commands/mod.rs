pub mod config;
pub mod recommend;
pub mod serve;
pub mod shell;
pub mod stats;

pub use recommend::run_recommend;
pub use serve::run_serve;
pub use shell::run_shell;
pub use stats::show_stats;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use marquee_core::{load_dataset, Dataset, FeatureSet};
use marquee_search::RecommendationIndex;

use crate::config::Config;

/// Load the configured dataset.
pub fn load_movies(data_path: &Path, features: &FeatureSet) -> Result<Dataset> {
    load_dataset(data_path, features)
        .with_context(|| format!("Failed to load movies from {}", data_path.display()))
}

/// Load and index the configured dataset on a blocking thread, giving up
/// after `build_timeout_secs`.
pub async fn build_index(config: &Config) -> Result<RecommendationIndex> {
    let data_path = config.data_path.clone();
    let features = config.features.clone();
    let limit = Duration::from_secs(config.build_timeout_secs);
    log::debug!(
        "Indexing {} on features [{}] (timeout {:?})",
        data_path.display(),
        features,
        limit
    );

    let task = tokio::task::spawn_blocking(move || -> Result<RecommendationIndex> {
        let dataset = load_movies(&data_path, &features)?;
        RecommendationIndex::build(dataset, features).context("Failed to build similarity index")
    });

    match tokio::time::timeout(limit, task).await {
        Ok(joined) => joined.context("Index build task failed")?,
        Err(_) => anyhow::bail!(
            "Building the similarity index took longer than {}s (raise build_timeout_secs)",
            config.build_timeout_secs
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_search::QueryOptions;
    use tempfile::TempDir;

    const MOVIES: &str = "\
index,title,genres,keywords,tagline,cast,director
0,Heat,Crime Thriller,heist detective,A Los Angeles crime saga,Al Pacino,Michael Mann
1,Collateral,Crime Thriller,taxi hitman,It started like any other night,Tom Cruise,Michael Mann
2,Up,Animation Family,balloon old man,,Ed Asner,Pete Docter
";

    fn config_for(dir: &TempDir) -> Config {
        let data_path = dir.path().join("movies.csv");
        std::fs::write(&data_path, MOVIES).unwrap();
        Config {
            data_path,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_build_index_from_config() {
        let dir = TempDir::new().unwrap();
        let index = build_index(&config_for(&dir)).await.unwrap();
        assert_eq!(index.dataset().len(), 3);

        let recs = index.recommend("heat", &QueryOptions::default()).unwrap();
        assert_eq!(recs.titles()[..2], ["Heat", "Collateral"]);
    }

    #[tokio::test]
    async fn test_build_index_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_path: dir.path().join("absent.csv"),
            ..Config::default()
        };
        let err = build_index(&config).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load movies"));
        assert!(format!("{err:#}").contains("data source not found"));
    }

    #[tokio::test]
    async fn test_build_index_gives_up_after_timeout() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("movies.csv");
        let mut csv = String::from("index,title,genres,keywords,tagline,cast,director\n");
        for i in 0..3000 {
            csv.push_str(&format!(
                "{i},Movie {i},Drama genre{g},keyword{k} plot{i},Tagline {i},Actor{a},Dir{d}\n",
                g = i % 17,
                k = i % 101,
                a = i % 211,
                d = i % 53,
            ));
        }
        std::fs::write(&data_path, csv).unwrap();

        let config = Config {
            data_path,
            build_timeout_secs: 0,
            ..Config::default()
        };
        let err = build_index(&config).await.unwrap_err();
        assert!(err.to_string().contains("took longer than 0s"));
    }
}
