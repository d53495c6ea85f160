use anyhow::Result;

use crate::commands::build_index;
use crate::config::Config;

/// Show dataset and index statistics.
pub async fn show_stats(config: &Config) -> Result<()> {
    let index = build_index(config).await?;

    println!("\n🎬 Marquee Index\n");
    println!("  Dataset: {}", config.data_path.display());
    println!("  Movies: {}", index.dataset().len());
    println!("  Features: {}", index.features());
    println!("  Vocabulary: {} terms", index.vocabulary_size());
    println!("  Fingerprint: {:016x}", index.fingerprint());
    println!("  Build time: {:.2?}", index.build_time());

    Ok(())
}
