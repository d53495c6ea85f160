use anyhow::{Context, Result};

use crate::config::{self, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  data_path: {}", config.data_path.display());
    println!("  features: {}", config.features);
    println!("  limit: {}", config.limit);
    println!("  match_cutoff: {}", config.match_cutoff);
    println!("  build_timeout_secs: {}", config.build_timeout_secs);

    println!("\nPriority: CLI args > ENV vars (MARQUEE_*) > Config file > Defaults");

    Ok(())
}

/// Print the config file location.
pub fn show_config_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Write the example config file if none exists yet.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file().context("Failed to initialize config")?;
    let path = config::config_file_path();

    if created {
        println!("Created config file: {}", path.display());
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}
