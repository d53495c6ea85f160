use anyhow::{Context, Result};
use clap::Parser;
use marquee_core::FeatureSet;
use std::path::PathBuf;

mod commands;
mod config;
mod render;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the movie CSV (default: movies.csv, or data_path from config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Comma-separated text fields to compare
    /// (default: genres,keywords,tagline,cast,director)
    #[arg(long, global = true)]
    features: Option<FeatureSet>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Suggest movies similar to a title
    ///
    /// The title is matched loosely against the dataset, so small typos and
    /// different capitalization are fine. Movies are compared by the words in
    /// their genres, keywords, tagline, cast, and director (or the fields
    /// given with --features), weighted by TF-IDF and scored by cosine
    /// similarity.
    ///
    /// Output:
    /// - A numbered list of suggestions, most similar first
    /// - The matched movie itself leads the list unless --exclude-query is set
    /// - A note naming the matched title when it differs from what was typed
    Recommend {
        /// Movie title (quotes optional)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Leave the matched movie out of the suggestions
        #[arg(long)]
        exclude_query: bool,

        /// Print suggestions (or the error) as JSON
        #[arg(long)]
        json: bool,
    },
    /// Prompt for titles repeatedly against one index build
    Shell {
        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Serve suggestions over HTTP
    ///
    /// Routes:
    /// - GET /recommend?title=..&limit=..&exclude_query=true
    /// - POST /reload re-reads the dataset and swaps in a new index
    /// - GET /health
    Serve {
        /// Address to listen on (default: 127.0.0.1, or host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: 8080, or port from config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show dataset and index statistics
    Stats,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults if missing
    Init,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
    let result = runtime.block_on(run(cli));
    // A timed-out index build may still be running; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Config { action: ConfigAction::Path } => {
            return commands::config::show_config_path();
        }
        Commands::Config { action: ConfigAction::Init } => {
            return commands::config::init_config();
        }
        _ => {}
    }

    let config = Config::load_with_overrides(cli.data, cli.features)?;

    match cli.command {
        Commands::Recommend {
            title,
            limit,
            exclude_query,
            json,
        } => {
            let query = title.join(" ");
            let mut options = config.query_options().with_include_query(!exclude_query);
            if let Some(limit) = limit {
                options = options.with_limit(limit);
            }
            commands::run_recommend(&config, &query, options, json, std::io::stdout()).await?;
        }
        Commands::Shell { limit } => {
            let mut options = config.query_options();
            if let Some(limit) = limit {
                options = options.with_limit(limit);
            }
            commands::run_shell(&config, options).await?;
        }
        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            commands::run_serve(config).await?;
        }
        Commands::Stats => {
            commands::show_stats(&config).await?;
        }
        Commands::Config { .. } => {
            commands::config::show_config(&config)?;
        }
    }

    Ok(())
}
