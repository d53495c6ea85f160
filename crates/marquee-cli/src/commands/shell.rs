use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use marquee_core::Dataset;
use marquee_search::{IndexHandle, QueryOptions};

use crate::commands::{build_index, load_movies};
use crate::config::Config;
use crate::render;

const PROMPT: &str = "Enter your favourite movie name: ";
const RELOAD: &str = ":reload";

/// Build the index once, then answer titles typed at the prompt until a
/// blank line or end of input.
///
/// Typing `:reload` re-reads the dataset and swaps in a new index if the
/// file changed.
pub async fn run_shell(config: &Config, options: QueryOptions) -> Result<()> {
    let handle = IndexHandle::new(build_index(config).await?);
    println!(
        "Indexed {} movies. Enter a blank line to quit, {} to re-read {}.",
        handle.snapshot().dataset().len(),
        RELOAD,
        config.data_path.display()
    );

    let reload = || load_movies(&config.data_path, &config.features);
    let stdin = io::stdin();
    serve(&handle, reload, &options, stdin.lock(), io::stdout())
}

/// The prompt loop, over any input and output.
pub fn serve<R, W, F>(
    handle: &IndexHandle,
    reload: F,
    options: &QueryOptions,
    mut input: R,
    mut output: W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: Fn() -> Result<Dataset>,
{
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read query")? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            break;
        }

        if query == RELOAD {
            let message = match reload().and_then(|dataset| Ok(handle.refresh(dataset)?)) {
                Ok(true) => "Dataset reloaded.".to_string(),
                Ok(false) => "Dataset unchanged.".to_string(),
                Err(e) => format!("Reload failed: {e:#}"),
            };
            writeln!(output, "{message}\n")?;
            continue;
        }

        match handle.recommend(query, options) {
            Ok(recs) => writeln!(output, "{}\n", render::format_suggestions(&recs))?,
            Err(e) => writeln!(output, "{}\n", render::describe_error(&e))?,
        }
    }

    Ok(())
}
