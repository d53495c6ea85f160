use std::io::Write;

use anyhow::{Context, Result};
use marquee_search::{QueryOptions, Recommendations};

use crate::commands::build_index;
use crate::config::Config;
use crate::render;

/// Write suggestions for one query to `out`, as a numbered list or as JSON.
pub async fn run_recommend<W: Write>(
    config: &Config,
    query: &str,
    options: QueryOptions,
    json: bool,
    mut out: W,
) -> Result<()> {
    let index = build_index(config).await?;
    write_outcome(index.recommend(query, &options), json, &mut out)
}

/// Render a query outcome. A failed query is written too (as JSON when
/// asked) and then returned as the command's error.
fn write_outcome<W: Write>(
    outcome: marquee_search::Result<Recommendations>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    match outcome {
        Ok(recs) if json => {
            let body = serde_json::to_string_pretty(&recs)
                .context("Failed to serialize suggestions")?;
            writeln!(out, "{body}")?;
            Ok(())
        }
        Ok(recs) => {
            writeln!(out, "{}", render::format_suggestions(&recs))?;
            Ok(())
        }
        Err(e) => {
            if json {
                writeln!(out, "{}", render::error_json(&e))?;
            }
            anyhow::bail!(render::describe_error(&e))
        }
    }
}
