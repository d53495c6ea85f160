//! Flattening query outcomes into text for the terminal.

use marquee_search::{Error, Recommendations};
use serde_json::json;

/// Numbered suggestion list, preceded by a note when the query was
/// resolved to a differently spelled title.
pub fn format_suggestions(recs: &Recommendations) -> String {
    let mut lines = Vec::new();

    if !recs.matched.title.eq_ignore_ascii_case(recs.query.trim()) {
        lines.push(format!("Showing results for '{}'", recs.matched.title));
        if !recs.alternatives.is_empty() {
            let others: Vec<&str> = recs.alternatives.iter().map(|c| c.title.as_str()).collect();
            lines.push(format!("Other close matches: {}", others.join(", ")));
        }
        lines.push(String::new());
    }

    lines.push("Movies suggested for you:".to_string());
    lines.push(String::new());
    for (rank, suggestion) in recs.suggestions.iter().enumerate() {
        lines.push(format!("{}. {}", rank + 1, suggestion.title));
    }

    lines.join("\n")
}

/// One-line, user-facing description of a failed query.
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::NoMatchFound { query } => {
            format!("No close match found for '{query}'. Check the spelling and try again.")
        }
        Error::IndexNotFound { title } => {
            format!("'{title}' matched, but no record in the dataset carries that title.")
        }
        Error::IndexOutOfRange { .. } => {
            format!("The similarity index is out of date with the dataset ({error}).")
        }
        other => other.to_string(),
    }
}

/// JSON body for a failed query.
pub fn error_json(error: &Error) -> serde_json::Value {
    json!({
        "error": error.kind(),
        "message": describe_error(error),
    })
}
