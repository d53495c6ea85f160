//! CSV dataset loader.
//!
//! Reads a movie table with a header row. The table must have a `title`
//! column and one column per selected feature; an `index` column is used
//! when present, otherwise the row position becomes the index. Blank
//! cells in feature columns load as the empty string.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Dataset, FeatureSet, Record};

pub const INDEX_COLUMN: &str = "index";
pub const TITLE_COLUMN: &str = "title";

/// Load a dataset from a CSV file.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] if the file does not exist and
/// [`Error::Load`] for any parse or schema problem.
pub fn load_dataset(path: &Path, features: &FeatureSet) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::load(&path.display().to_string(), e.to_string()),
    })?;

    let dataset = load_from_reader(file, &path.display().to_string(), features)?;

    log::info!(
        "Loaded {} movies from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Load a dataset from any CSV byte stream.
///
/// `source_name` only labels error messages.
///
/// # Errors
///
/// Returns [`Error::Load`] if the header lacks a required column, a row
/// cannot be parsed, an index cell is not a non-negative integer, or the
/// indices are not unique and dense.
pub fn load_from_reader<R: Read>(
    reader: R,
    source_name: &str,
    features: &FeatureSet,
) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::load(source_name, e.to_string()))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let title_col = column(TITLE_COLUMN).ok_or_else(|| {
        Error::load(
            source_name,
            format!("missing required column '{TITLE_COLUMN}'"),
        )
    })?;
    let index_col = column(INDEX_COLUMN);
    if index_col.is_none() {
        log::debug!("No '{}' column in {}; using row positions", INDEX_COLUMN, source_name);
    }

    let feature_cols = features
        .iter()
        .map(|name| {
            column(name)
                .map(|col| (name, col))
                .ok_or_else(|| {
                    Error::load(source_name, format!("missing required column '{name}'"))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let row_data = result.map_err(|e| Error::load(source_name, e.to_string()))?;

        let index = match index_col {
            Some(col) => {
                let raw = row_data.get(col).unwrap_or_default().trim();
                raw.parse::<usize>().map_err(|_| {
                    Error::load(
                        source_name,
                        format!("row {}: invalid index '{raw}'", row + 1),
                    )
                })?
            }
            None => row,
        };

        let mut record = Record::new(index, row_data.get(title_col).unwrap_or_default());
        for (name, col) in &feature_cols {
            record.set_field(*name, row_data.get(*col).unwrap_or_default());
        }
        records.push(record);
    }

    Dataset::new(records).map_err(|e| match e {
        Error::InvalidData(message) => Error::load(source_name, message),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MOVIES: &str = "\
index,title,genres,keywords,tagline,cast,director
0,Iron Man,Action Science Fiction,superhero armor,Heroes aren't born. They're built.,Robert Downey Jr.,Jon Favreau
1,The Iron Giant,Animation Family,robot alien,,Vin Diesel,Brad Bird
";

    #[test]
    fn test_load_from_reader() {
        let dataset =
            load_from_reader(MOVIES.as_bytes(), "movies", &FeatureSet::default()).unwrap();
        assert_eq!(dataset.len(), 2);

        let giant = dataset.get(1).unwrap();
        assert_eq!(giant.title, "The Iron Giant");
        assert_eq!(giant.field("tagline"), Some(""));
        assert_eq!(giant.field("director"), Some("Brad Bird"));
    }

    #[test]
    fn test_missing_index_column_uses_row_position() {
        let csv = "title,genres\nHeat,Crime\nRonin,Thriller\n";
        let features: FeatureSet = "genres".parse().unwrap();
        let dataset = load_from_reader(csv.as_bytes(), "movies", &features).unwrap();
        assert_eq!(dataset.position_of_title("Ronin"), Some(1));
    }

    #[test]
    fn test_missing_feature_column_is_load_error() {
        let csv = "index,title,genres\n0,Heat,Crime\n";
        let err = load_from_reader(csv.as_bytes(), "movies", &FeatureSet::default()).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert!(err.to_string().contains("keywords"));
    }

    #[test]
    fn test_bad_index_is_load_error() {
        let csv = "index,title,genres\nzero,Heat,Crime\n";
        let features: FeatureSet = "genres".parse().unwrap();
        let err = load_from_reader(csv.as_bytes(), "movies", &features).unwrap_err();
        assert!(err.to_string().contains("invalid index 'zero'"));
    }

    #[test]
    fn test_sparse_index_is_load_error() {
        let csv = "index,title,genres\n0,Heat,Crime\n5,Ronin,Thriller\n";
        let features: FeatureSet = "genres".parse().unwrap();
        let err = load_from_reader(csv.as_bytes(), "movies", &features).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_ragged_row_is_load_error() {
        let csv = "index,title,genres\n0,Heat\n";
        let features: FeatureSet = "genres".parse().unwrap();
        let err = load_from_reader(csv.as_bytes(), "movies", &features).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MOVIES.as_bytes()).unwrap();

        let dataset = load_dataset(file.path(), &FeatureSet::default()).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");

        let err = load_dataset(&path, &FeatureSet::default()).unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn test_unreadable_source_is_load_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_dataset(dir.path(), &FeatureSet::default()).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
        assert_eq!(err.kind(), "load");
    }
}
