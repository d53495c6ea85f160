//! Feature combiner: one space-joined string per record.

use crate::error::{Error, Result};
use crate::model::{Dataset, FeatureSet, Record};

/// Join the selected fields of one record with single spaces, in feature
/// order. Blank fields still contribute their separator, so a record with
/// five blank fields yields four spaces.
///
/// # Errors
///
/// Returns [`Error::FieldNotFound`] if the record lacks a selected field.
pub fn combine_record(record: &Record, features: &FeatureSet) -> Result<String> {
    let parts = features
        .iter()
        .map(|name| {
            record.field(name).ok_or_else(|| Error::FieldNotFound {
                field: name.to_string(),
                index: record.index,
            })
        })
        .collect::<Result<Vec<&str>>>()?;

    Ok(parts.join(" "))
}

/// Combined feature strings for every record, in index order.
///
/// # Errors
///
/// Returns [`Error::FieldNotFound`] for the first record missing a
/// selected field.
pub fn combine_features(dataset: &Dataset, features: &FeatureSet) -> Result<Vec<String>> {
    dataset
        .records()
        .iter()
        .map(|record| combine_record(record, features))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(index: usize, title: &str) -> Record {
        Record::new(index, title)
            .with_field("genres", "Action")
            .with_field("keywords", "armor")
            .with_field("tagline", "Built")
            .with_field("cast", "Robert")
            .with_field("director", "Jon")
    }

    #[test]
    fn test_combine_record_in_feature_order() {
        let combined = combine_record(&full(0, "Iron Man"), &FeatureSet::default()).unwrap();
        assert_eq!(combined, "Action armor Built Robert Jon");

        let reordered: FeatureSet = "director,genres".parse().unwrap();
        let combined = combine_record(&full(0, "Iron Man"), &reordered).unwrap();
        assert_eq!(combined, "Jon Action");
    }

    #[test]
    fn test_all_blank_fields_yield_separators() {
        let mut record = Record::new(0, "Untitled");
        for name in FeatureSet::default().iter() {
            record.set_field(name, "");
        }
        let combined = combine_record(&record, &FeatureSet::default()).unwrap();
        assert_eq!(combined, "    ");
    }

    #[test]
    fn test_missing_field_is_reported() {
        let record = Record::new(7, "Heat").with_field("genres", "Crime");
        let err = combine_record(&record, &FeatureSet::default()).unwrap_err();
        match err {
            Error::FieldNotFound { field, index } => {
                assert_eq!(field, "keywords");
                assert_eq!(index, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_combine_features_follows_index_order() {
        let dataset = Dataset::new(vec![full(1, "B"), full(0, "A")]).unwrap();
        let combined = combine_features(&dataset, &"genres".parse().unwrap()).unwrap();
        assert_eq!(combined, ["Action", "Action"]);
        assert_eq!(combined.len(), dataset.len());
    }
}
