use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::model::{FeatureSet, Record};

/// An ordered, validated collection of movie records.
///
/// Records are held in index order and `records()[i].index == i` for every
/// `i`, so a record's index can be used to address the similarity matrix
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, sorting records by index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if indices are duplicated or do not
    /// cover `0..len` without gaps.
    pub fn new(mut records: Vec<Record>) -> Result<Self> {
        records.sort_by_key(|r| r.index);

        for (position, record) in records.iter().enumerate() {
            if record.index != position {
                let problem = if record.index < position {
                    "is duplicated"
                } else {
                    "leaves a gap"
                };
                return Err(Error::InvalidData(format!(
                    "record index {} {problem}; indices must be unique and cover 0..{}",
                    record.index,
                    records.len()
                )));
            }
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.get(index).map(|r| r.title.as_str())
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.title.as_str())
    }

    /// Index of the first record (in index order) with exactly this title.
    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        self.records
            .iter()
            .find(|r| r.title == title)
            .map(|r| r.index)
    }

    /// Hash identifying this dataset snapshot together with the feature
    /// selection it will be combined with.
    ///
    /// Stable within a process; not meant to be persisted.
    pub fn fingerprint(&self, features: &FeatureSet) -> u64 {
        let mut hasher = DefaultHasher::new();
        features.hash(&mut hasher);
        self.records.len().hash(&mut hasher);
        for record in &self.records {
            record.index.hash(&mut hasher);
            record.title.hash(&mut hasher);
            for name in features.iter() {
                record.field(name).hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new(1, "Iron Giant").with_field("genres", "Animation"),
            Record::new(0, "Iron Man").with_field("genres", "Action"),
            Record::new(2, "Cinderella").with_field("genres", "Fantasy"),
        ]
    }

    #[test]
    fn test_dataset_sorts_by_index() {
        let dataset = Dataset::new(sample()).unwrap();
        let titles: Vec<&str> = dataset.titles().collect();
        assert_eq!(titles, ["Iron Man", "Iron Giant", "Cinderella"]);
        assert_eq!(dataset.title(2), Some("Cinderella"));
    }

    #[test]
    fn test_dataset_rejects_duplicate_index() {
        let records = vec![Record::new(0, "A"), Record::new(0, "B")];
        let err = Dataset::new(records).unwrap_err();
        assert!(err.to_string().contains("duplicated"));
    }

    #[test]
    fn test_dataset_rejects_gap() {
        let records = vec![Record::new(0, "A"), Record::new(2, "B")];
        let err = Dataset::new(records).unwrap_err();
        assert!(err.to_string().contains("gap"));
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        let dataset = Dataset::new(Vec::new()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_position_of_title_picks_first() {
        let records = vec![
            Record::new(0, "Heat"),
            Record::new(1, "Heat"),
            Record::new(2, "Ronin"),
        ];
        let dataset = Dataset::new(records).unwrap();
        assert_eq!(dataset.position_of_title("Heat"), Some(0));
        assert_eq!(dataset.position_of_title("Ronin"), Some(2));
        assert_eq!(dataset.position_of_title("heat"), None);
    }

    #[test]
    fn test_fingerprint_tracks_content_and_features() {
        let features = FeatureSet::default();
        let a = Dataset::new(sample()).unwrap();
        let b = Dataset::new(sample()).unwrap();
        assert_eq!(a.fingerprint(&features), b.fingerprint(&features));

        let mut changed = sample();
        changed[0].set_field("genres", "Animation Family");
        let c = Dataset::new(changed).unwrap();
        assert_ne!(a.fingerprint(&features), c.fingerprint(&features));

        let genres_only: FeatureSet = "genres".parse().unwrap();
        assert_ne!(a.fingerprint(&features), a.fingerprint(&genres_only));
    }
}
