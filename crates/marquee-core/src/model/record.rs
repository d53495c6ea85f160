use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single movie in the dataset.
///
/// `index` is the record's row in the similarity matrix. Text fields are
/// stored by name; a field that was blank in the source is stored as the
/// empty string rather than being left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub index: usize,
    pub title: String,

    /// Named text fields (genres, keywords, tagline, cast, director, ...).
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    #[must_use]
    pub fn new(index: usize, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value of a text field, or `None` when the record has no such field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new() {
        let record = Record::new(0, "Avatar");
        assert_eq!(record.index, 0);
        assert_eq!(record.title, "Avatar");
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_record_builder() {
        let record = Record::new(3, "Spectre")
            .with_field("genres", "Action Adventure Crime")
            .with_field("tagline", "");

        assert_eq!(record.field("genres"), Some("Action Adventure Crime"));
        assert_eq!(record.field("tagline"), Some(""));
        assert_eq!(record.field("director"), None);
    }

    #[test]
    fn test_record_serializes_fields() {
        let record = Record::new(1, "Up").with_field("director", "Pete Docter");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"director\":\"Pete Docter\""));

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
