use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Text fields combined for similarity when nothing else is configured.
pub const DEFAULT_FEATURES: [&str; 5] = ["genres", "keywords", "tagline", "cast", "director"];

/// Ordered list of text field names used to build each record's
/// combined feature string.
///
/// Order matters: fields are joined in exactly this order. A feature set
/// is never empty and never names the same field twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSet(Vec<String>);

impl FeatureSet {
    /// Build a feature set from field names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if the list is empty, a name is blank,
    /// or a name appears twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if name.is_empty() {
                return Err(Error::InvalidData("feature name cannot be blank".into()));
            }
            if fields.contains(&name) {
                return Err(Error::InvalidData(format!(
                    "feature '{name}' listed more than once"
                )));
            }
            fields.push(name);
        }

        if fields.is_empty() {
            return Err(Error::InvalidData(
                "at least one feature field is required".into(),
            ));
        }

        Ok(Self(fields))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self(DEFAULT_FEATURES.iter().map(|f| (*f).to_string()).collect())
    }
}

impl FromStr for FeatureSet {
    type Err = Error;

    /// Parse a comma-separated list such as `genres,cast,director`.
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split(','))
    }
}

impl TryFrom<Vec<String>> for FeatureSet {
    type Error = Error;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<FeatureSet> for Vec<String> {
    fn from(features: FeatureSet) -> Self {
        features.0
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_features_order() {
        let features = FeatureSet::default();
        let names: Vec<&str> = features.iter().collect();
        assert_eq!(names, DEFAULT_FEATURES);
    }

    #[test]
    fn test_parse_comma_list() {
        let features: FeatureSet = "genres, cast ,director".parse().unwrap();
        assert_eq!(features.as_slice(), ["genres", "cast", "director"]);
        assert_eq!(features.to_string(), "genres,cast,director");
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(FeatureSet::new(Vec::<String>::new()).is_err());
        assert!("genres,,cast".parse::<FeatureSet>().is_err());
        assert!("cast,cast".parse::<FeatureSet>().is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: FeatureSet = serde_json::from_str(r#"["genres","keywords"]"#).unwrap();
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<FeatureSet>("[]");
        assert!(bad.is_err());
    }
}
