//! Core data model for marquee.
//!
//! This crate defines the movie record and dataset types, the selected
//! feature list, the CSV dataset loader, and the feature combiner that
//! turns each record into a single text document for vectorization.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod combine;
pub mod error;
pub mod loader;
pub mod model;

pub use combine::{combine_features, combine_record};
pub use error::{Error, Result};
pub use loader::{load_dataset, load_from_reader};
pub use model::{Dataset, FeatureSet, Record, DEFAULT_FEATURES};
