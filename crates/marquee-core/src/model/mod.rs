pub mod dataset;
pub mod features;
pub mod record;

pub use dataset::Dataset;
pub use features::{FeatureSet, DEFAULT_FEATURES};
pub use record::Record;
