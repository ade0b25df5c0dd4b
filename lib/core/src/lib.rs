//! # unimatch Core
//!
//! Core data model for the unimatch recommendation engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`Institution`] - An immutable institution record with passthrough details
//! - [`Dataset`] - The loaded set of institutions, with lookup, comparison and statistics
//! - [`QueryProfile`] - A student's per-request preferences
//! - [`Vocabulary`] - Sorted categorical values that fix the vector layout
//! - [`FeatureVector`] - Dense vector with dot product, norm and cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use unimatch_core::{Dataset, Institution, Vocabulary};
//!
//! let dataset = Dataset::new(vec![
//!     Institution::new(1, "Kathmandu Engineering College", "Kathmandu")
//!         .with_programs(["Computer Engineering"])
//!         .with_streams(["Science"])
//!         .with_min_gpa(2.8)
//!         .with_budget_range("medium"),
//! ])
//! .unwrap();
//!
//! let vocabulary = Vocabulary::build(dataset.institutions());
//! assert_eq!(vocabulary.dim(), 5);
//! ```

pub mod dataset;
pub mod error;
pub mod institution;
pub mod profile;
pub mod stats;
pub mod vector;
pub mod vocabulary;

pub use dataset::{CommonFeatures, Comparison, Dataset, Differences, MIN_COMPARE_IDS};
pub use error::{Error, Result};
pub use institution::Institution;
pub use profile::{QueryProfile, ANY_LOCATION};
pub use stats::DatasetStats;
pub use vector::FeatureVector;
pub use vocabulary::{Category, Vocabulary};

/// Round half away from zero to `places` decimal places
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
