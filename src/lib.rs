//! # unimatch
//!
//! A content-based recommender that ranks higher-education institutions
//! against a student's profile and explains every result.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! unimatch --dataset ./data/colleges.json --http-port 5001
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use unimatch::prelude::*;
//!
//! let dataset = Dataset::load("./data/colleges.json").unwrap();
//! let recommender = Recommender::new(Arc::new(dataset), EngineConfig::default()).unwrap();
//!
//! let profile = QueryProfile::new("Science", 3.4, "Computer Engineering", "Kathmandu", "medium")
//!     .with_top_n(3);
//! for result in recommender.recommend(&profile) {
//!     println!("{} ({:.3}): {}", result.institution.name, result.combined_score, result.explanation);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `unimatch-core` - Institutions, query profiles, vocabulary, feature vectors, dataset operations
//! - `unimatch-similarity` - Engine config, vectorizer, eligibility filter, scoring and explanations
//! - `unimatch-api` - REST API and feedback store

// Re-export core types
pub use unimatch_core::{
    Category, Comparison, Dataset, DatasetStats, Error, FeatureVector, Institution, QueryProfile, Result,
    Vocabulary,
};

// Re-export the engine
pub use unimatch_similarity::{
    EngineConfig, FeatureMatches, FeatureWeights, Recommendation, RecommendationSummary, Recommender,
    RecommenderBuilder, TextMatcher, Vectorizer,
};

// Re-export API
pub use unimatch_api::{AppState, FeedbackStore, InMemoryFeedbackStore, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Dataset, EngineConfig, Error, FeatureMatches, Institution, QueryProfile, Recommendation, Recommender,
        RecommenderBuilder, Result,
    };
}
