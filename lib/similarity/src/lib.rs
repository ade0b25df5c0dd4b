//! # UniMatch Similarity
//!
//! The scoring engine behind institution recommendations.
//!
//! ## Features
//!
//! - **Engine Config**: Per-category weights, confidence bonuses and boost factors
//! - **Vectorizer**: Vocabulary-aligned one-hot vectors for institutions and queries
//! - **Eligibility Filter**: Hard qualification and program rules applied before scoring
//! - **Ranking**: Weighted cosine similarity adjusted by confidence and boost
//! - **Explainability**: Match flags and a plain-language reason for every result
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use unimatch_core::{Dataset, Institution, QueryProfile};
//! use unimatch_similarity::{EngineConfig, Recommender};
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
//! let recommender = Recommender::new(Arc::new(dataset), EngineConfig::default()).unwrap();
//! let profile = QueryProfile::new("Science", 3.4, "Computer Engineering", "Kathmandu", "medium");
//! let results = recommender.recommend(&profile);
//! assert_eq!(results[0].institution.id, 1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Dataset    │────>│ Vectorizer  │────>│ Embeddings  │
//! │ (+ vocab)   │     │ (entity→v)  │     │  (cached)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │
//!       │   ┌─────────────┐   ┌─────────────┐    │
//!       └──>│   Filter    │──>│ Recommender │<───┘
//!           │ (eligible)  │   │  (scoring)  │
//!           └─────────────┘   └─────────────┘
//!                                    │
//!                             ┌─────────────┐
//!                             │  Explain    │
//!                             │ (results)   │
//!                             └─────────────┘
//! ```

pub mod confidence;
pub mod distance;
pub mod explain;
pub mod filter;
pub mod matcher;
pub mod matches;
pub mod rerank;
pub mod schema;
pub mod vectorizer;

pub use confidence::{boost, combined_score, confidence};
pub use distance::weighted_cosine_similarity;
pub use explain::{explanation, Recommendation, RecommendationSummary, SCORE_PRECISION};
pub use filter::{EligibilityFilter, EligibilityRule, ProgramRule, QualificationRule};
pub use matcher::{
    jaccard_tokens, ContainsMatcher, ExactMatcher, MutualContainmentMatcher, ProgramFilterMatcher, TextMatcher,
    TokenOverlapMatcher,
};
pub use matches::{FeatureMatches, FeatureScores, MatchAnalyzer};
pub use rerank::{Recommender, RecommenderBuilder, ScoredInstitution};
pub use schema::{BoostFactors, ConfidenceBonuses, ConfigError, EngineConfig, FeatureWeights};
pub use vectorizer::{EntityEmbedding, Vectorizer};
