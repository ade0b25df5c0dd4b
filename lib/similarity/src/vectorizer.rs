//! Vectorizer
//!
//! Turns institutions and query profiles into feature vectors laid out by the
//! [`Vocabulary`]: one 0/1 dimension per program, stream, location and budget
//! tier, then the qualification score divided by `max_qualification`.
//!
//! Entity vectors use exact membership. Query vectors use the configured
//! matchers for programs and locations (fuzzy by default) and exact
//! case-insensitive equality for streams and budget tiers.

use crate::matcher::{ExactMatcher, MutualContainmentMatcher, TextMatcher};
use crate::schema::{EngineConfig, FeatureWeights};
use std::sync::Arc;
use unimatch_core::{Category, FeatureVector, Institution, QueryProfile, Vocabulary};

/// An entity vector and its per-dimension importance weights
#[derive(Debug, Clone, PartialEq)]
pub struct EntityEmbedding {
    pub vector: FeatureVector,
    pub weights: FeatureVector,
}

/// Converts institutions and queries into vocabulary-aligned vectors
#[derive(Debug, Clone)]
pub struct Vectorizer {
    vocabulary: Arc<Vocabulary>,
    weights: FeatureWeights,
    max_qualification: f64,
    program_matcher: Arc<dyn TextMatcher>,
    location_matcher: Arc<dyn TextMatcher>,
}

impl Vectorizer {
    /// Create a vectorizer with the default fuzzy program and location matchers
    pub fn new(vocabulary: Arc<Vocabulary>, config: &EngineConfig) -> Self {
        Self {
            vocabulary,
            weights: config.weights,
            max_qualification: config.max_qualification,
            program_matcher: Arc::new(MutualContainmentMatcher),
            location_matcher: Arc::new(MutualContainmentMatcher),
        }
    }

    #[must_use]
    pub fn with_program_matcher(mut self, matcher: Arc<dyn TextMatcher>) -> Self {
        self.program_matcher = matcher;
        self
    }

    #[must_use]
    pub fn with_location_matcher(mut self, matcher: Arc<dyn TextMatcher>) -> Self {
        self.location_matcher = matcher;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Vector dimension produced by this vectorizer
    pub fn vector_dim(&self) -> usize {
        self.vocabulary.dim()
    }

    /// Scale a qualification score onto the vector's [0, 1] range.
    /// Out-of-range scores are passed through unclamped.
    #[inline]
    pub fn normalize_qualification(&self, score: f64) -> f64 {
        score / self.max_qualification
    }

    /// Convert an institution into its feature vector and weight vector
    pub fn embed_entity(&self, institution: &Institution) -> EntityEmbedding {
        let dim = self.vector_dim();
        let mut vector = FeatureVector::with_capacity(dim);
        let mut weights = FeatureVector::with_capacity(dim);

        for category in Category::ALL {
            let values = self.vocabulary.values(category);
            for value in values {
                let present = match category {
                    Category::Program => institution.programs.contains(value),
                    Category::Stream => institution.streams.contains(value),
                    Category::Location => institution.location == *value,
                    Category::Budget => institution.budget_range == *value,
                };
                vector.push(indicator(present));
            }
            weights.extend_repeat(self.weights.for_category(category), values.len());
        }

        vector.push(self.normalize_qualification(institution.min_gpa));
        weights.push(self.weights.qualification);

        EntityEmbedding { vector, weights }
    }

    /// Convert a query profile into a feature vector.
    ///
    /// Queries carry no weights of their own; scoring borrows the entity's.
    pub fn embed_query(&self, profile: &QueryProfile) -> FeatureVector {
        let mut vector = FeatureVector::with_capacity(self.vector_dim());
        let any_location = profile.wants_any_location();

        for category in Category::ALL {
            for value in self.vocabulary.values(category) {
                let active = match category {
                    Category::Program => self.program_matcher.matches(&profile.preferred_program, value),
                    Category::Stream => ExactMatcher.matches(&profile.stream, value),
                    Category::Location => {
                        any_location || self.location_matcher.matches(&profile.location, value)
                    }
                    Category::Budget => ExactMatcher.matches(&profile.budget_range, value),
                };
                vector.push(indicator(active));
            }
        }

        vector.push(self.normalize_qualification(profile.gpa));
        vector
    }
}

#[inline]
fn indicator(present: bool) -> f64 {
    if present {
        1.0
    } else {
        0.0
    }
}
