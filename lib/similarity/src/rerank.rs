//! Ranking pipeline
//!
//! Filters the dataset with the hard eligibility rules, scores every survivor
//! by weighted cosine similarity, adjusts by confidence and boost, and returns
//! the best `top_n` with explanations.

use crate::confidence::{boost, combined_score, confidence};
use crate::distance::weighted_cosine_similarity;
use crate::explain::{Recommendation, RecommendationSummary};
use crate::filter::EligibilityFilter;
use crate::matcher::{MutualContainmentMatcher, ProgramFilterMatcher, TextMatcher};
use crate::matches::{FeatureMatches, MatchAnalyzer};
use crate::schema::{ConfigError, EngineConfig};
use crate::vectorizer::{EntityEmbedding, Vectorizer};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};
use unimatch_core::{Comparison, Dataset, DatasetStats, FeatureVector, QueryProfile, Vocabulary};

/// Raw, unrounded scores for one eligible institution
#[derive(Debug, Clone)]
pub struct ScoredInstitution {
    /// Position of the institution in the dataset
    pub position: usize,
    pub similarity: f64,
    pub confidence: f64,
    pub combined: f64,
    pub matches: FeatureMatches,
}

/// Scores and ranks institutions against query profiles.
///
/// Entity embeddings are computed once at construction; a recommender is
/// immutable afterwards and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Recommender {
    dataset: Arc<Dataset>,
    vocabulary: Arc<Vocabulary>,
    vectorizer: Vectorizer,
    embeddings: Arc<Vec<EntityEmbedding>>,
    filter: EligibilityFilter,
    analyzer: MatchAnalyzer,
    config: EngineConfig,
}

impl Recommender {
    /// Build a recommender with the default matchers
    pub fn new(dataset: Arc<Dataset>, config: EngineConfig) -> Result<Self, ConfigError> {
        RecommenderBuilder::new(dataset).config(config).build()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    /// Cached embedding of the institution at `position`
    pub fn embedding(&self, position: usize) -> Option<&EntityEmbedding> {
        self.embeddings.get(position)
    }

    /// Score every eligible institution, best first.
    ///
    /// Ties keep dataset order. An empty result means nothing passed the
    /// eligibility rules.
    pub fn score(&self, profile: &QueryProfile) -> Vec<ScoredInstitution> {
        let profile = profile.normalized();
        let institutions = self.dataset.institutions();

        let eligible = self.filter.apply(institutions, &profile);
        if eligible.is_empty() {
            return Vec::new();
        }

        let query = self.vectorizer.embed_query(&profile);
        let mut scored: Vec<ScoredInstitution> = eligible
            .par_iter()
            .map(|&position| self.score_position(position, &query, &profile))
            .collect();

        scored.sort_by(|a, b| b.combined.partial_cmp(&a.combined).unwrap_or(Ordering::Equal));
        scored
    }

    fn score_position(&self, position: usize, query: &FeatureVector, profile: &QueryProfile) -> ScoredInstitution {
        let institution = &self.dataset.institutions()[position];
        let embedding = &self.embeddings[position];

        let similarity = weighted_cosine_similarity(query, &embedding.vector, &embedding.weights);
        let matches = self.analyzer.analyze(institution, profile);
        let confidence = confidence(similarity, &matches, &self.config.confidence);
        let boost = boost(&matches, &self.config.boosts);

        ScoredInstitution {
            position,
            similarity,
            confidence,
            combined: combined_score(similarity, confidence, boost),
            matches,
        }
    }

    /// Top `top_n` recommendations for a profile
    pub fn recommend(&self, profile: &QueryProfile) -> Vec<Recommendation> {
        self.recommend_with_summary(profile).0
    }

    /// Top `top_n` recommendations plus request-level statistics
    pub fn recommend_with_summary(&self, profile: &QueryProfile) -> (Vec<Recommendation>, RecommendationSummary) {
        let normalized = profile.normalized();
        let top_n = normalized.top_n.unwrap_or(self.config.default_top_n);

        let scored = self.score(&normalized);
        let eligible_count = scored.len();

        let institutions = self.dataset.institutions();
        let results: Vec<Recommendation> = scored
            .iter()
            .take(top_n)
            .map(|s| Recommendation::from_scored(&institutions[s.position], s, &normalized))
            .collect();

        debug!(
            "Recommendation: {} eligible of {}, returning {}",
            eligible_count,
            institutions.len(),
            results.len()
        );

        let summary = RecommendationSummary::compute(&results, eligible_count);
        (results, summary)
    }

    /// Side-by-side comparison of the given institutions
    pub fn compare(&self, ids: &[u64]) -> unimatch_core::Result<Comparison> {
        self.dataset.compare(ids)
    }

    /// Aggregate statistics over the whole dataset
    pub fn statistics(&self) -> DatasetStats {
        DatasetStats::compute(&self.dataset, &self.vocabulary)
    }
}

/// Builder for [`Recommender`] with pluggable text matchers
pub struct RecommenderBuilder {
    dataset: Arc<Dataset>,
    config: EngineConfig,
    program_matcher: Option<Arc<dyn TextMatcher>>,
    location_matcher: Option<Arc<dyn TextMatcher>>,
    filter_matcher: Option<Arc<dyn TextMatcher>>,
}

impl RecommenderBuilder {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            config: EngineConfig::default(),
            program_matcher: None,
            location_matcher: None,
            filter_matcher: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Matcher deciding which program dimensions a query activates
    #[must_use]
    pub fn program_matcher(mut self, matcher: Arc<dyn TextMatcher>) -> Self {
        self.program_matcher = Some(matcher);
        self
    }

    /// Matcher deciding which location dimensions a query activates
    #[must_use]
    pub fn location_matcher(mut self, matcher: Arc<dyn TextMatcher>) -> Self {
        self.location_matcher = Some(matcher);
        self
    }

    /// Matcher used by the eligibility program rule
    #[must_use]
    pub fn filter_matcher(mut self, matcher: Arc<dyn TextMatcher>) -> Self {
        self.filter_matcher = Some(matcher);
        self
    }

    pub fn build(self) -> Result<Recommender, ConfigError> {
        self.config.validate()?;

        let vocabulary = Arc::new(Vocabulary::build(self.dataset.institutions()));
        let vectorizer = Vectorizer::new(Arc::clone(&vocabulary), &self.config)
            .with_program_matcher(self.program_matcher.unwrap_or_else(|| Arc::new(MutualContainmentMatcher)))
            .with_location_matcher(self.location_matcher.unwrap_or_else(|| Arc::new(MutualContainmentMatcher)));

        let filter_matcher = self.filter_matcher.unwrap_or_else(|| {
            Arc::new(ProgramFilterMatcher::new(self.config.program_substring_min_len))
        });

        let embeddings: Vec<EntityEmbedding> = self
            .dataset
            .institutions()
            .par_iter()
            .map(|institution| vectorizer.embed_entity(institution))
            .collect();

        info!(
            "Recommender ready: {} institutions, vector dimension {}",
            embeddings.len(),
            vectorizer.vector_dim()
        );

        Ok(Recommender {
            dataset: self.dataset,
            vocabulary,
            vectorizer,
            embeddings: Arc::new(embeddings),
            filter: EligibilityFilter::new(filter_matcher),
            analyzer: MatchAnalyzer,
            config: self.config,
        })
    }
}
