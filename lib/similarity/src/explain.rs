//! Explainability for ranked recommendations
//!
//! Provides the output structures returned to callers: the institution record
//! enriched with its score breakdown, the per-category match flags and a
//! plain-language sentence saying why it was recommended.

use crate::matches::{FeatureMatches, FeatureScores};
use crate::rerank::ScoredInstitution;
use serde::Serialize;
use unimatch_core::{round_to, Institution, QueryProfile};

/// Decimal places kept in presented scores
pub const SCORE_PRECISION: i32 = 3;

const FALLBACK_REASON: &str = "has some similarity with your profile";

/// A recommended institution with its score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub institution: Institution,
    pub similarity_score: f64,
    pub confidence_score: f64,
    pub combined_score: f64,
    pub feature_matches: FeatureMatches,
    pub feature_scores: FeatureScores,
    pub explanation: String,
}

impl Recommendation {
    /// Build the presented form of a scored institution; scores are rounded
    pub fn from_scored(institution: &Institution, scored: &ScoredInstitution, profile: &QueryProfile) -> Self {
        Self {
            institution: institution.clone(),
            similarity_score: round_to(scored.similarity, SCORE_PRECISION),
            confidence_score: round_to(scored.confidence, SCORE_PRECISION),
            combined_score: round_to(scored.combined, SCORE_PRECISION),
            feature_matches: scored.matches,
            feature_scores: FeatureScores::from(&scored.matches),
            explanation: explanation(institution, profile, &scored.matches),
        }
    }
}

/// Sentence listing the matched reasons in program, stream, location,
/// budget, qualification order
pub fn explanation(institution: &Institution, profile: &QueryProfile, matches: &FeatureMatches) -> String {
    let mut reasons = Vec::new();

    if matches.program {
        reasons.push("offers your preferred program".to_string());
    }
    if matches.stream {
        reasons.push(format!("accepts students from {} stream", profile.stream));
    }
    if matches.location {
        reasons.push(format!("located in {}", institution.location));
    }
    if matches.budget {
        reasons.push(format!("fits your {} budget range", institution.budget_range));
    }
    if matches.qualification {
        reasons.push(format!(
            "your GPA ({:?}) meets requirement ({:?})",
            profile.gpa, institution.min_gpa
        ));
    }

    let Some((first, rest)) = reasons.split_first() else {
        return format!("This college was recommended because it {}", FALLBACK_REASON);
    };

    let mut text = format!("This college was recommended because it {}", first);
    if !rest.is_empty() {
        text.push_str(", and it also ");
        text.push_str(&rest.join(", "));
    }
    text
}

/// Summary statistics for one recommendation request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationSummary {
    /// Institutions that survived the eligibility rules
    pub eligible_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Combined score of the top result
    pub best_score: f64,
    /// Mean combined score of the returned results
    pub average_score: f64,
}

impl RecommendationSummary {
    pub fn compute(results: &[Recommendation], eligible_count: usize) -> Self {
        if results.is_empty() {
            return Self {
                eligible_count,
                results_count: 0,
                best_score: 0.0,
                average_score: 0.0,
            };
        }

        let total: f64 = results.iter().map(|r| r.combined_score).sum();
        Self {
            eligible_count,
            results_count: results.len(),
            best_score: results[0].combined_score, // results are sorted
            average_score: round_to(total / results.len() as f64, SCORE_PRECISION),
        }
    }
}
