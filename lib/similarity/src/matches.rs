//! Categorical match analysis
//!
//! Computed straight from the raw profile, independent of the vector path.
//! The flags never gate inclusion; they feed confidence, boosting and the
//! explanation text. Program matching here is deliberately looser than the
//! eligibility filter: a containment in either direction counts.

use crate::matcher::{ContainsMatcher, ExactMatcher, MutualContainmentMatcher, TextMatcher};
use serde::{Deserialize, Serialize};
use unimatch_core::{Institution, QueryProfile};

/// Per-category match flags for one institution
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureMatches {
    pub program: bool,
    pub stream: bool,
    pub location: bool,
    pub budget: bool,
    #[serde(rename = "gpa_eligible")]
    pub qualification: bool,
}

impl FeatureMatches {
    pub fn any(&self) -> bool {
        self.program || self.stream || self.location || self.budget || self.qualification
    }
}

/// 0/1 indicators per scored category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureScores {
    pub program_match: f64,
    pub stream_match: f64,
    pub location_match: f64,
    pub budget_match: f64,
}

impl From<&FeatureMatches> for FeatureScores {
    fn from(matches: &FeatureMatches) -> Self {
        let score = |flag: bool| if flag { 1.0 } else { 0.0 };
        Self {
            program_match: score(matches.program),
            stream_match: score(matches.stream),
            location_match: score(matches.location),
            budget_match: score(matches.budget),
        }
    }
}

/// Derives [`FeatureMatches`] for an institution against a profile
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAnalyzer;

impl MatchAnalyzer {
    pub fn analyze(&self, institution: &Institution, profile: &QueryProfile) -> FeatureMatches {
        let program = institution
            .programs
            .iter()
            .any(|p| MutualContainmentMatcher.matches(&profile.preferred_program, p));

        let location = profile.wants_any_location()
            || ContainsMatcher.matches(&profile.location, &institution.location);

        FeatureMatches {
            program,
            stream: institution.accepts_stream(&profile.stream),
            location,
            budget: ExactMatcher.matches(&profile.budget_range, &institution.budget_range),
            qualification: profile.gpa >= institution.min_gpa,
        }
    }
}
