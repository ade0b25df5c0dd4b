//! Confidence and boost arithmetic

use crate::matches::FeatureMatches;
use crate::schema::{BoostFactors, ConfidenceBonuses};

/// Similarity plus a bonus per matched category, capped at 1.0
pub fn confidence(similarity: f64, matches: &FeatureMatches, bonuses: &ConfidenceBonuses) -> f64 {
    let mut value = similarity;
    if matches.program {
        value += bonuses.program;
    }
    if matches.stream {
        value += bonuses.stream;
    }
    if matches.location {
        value += bonuses.location;
    }
    value.min(1.0)
}

/// Product of the boost factors for every matched boosted category
pub fn boost(matches: &FeatureMatches, factors: &BoostFactors) -> f64 {
    let mut multiplier = 1.0;
    if matches.program {
        multiplier *= factors.program;
    }
    if matches.location {
        multiplier *= factors.location;
    }
    multiplier
}

/// The ranking key
#[inline]
pub fn combined_score(similarity: f64, confidence: f64, boost: f64) -> f64 {
    similarity * confidence * boost
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(program: bool, stream: bool, location: bool) -> FeatureMatches {
        FeatureMatches {
            program,
            stream,
            location,
            ..FeatureMatches::default()
        }
    }

    #[test]
    fn test_bonuses_accumulate() {
        let bonuses = ConfidenceBonuses::default();
        let c = confidence(0.5, &matches(true, true, false), &bonuses);
        assert!((c - 0.68).abs() < 1e-9);

        let c = confidence(0.5, &matches(false, false, true), &bonuses);
        assert!((c - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_capped() {
        let bonuses = ConfidenceBonuses::default();
        assert_eq!(confidence(0.95, &matches(true, true, true), &bonuses), 1.0);
        assert_eq!(confidence(1.0, &matches(false, false, false), &bonuses), 1.0);
    }

    #[test]
    fn test_no_match_confidence_is_similarity() {
        let bonuses = ConfidenceBonuses::default();
        assert_eq!(confidence(0.42, &FeatureMatches::default(), &bonuses), 0.42);
    }

    #[test]
    fn test_boost() {
        let factors = BoostFactors::default();
        assert_eq!(boost(&matches(false, true, false), &factors), 1.0);
        assert_eq!(boost(&matches(true, false, false), &factors), 2.0);
        assert_eq!(boost(&matches(false, false, true), &factors), 2.0);
        assert_eq!(boost(&matches(true, true, true), &factors), 4.0);
    }

    #[test]
    fn test_combined_score() {
        assert!((combined_score(0.5, 0.8, 4.0) - 1.6).abs() < 1e-9);
    }
}
