//! Weighted cosine similarity
//!
//! Both vectors are scaled elementwise by the same weight vector before the
//! usual cosine is taken. Weights always come from the entity side: they
//! describe how important a feature is, not which side produced the value.

use unimatch_core::FeatureVector;

/// Weighted cosine similarity between a query and an entity vector.
///
/// Returns 0.0 when the dimensions disagree, when either weighted vector has
/// zero magnitude, or when the arithmetic is not finite (e.g. an infinite
/// qualification score). For non-negative inputs the result lies in [0, 1].
pub fn weighted_cosine_similarity(
    query: &FeatureVector,
    entity: &FeatureVector,
    weights: &FeatureVector,
) -> f64 {
    if query.dim() != entity.dim() || entity.dim() != weights.dim() {
        return 0.0;
    }

    let weighted_query = query.weighted(weights);
    let weighted_entity = entity.weighted(weights);

    let similarity = weighted_query.cosine_similarity(&weighted_entity);
    if similarity.is_finite() {
        similarity
    } else {
        0.0
    }
}
