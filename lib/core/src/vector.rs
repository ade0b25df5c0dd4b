use serde::{Deserialize, Serialize};

/// A dense feature vector aligned to a [`Vocabulary`](crate::Vocabulary)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FeatureVector {
    data: Vec<f64>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(dim: usize) -> Self {
        Self {
            data: Vec::with_capacity(dim),
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn push(&mut self, value: f64) {
        self.data.push(value);
    }

    /// Append `value` `count` times
    #[inline]
    pub fn extend_repeat(&mut self, value: f64, count: usize) {
        self.data.extend(std::iter::repeat(value).take(count));
    }

    #[inline]
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        if self.dim() != other.dim() {
            return 0.0;
        }
        self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum()
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector.
    /// Zero-magnitude or mismatched inputs give 0.0.
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f64 {
        if self.dim() != other.dim() {
            return 0.0;
        }

        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (norm_a * norm_b)
    }

    /// Elementwise product with a weight vector of the same length
    #[must_use]
    pub fn weighted(&self, weights: &FeatureVector) -> FeatureVector {
        debug_assert_eq!(self.dim(), weights.dim());
        FeatureVector::new(
            self.data
                .iter()
                .zip(&weights.data)
                .map(|(v, w)| v * w)
                .collect(),
        )
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = FeatureVector::new(vec![1.0, 0.0]);
        let v2 = FeatureVector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2) - 1.0).abs() < 1e-9);

        let v3 = FeatureVector::new(vec![1.0, 0.0]);
        let v4 = FeatureVector::new(vec![0.0, 1.0]);
        assert!(v3.cosine_similarity(&v4).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_similarity() {
        let zero = FeatureVector::new(vec![0.0, 0.0, 0.0]);
        let v = FeatureVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = FeatureVector::new(vec![1.0, 1.0]);
        let b = FeatureVector::new(vec![1.0, 1.0, 1.0]);
        assert_eq!(a.cosine_similarity(&b), 0.0);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_weighted() {
        let v = FeatureVector::new(vec![1.0, 0.5, 0.0]);
        let w = FeatureVector::new(vec![6.0, 4.0, 3.0]);
        assert_eq!(v.weighted(&w).as_slice(), &[6.0, 2.0, 0.0]);
    }

    #[test]
    fn test_extend_repeat() {
        let mut v = FeatureVector::with_capacity(4);
        v.extend_repeat(0.8, 3);
        v.push(0.5);
        assert_eq!(v.as_slice(), &[0.8, 0.8, 0.8, 0.5]);
    }
}
