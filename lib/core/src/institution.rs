use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A higher-education institution as loaded from the dataset.
///
/// The scoring engine only reads the typed fields. Everything else in the
/// source record (career focus, interests, facilities, contact data, ...)
/// lands in `details` and is serialized back out untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Institution {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub programs: Vec<String>,
    pub streams: Vec<String>,
    /// Minimum qualification score (GPA) required for admission
    pub min_gpa: f64,
    /// Budget tier, e.g. `low`, `medium`, `high`
    pub budget_range: String,
    /// Passthrough descriptive fields
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Institution {
    /// Create an institution with no programs, no streams and a zero qualification threshold
    #[inline]
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            programs: Vec::new(),
            streams: Vec::new(),
            min_gpa: 0.0,
            budget_range: String::new(),
            details: Map::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_programs<I, S>(mut self, programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.programs = programs.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_streams<I, S>(mut self, streams: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.streams = streams.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_min_gpa(mut self, min_gpa: f64) -> Self {
        self.min_gpa = min_gpa;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_budget_range(mut self, budget_range: impl Into<String>) -> Self {
        self.budget_range = budget_range.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }

    /// Case-insensitive stream membership, Unicode-aware. A blank stream is never accepted.
    pub fn accepts_stream(&self, stream: &str) -> bool {
        let stream = stream.trim().to_lowercase();
        !stream.is_empty() && self.streams.iter().any(|s| s.trim().to_lowercase() == stream)
    }

    /// Check the invariants serde cannot express on its own.
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("field `name` is empty".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("field `location` is empty".to_string());
        }
        if self.budget_range.trim().is_empty() {
            return Err("field `budget_range` is empty".to_string());
        }
        if !self.min_gpa.is_finite() || self.min_gpa < 0.0 {
            return Err(format!("field `min_gpa` must be a non-negative number, got {}", self.min_gpa));
        }
        Ok(())
    }
}
