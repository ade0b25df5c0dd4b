use serde::{Deserialize, Serialize};

/// Location preference that matches every location
pub const ANY_LOCATION: &str = "any";

/// A student's stated preferences for one recommendation request.
///
/// Callers are expected to validate and coerce the raw request before
/// building one of these; the engine takes the values as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryProfile {
    pub stream: String,
    /// Qualification score on the same scale as `Institution::min_gpa`
    pub gpa: f64,
    pub preferred_program: String,
    pub location: String,
    pub budget_range: String,
    /// Number of results to return; the engine default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(default, alias = "career_goal", skip_serializing_if = "Option::is_none")]
    pub career_goals: Option<String>,
}

impl QueryProfile {
    #[must_use]
    pub fn new(
        stream: impl Into<String>,
        gpa: f64,
        preferred_program: impl Into<String>,
        location: impl Into<String>,
        budget_range: impl Into<String>,
    ) -> Self {
        Self {
            stream: stream.into(),
            gpa,
            preferred_program: preferred_program.into(),
            location: location.into(),
            budget_range: budget_range.into(),
            top_n: None,
            interests: None,
            career_goals: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = Some(interests.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_career_goals(mut self, career_goals: impl Into<String>) -> Self {
        self.career_goals = Some(career_goals.into());
        self
    }

    /// True when the student has no location preference
    pub fn wants_any_location(&self) -> bool {
        self.location.trim().eq_ignore_ascii_case(ANY_LOCATION)
    }

    /// Copy with surrounding whitespace stripped from every text field
    #[must_use]
    pub fn normalized(&self) -> Self {
        let trim = |s: &str| s.trim().to_string();
        Self {
            stream: trim(&self.stream),
            gpa: self.gpa,
            preferred_program: trim(&self.preferred_program),
            location: trim(&self.location),
            budget_range: trim(&self.budget_range),
            top_n: self.top_n,
            interests: self.interests.as_deref().map(trim),
            career_goals: self.career_goals.as_deref().map(trim),
        }
    }
}
