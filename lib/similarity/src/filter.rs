//! Hard eligibility rules applied before any scoring
//!
//! Rules run in order and each one only sees the survivors of the previous
//! one. An empty survivor set is a valid outcome, never a reason to relax a
//! rule.

use crate::matcher::{ProgramFilterMatcher, TextMatcher};
use std::sync::Arc;
use tracing::debug;
use unimatch_core::{Institution, QueryProfile};

pub trait EligibilityRule {
    fn admits(&self, institution: &Institution) -> bool;

    fn name(&self) -> &'static str;
}

/// Keeps institutions whose minimum qualification is at most the student's score
#[derive(Debug, Clone, Copy)]
pub struct QualificationRule {
    score: f64,
}

impl QualificationRule {
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl EligibilityRule for QualificationRule {
    fn admits(&self, institution: &Institution) -> bool {
        institution.min_gpa <= self.score
    }

    fn name(&self) -> &'static str {
        "qualification"
    }
}

/// Keeps institutions offering a program the matcher accepts
#[derive(Debug)]
pub struct ProgramRule<'a> {
    program: &'a str,
    matcher: &'a dyn TextMatcher,
}

impl<'a> ProgramRule<'a> {
    pub fn new(program: &'a str, matcher: &'a dyn TextMatcher) -> Self {
        Self { program, matcher }
    }
}

impl EligibilityRule for ProgramRule<'_> {
    fn admits(&self, institution: &Institution) -> bool {
        institution
            .programs
            .iter()
            .any(|offered| self.matcher.matches(self.program, offered))
    }

    fn name(&self) -> &'static str {
        "program"
    }
}

/// Applies the qualification rule, then the program rule when the query names a program
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    program_matcher: Arc<dyn TextMatcher>,
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self::new(Arc::new(ProgramFilterMatcher::default()))
    }
}

impl EligibilityFilter {
    pub fn new(program_matcher: Arc<dyn TextMatcher>) -> Self {
        Self { program_matcher }
    }

    /// Rules that apply to `profile`, in evaluation order
    pub fn rules<'a>(&'a self, profile: &'a QueryProfile) -> Vec<Box<dyn EligibilityRule + 'a>> {
        let mut rules: Vec<Box<dyn EligibilityRule + 'a>> =
            vec![Box::new(QualificationRule::new(profile.gpa))];

        let program = profile.preferred_program.trim();
        if !program.is_empty() {
            rules.push(Box::new(ProgramRule::new(program, self.program_matcher.as_ref())));
        }

        rules
    }

    /// Indices (in dataset order) of the institutions that pass every rule
    pub fn apply(&self, institutions: &[Institution], profile: &QueryProfile) -> Vec<usize> {
        let mut survivors: Vec<usize> = (0..institutions.len()).collect();

        for rule in self.rules(profile) {
            survivors.retain(|&i| rule.admits(&institutions[i]));
            if survivors.is_empty() {
                debug!("No institutions left after the {} rule", rule.name());
                break;
            }
        }

        survivors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institutions() -> Vec<Institution> {
        vec![
            Institution::new(1, "Kathmandu Medical College", "Kathmandu")
                .with_programs(["MBBS", "BDS"])
                .with_min_gpa(3.2),
            Institution::new(2, "Shankar Dev Campus", "Kathmandu")
                .with_programs(["BBS", "BBA"])
                .with_min_gpa(2.4),
            Institution::new(3, "Pulchowk Campus", "Lalitpur")
                .with_programs(["Computer Engineering", "Civil Engineering"])
                .with_min_gpa(3.0),
        ]
    }

    #[test]
    fn test_qualification_rule_boundary() {
        let institution = Institution::new(1, "A", "Kathmandu").with_min_gpa(3.0);
        assert!(QualificationRule::new(3.0).admits(&institution));
        assert!(!QualificationRule::new(2.99).admits(&institution));
        assert!(!QualificationRule::new(f64::NAN).admits(&institution));
    }

    #[test]
    fn test_qualification_only_when_program_blank() {
        let filter = EligibilityFilter::default();
        let profile = QueryProfile::new("Science", 3.0, "   ", "Kathmandu", "low");
        assert_eq!(filter.apply(&institutions(), &profile), vec![1, 2]);
    }

    #[test]
    fn test_program_filter_excludes_acronym_superstring() {
        let filter = EligibilityFilter::default();
        let profile = QueryProfile::new("Management", 4.0, "BBS", "Kathmandu", "low");
        assert_eq!(filter.apply(&institutions(), &profile), vec![1]);
    }

    #[test]
    fn test_program_substring_for_long_query() {
        let filter = EligibilityFilter::default();
        let profile = QueryProfile::new("Science", 3.5, "engineering", "any", "low");
        assert_eq!(filter.apply(&institutions(), &profile), vec![2]);
    }

    #[test]
    fn test_no_fallback_when_program_unmatched() {
        let filter = EligibilityFilter::default();
        let profile = QueryProfile::new("Science", 4.0, "Law", "any", "low");
        assert!(filter.apply(&institutions(), &profile).is_empty());
    }

    #[test]
    fn test_nobody_qualifies() {
        let filter = EligibilityFilter::default();
        let profile = QueryProfile::new("Science", 1.0, "BBS", "any", "low");
        assert!(filter.apply(&institutions(), &profile).is_empty());
    }

    #[test]
    fn test_rules_in_order() {
        let filter = EligibilityFilter::default();
        let profile = QueryProfile::new("Science", 3.0, "BBA", "any", "low");
        let names: Vec<_> = filter.rules(&profile).iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["qualification", "program"]);
    }

    #[test]
    fn test_monotone_in_qualification() {
        let filter = EligibilityFilter::default();
        let data = institutions();
        let mut previous: Vec<usize> = Vec::new();
        for step in 0..=8 {
            let gpa = step as f64 * 0.5;
            let profile = QueryProfile::new("Science", gpa, "", "any", "low");
            let current = filter.apply(&data, &profile);
            assert!(previous.iter().all(|i| current.contains(i)));
            previous = current;
        }
    }
}
