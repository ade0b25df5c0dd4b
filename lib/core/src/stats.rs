use crate::{round_to, Dataset, Vocabulary};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary counts over a dataset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetStats {
    #[serde(rename = "total_colleges")]
    pub total_institutions: usize,
    pub by_location: BTreeMap<String, usize>,
    pub by_budget: BTreeMap<String, usize>,
    /// An institution accepting several streams counts once per stream
    pub by_stream: BTreeMap<String, usize>,
    /// Number of distinct programs in the vocabulary
    pub programs_count: usize,
    /// Mean `min_gpa`, rounded to 2 decimals; 0.0 for an empty dataset
    pub average_min_gpa: f64,
}

impl DatasetStats {
    pub fn compute(dataset: &Dataset, vocabulary: &Vocabulary) -> Self {
        let mut by_location = BTreeMap::new();
        let mut by_budget = BTreeMap::new();
        let mut by_stream = BTreeMap::new();
        let mut total_gpa = 0.0;

        for institution in dataset.institutions() {
            *by_location.entry(institution.location.clone()).or_insert(0) += 1;
            *by_budget.entry(institution.budget_range.clone()).or_insert(0) += 1;
            for stream in &institution.streams {
                *by_stream.entry(stream.clone()).or_insert(0) += 1;
            }
            total_gpa += institution.min_gpa;
        }

        let average_min_gpa = if dataset.is_empty() {
            0.0
        } else {
            round_to(total_gpa / dataset.len() as f64, 2)
        };

        Self {
            total_institutions: dataset.len(),
            by_location,
            by_budget,
            by_stream,
            programs_count: vocabulary.programs().len(),
            average_min_gpa,
        }
    }
}
