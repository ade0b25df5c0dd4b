//! Dataset-derived vocabulary
//!
//! The vocabulary fixes the dimension layout shared by every entity and query
//! vector: all programs, then streams, then locations, then budget tiers, then
//! a single qualification scalar. Each category is sorted so the same dataset
//! always yields the same layout.

use crate::Institution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

/// Categorical feature groups in vector order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Program,
    Stream,
    Location,
    Budget,
}

impl Category {
    /// All categories in the order their dimensions appear in a vector
    pub const ALL: [Category; 4] = [
        Category::Program,
        Category::Stream,
        Category::Location,
        Category::Budget,
    ];
}

/// Ordered, duplicate-free categorical values found in a dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vocabulary {
    programs: Vec<String>,
    streams: Vec<String>,
    locations: Vec<String>,
    budgets: Vec<String>,
}

impl Vocabulary {
    /// Scan the institutions once and collect every categorical value
    pub fn build(institutions: &[Institution]) -> Self {
        let mut programs = BTreeSet::new();
        let mut streams = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut budgets = BTreeSet::new();

        for institution in institutions {
            programs.extend(institution.programs.iter().cloned());
            streams.extend(institution.streams.iter().cloned());
            locations.insert(institution.location.clone());
            budgets.insert(institution.budget_range.clone());
        }

        Self {
            programs: programs.into_iter().collect(),
            streams: streams.into_iter().collect(),
            locations: locations.into_iter().collect(),
            budgets: budgets.into_iter().collect(),
        }
    }

    pub fn programs(&self) -> &[String] {
        &self.programs
    }

    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn budgets(&self) -> &[String] {
        &self.budgets
    }

    pub fn values(&self, category: Category) -> &[String] {
        match category {
            Category::Program => &self.programs,
            Category::Stream => &self.streams,
            Category::Location => &self.locations,
            Category::Budget => &self.budgets,
        }
    }

    /// Dimension range occupied by `category`
    pub fn range(&self, category: Category) -> Range<usize> {
        let mut start = 0;
        for c in Category::ALL {
            let len = self.values(c).len();
            if c == category {
                return start..start + len;
            }
            start += len;
        }
        start..start
    }

    /// Index of the trailing qualification dimension
    pub fn qualification_index(&self) -> usize {
        self.dim() - 1
    }

    /// Total vector dimensionality, including the qualification scalar
    pub fn dim(&self) -> usize {
        self.programs.len() + self.streams.len() + self.locations.len() + self.budgets.len() + 1
    }
}
