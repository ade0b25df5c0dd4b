//! User feedback on recommendations
//!
//! Feedback is collected for later analysis only; nothing here feeds back
//! into scoring.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedbackError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),
}

/// One feedback entry about a recommended institution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub college_id: u64,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    /// Client-supplied timestamp, kept verbatim
    #[serde(default)]
    pub timestamp: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        college_id: u64,
        rating: i64,
        comment: impl Into<String>,
        timestamp: Option<String>,
    ) -> Result<Self, FeedbackError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(FeedbackError::InvalidRating(rating));
        }
        Ok(Self {
            college_id,
            rating: rating as u8,
            comment: comment.into(),
            timestamp,
            received_at: Utc::now(),
        })
    }
}

/// Append-only feedback sink
pub trait FeedbackStore: Send + Sync {
    fn append(&self, feedback: Feedback);

    /// All entries in submission order
    fn list(&self) -> Vec<Feedback>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store; contents are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryFeedbackStore {
    entries: RwLock<Vec<Feedback>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackStore for InMemoryFeedbackStore {
    fn append(&self, feedback: Feedback) {
        self.entries.write().push(feedback);
    }

    fn list(&self) -> Vec<Feedback> {
        self.entries.read().clone()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
