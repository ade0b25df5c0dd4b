//! HTTP surface for the unimatch recommendation engine.

pub mod feedback;
pub mod rest;

pub use feedback::{Feedback, FeedbackError, FeedbackStore, InMemoryFeedbackStore};
pub use rest::{parse_profile, AppState, RequestError, RestApi};
