//! Candidate ranking rules and rule engine for schedule generation.
//!
//! Provides priority rules (nearest completion, time-of-day fit, focus
//! category, interests, instructor rating) and a composable engine that
//! orders candidate sections before the greedy generator consumes them.
//!
//! # Usage
//!
//! ```
//! use course_schedule::ranking::{RankingContext, RankingEngine};
//! use course_schedule::ranking::rules;
//!
//! let engine = RankingEngine::new()
//!     .with_rule(rules::NearestCompletion)
//!     .with_rule(rules::TimeOfDayFit);
//!
//! let context = RankingContext::default();
//! assert!(engine.sort_indices(&[], &context).is_empty());
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::RankingContext;
pub use engine::{RankingEngine, TieBreaker};

use crate::models::ClassSection;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = higher priority (considered first).
pub type RankScore = f64;

/// A rule that scores how early a candidate section should be considered.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "NEAREST_COMPLETION").
    fn name(&self) -> &'static str;

    /// Scores a section given the student's context.
    fn evaluate(&self, section: &ClassSection, context: &RankingContext) -> RankScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
