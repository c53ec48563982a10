//! Rule engine for candidate ordering.
//!
//! Rules are applied lexicographically: the next rule is consulted only
//! when the previous ones tie within `epsilon`.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{rules, RankScore, RankingContext, RankingRule};
use crate::models::ClassSection;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (catalog stability order).
    #[default]
    InputOrder,
    /// Deterministic by section id (lexicographic).
    ById,
    /// Seeded shuffle of tied candidates, for variety between generations.
    Seeded(u64),
}

/// A composable rule engine for candidate prioritization.
///
/// # Example
/// ```
/// use course_schedule::ranking::{RankingEngine, TieBreaker};
/// use course_schedule::ranking::rules;
///
/// let engine = RankingEngine::new()
///     .with_rule(rules::NearestCompletion)
///     .with_rule(rules::InstructorRating)
///     .with_tie_breaker(TieBreaker::ById);
/// assert_eq!(engine.rule_names(), vec!["NEAREST_COMPLETION", "INSTRUCTOR_RATING"]);
/// ```
#[derive(Clone)]
pub struct RankingEngine {
    rules: Vec<Arc<dyn RankingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RankingEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// The generator's default ordering.
    ///
    /// 1. Smallest nonzero remaining need among satisfied categories
    /// 2. Time-of-day fit
    /// 3. Priority focus category
    /// 4. Interest tags
    /// 5. Instructor rating
    ///
    /// Remaining ties keep catalog order.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::NearestCompletion)
            .with_rule(rules::TimeOfDayFit)
            .with_rule(rules::PriorityFocus)
            .with_rule(rules::InterestMatch)
            .with_rule(rules::InstructorRating)
    }

    /// Appends a rule.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Scores from each rule for one section.
    pub fn evaluate(&self, section: &ClassSection, context: &RankingContext) -> Vec<RankScore> {
        self.rules.iter().map(|r| r.evaluate(section, context)).collect()
    }

    /// Sorts candidates (highest priority first).
    ///
    /// Returns indices into `sections`.
    pub fn sort_indices(&self, sections: &[&ClassSection], context: &RankingContext) -> Vec<usize> {
        if sections.is_empty() {
            return Vec::new();
        }

        let scores: Vec<Vec<RankScore>> =
            sections.iter().map(|s| self.evaluate(s, context)).collect();
        let shuffle_keys: Option<Vec<u64>> = match self.tie_breaker {
            TieBreaker::Seeded(seed) => {
                let mut rng = SmallRng::seed_from_u64(seed);
                Some((0..sections.len()).map(|_| rng.random::<u64>()).collect())
            }
            _ => None,
        };

        let mut indices: Vec<usize> = (0..sections.len()).collect();
        indices.sort_by(|&a, &b| {
            self.compare_scores(&scores[a], &scores[b])
                .then_with(|| match self.tie_breaker {
                    TieBreaker::InputOrder => Ordering::Equal,
                    TieBreaker::ById => sections[a].id.cmp(&sections[b].id),
                    TieBreaker::Seeded(_) => match &shuffle_keys {
                        Some(keys) => keys[a].cmp(&keys[b]),
                        None => Ordering::Equal,
                    },
                })
        });

        indices
    }

    fn compare_scores(&self, a: &[RankScore], b: &[RankScore]) -> Ordering {
        for (sa, sb) in a.iter().zip(b) {
            if (sa - sb).abs() > self.epsilon {
                return sa.partial_cmp(sb).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
