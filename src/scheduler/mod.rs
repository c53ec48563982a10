//! Selection validation and greedy schedule generation.
//!
//! Provides a conflict validator for student-built selections and a
//! requirement-directed generator that builds a schedule automatically.
//!
//! # Algorithm
//!
//! `ScheduleGenerator` is a greedy, ranking-driven, first-fit heuristic. It
//! is not optimal (it never backtracks), but it is fast and predictable.
//!
//! # Validation
//!
//! `ConflictValidator` reports every conflicting pair, total credits, and
//! non-fatal advisories. Missing ids degrade to warnings.

mod generator;
mod validator;

pub use generator::{GenerateRequest, GeneratedSchedule, ScheduleGenerator};
pub use validator::ConflictValidator;
