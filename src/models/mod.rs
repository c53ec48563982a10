//! Schedule engine domain models.
//!
//! Provides the core data types for course scheduling: the weekly time
//! model, catalog sections, degree-requirement categories, student
//! preferences, and selection results.
//!
//! # Domain Mappings
//!
//! | Model | Meaning |
//! |-------|---------|
//! | `TimeSlot` | One meeting interval on one day |
//! | `WeeklyPattern` | Recurring day/time structure of a section |
//! | `ClassSection` | One offered instance of a course |
//! | `DegreeRequirementCategory` | A degree bucket with a credit target |
//! | `PreferenceRecord` | Optional student preferences |
//! | `ScheduleSelection` | Ordered list of chosen section ids |

mod preference;
mod requirement;
mod section;
mod selection;
mod time;

pub(crate) use preference::EPSILON;
pub(crate) use section::course_level;

pub use preference::{CreditRange, PreferenceRecord};
pub use requirement::{DegreeRequirementCategory, MatchCriteria, RequirementType};
pub use section::{sections_conflict, ClassSection, RequirementTag};
pub use selection::{ConflictInfo, ScheduleSelection, ScheduleSnapshot, ValidationReport};
pub use time::{format_minutes, TimeOfDay, TimeSlot, Weekday, WeeklyPattern, MINUTES_PER_DAY};
