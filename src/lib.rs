//! Course schedule engine.
//!
//! Validates student-selected class sections for time conflicts and credit
//! load, and generates conflict-free schedules from remaining degree
//! requirements and stated preferences.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `WeeklyPattern`, `ClassSection`,
//!   `DegreeRequirementCategory`, `PreferenceRecord`, `ValidationReport`
//! - **`catalog`**: Immutable catalog snapshot with lookup and search
//! - **`validation`**: Ingestion checks (duplicate ids, bad credits, bad slots)
//! - **`requirements`**: Remaining need, projected impact, requirement tagging
//! - **`ranking`**: Rule engine ordering generator candidates
//! - **`scheduler`**: `ConflictValidator` and `ScheduleGenerator`
//! - **`config`**: Engine limits and defaults (TOML)
//!
//! # Example
//!
//! ```
//! use course_schedule::catalog::Catalog;
//! use course_schedule::models::{ClassSection, DegreeRequirementCategory, RequirementTag};
//! use course_schedule::models::{TimeSlot, Weekday, WeeklyPattern};
//! use course_schedule::scheduler::{ConflictValidator, GenerateRequest, ScheduleGenerator};
//!
//! let core = RequirementTag::new("major_core", "Major Core");
//! let catalog = Catalog::new((0..6).map(|i| {
//!     let hour = 8 + i as u16;
//!     ClassSection::new(format!("CPSC-{}-01", 300 + i), "CPSC", format!("{}", 300 + i), "01")
//!         .with_credits(3.0)
//!         .with_pattern(WeeklyPattern::new().with_days(
//!             &[Weekday::Mon, Weekday::Wed],
//!             TimeSlot::hm(hour, 0, hour, 50),
//!         ))
//!         .with_requirement(core.clone())
//! }));
//!
//! let request = GenerateRequest::new(vec![
//!     DegreeRequirementCategory::new("major_core", "Major Core", 30.0),
//! ]);
//! let schedule = ScheduleGenerator::new().generate(&catalog, &request).unwrap();
//! assert_eq!(schedule.total_credits, 18.0);
//!
//! let report = ConflictValidator::new(&catalog).validate(&schedule.section_ids);
//! assert!(report.valid);
//! ```
//!
//! # Logging
//!
//! Emits `tracing` events; install a subscriber in the host to see them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod ranking;
pub mod requirements;
pub mod scheduler;
pub mod validation;

pub use catalog::{Catalog, CatalogStats, SearchParams, SearchResult};
pub use config::EngineConfig;
pub use error::{Result, ScheduleError};
pub use scheduler::{ConflictValidator, GenerateRequest, GeneratedSchedule, ScheduleGenerator};
