//! Error taxonomy for the schedule engine.
//!
//! Only caller mistakes surface as errors. An infeasible generation is a
//! normal [`GeneratedSchedule`](crate::scheduler::GeneratedSchedule) with a
//! message, and unresolvable ids in a selection degrade to warnings.

use thiserror::Error;

/// Errors returned by engine operations.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A referenced section id does not exist in the catalog.
    #[error("Section not found: {id}")]
    NotFound { id: String },

    /// Malformed request parameters (e.g. `credits_min > credits_max`).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Engine configuration is inconsistent.
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = ScheduleError::NotFound {
            id: "CPSC-350-01".into(),
        };
        assert_eq!(e.to_string(), "Section not found: CPSC-350-01");

        let e = ScheduleError::invalid("credits_min exceeds credits_max");
        assert!(e.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let e: ScheduleError = err.into();
        assert!(matches!(e, ScheduleError::Json(_)));
    }
}
