//! Unified error hierarchy for workoutrs
//!
//! Package dispatch, metric calculation, import and configuration failures
//! all surface as a [`WorkoutRsError`], with severity levels that map onto
//! the tracing system.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all workoutrs operations
#[derive(Debug, Error)]
pub enum WorkoutRsError {
    /// Sensor package could not be turned into a workout
    #[error("Package error: {0}")]
    Package(#[from] PackageError),

    /// Metric calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Package file import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Report rendering errors
    #[error("Report error: {0}")]
    Report(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors raised while dispatching a sensor package to a workout variant
#[derive(Debug, Error)]
pub enum PackageError {
    /// No workout variant is registered for the code
    #[error("Unknown workout type: {code}")]
    UnknownWorkoutType { code: String },

    /// Value count does not match the variant's field list
    #[error("{code} expects {expected} values, got {actual}")]
    ArityMismatch {
        code: String,
        expected: usize,
        actual: usize,
    },

    /// A value cannot be bound to its field
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Calculation errors
#[derive(Debug, Error)]
pub enum CalculationError {
    /// The training type supplies no calorie formula
    #[error("Calorie formula not implemented for training: {training}")]
    NotImplemented { training: String },

    /// Division by zero
    #[error("Division by zero in {calculation}")]
    DivisionByZero { calculation: String },

    /// Result is not a finite number
    #[error("Numerical overflow in {calculation}")]
    Overflow { calculation: String },
}

/// Package file import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// Unsupported file format
    #[error("Unsupported format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Format-specific parsing error
    #[error("Parse error in {format} at {location}: {reason}")]
    ParseError {
        format: String,
        location: String,
        reason: String,
    },
}

/// Result type alias for workoutrs operations
pub type Result<T> = std::result::Result<T, WorkoutRsError>;

impl WorkoutRsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WorkoutRsError::Package(_) => ErrorSeverity::Error,
            WorkoutRsError::Import(_) => ErrorSeverity::Error,
            WorkoutRsError::Configuration(_) => ErrorSeverity::Warning,
            WorkoutRsError::Calculation(CalculationError::NotImplemented { .. }) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            WorkoutRsError::Package(PackageError::UnknownWorkoutType { code }) => {
                format!(
                    "Unknown workout type '{}'. Supported codes: SWM, RUN, WLK.",
                    code
                )
            }
            WorkoutRsError::Package(PackageError::ArityMismatch {
                code,
                expected,
                actual,
            }) => {
                format!(
                    "Workout type {} takes {} sensor values but {} were given.",
                    code, expected, actual
                )
            }
            WorkoutRsError::Calculation(CalculationError::DivisionByZero { calculation }) => {
                format!(
                    "Cannot calculate {}: a divisor (duration or height) is zero.",
                    calculation
                )
            }
            WorkoutRsError::Calculation(CalculationError::Overflow { calculation }) => {
                format!(
                    "Cannot calculate {}: the sensor values are too large.",
                    calculation
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Programming error in a training implementation
    Critical,
    /// Error that aborts the current run
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = WorkoutRsError::Calculation(CalculationError::NotImplemented {
            training: "Training".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = WorkoutRsError::Configuration("bad".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_user_messages() {
        let err = WorkoutRsError::Package(PackageError::UnknownWorkoutType {
            code: "XYZ".to_string(),
        });
        assert!(err.user_message().contains("'XYZ'"));

        let err = WorkoutRsError::Package(PackageError::ArityMismatch {
            code: "RUN".to_string(),
            expected: 3,
            actual: 2,
        });
        assert!(err.user_message().contains("takes 3 sensor values but 2"));

        let err = WorkoutRsError::Calculation(CalculationError::Overflow {
            calculation: "mean speed".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(err.user_message().contains("too large"));
    }

    #[test]
    fn test_display_includes_category() {
        let err: WorkoutRsError = CalculationError::DivisionByZero {
            calculation: "mean speed".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Calculation error: Division by zero in mean speed"
        );
    }
}
