// Library interface for workoutrs modules
// This allows integration tests and benches to access the core functionality

pub mod config;
pub mod error;
pub mod import;
pub mod logging;
pub mod models;
pub mod reading;
pub mod report;
pub mod training;

// Re-export commonly used types for convenience
pub use models::*;
pub use config::AppConfig;
pub use error::{Result, WorkoutRsError};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use reading::{process_package, process_packages, read_package};
pub use report::{render, render_to_string, OutputFormat};
pub use training::{Running, SportsWalking, Swimming, Training, TrainingBase};
