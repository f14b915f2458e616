use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PackageError;

/// Decimal places used when rendering workout metrics
pub const REPORT_PRECISION: usize = 3;

/// Workout types a sensor package can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutKind {
    Swimming,
    Running,
    SportsWalking,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 3] = [
        WorkoutKind::Swimming,
        WorkoutKind::Running,
        WorkoutKind::SportsWalking,
    ];

    /// Three-letter code sent by the sensor unit
    pub fn code(&self) -> &'static str {
        match self {
            WorkoutKind::Swimming => "SWM",
            WorkoutKind::Running => "RUN",
            WorkoutKind::SportsWalking => "WLK",
        }
    }

    /// Look up a workout type by its exact sensor code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Training type name shown in reports
    pub fn name(&self) -> &'static str {
        match self {
            WorkoutKind::Swimming => "Swimming",
            WorkoutKind::Running => "Running",
            WorkoutKind::SportsWalking => "SportsWalking",
        }
    }

    /// Named fields a package of this type carries, in sensor order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            WorkoutKind::Swimming => &["action", "duration", "weight", "length_pool", "count_pool"],
            WorkoutKind::Running => &["action", "duration", "weight"],
            WorkoutKind::SportsWalking => &["action", "duration", "weight", "height"],
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkoutKind {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| PackageError::UnknownWorkoutType {
            code: s.to_string(),
        })
    }
}

/// Raw reading received from a sensor unit: a type code and its values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPackage {
    /// Workout type code (SWM, RUN, WLK)
    pub workout_type: String,

    /// Sensor values in the order given by [`WorkoutKind::fields`]
    pub data: Vec<Decimal>,
}

impl SensorPackage {
    pub fn new(workout_type: impl Into<String>, data: Vec<Decimal>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }

    /// One package of each workout type
    pub fn demo_packages() -> Vec<Self> {
        vec![
            Self::new("SWM", vec![dec!(720), dec!(1), dec!(80), dec!(25), dec!(40)]),
            Self::new("RUN", vec![dec!(15000), dec!(1), dec!(75)]),
            Self::new("WLK", vec![dec!(9000), dec!(1), dec!(75), dec!(180)]),
        ]
    }
}

/// Summary of a completed workout, ready to be printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoMessage {
    /// Training type name
    pub training_type: String,

    /// Duration in hours
    pub duration: f64,

    /// Distance in kilometers
    pub distance: f64,

    /// Mean speed in km/h
    pub speed: f64,

    /// Calories burned (kcal)
    pub calories: f64,
}

impl InfoMessage {
    /// Message line for the completed workout
    pub fn message(&self) -> String {
        format!(
            "Тип тренировки: {}; Длительность: {} ч.; Дистанция: {} км; Ср. скорость: {} км/ч; Потрачено ккал: {}.",
            self.training_type,
            format_metric(self.duration),
            format_metric(self.distance),
            format_metric(self.speed),
            format_metric(self.calories),
        )
    }

    /// Copy with every metric rounded to report precision
    pub fn rounded(&self) -> Self {
        Self {
            training_type: self.training_type.clone(),
            duration: round_metric(self.duration),
            distance: round_metric(self.distance),
            speed: round_metric(self.speed),
            calories: round_metric(self.calories),
        }
    }
}

impl fmt::Display for InfoMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Render a metric with exactly three decimal places
///
/// Rounds the exact binary value half-to-even, so `0.0195` (stored just
/// below) renders as `0.019`.
pub fn format_metric(value: f64) -> String {
    format!("{:.*}", REPORT_PRECISION, value)
}

/// The value a rendered metric reads back as
pub fn round_metric(value: f64) -> f64 {
    format_metric(value).parse().unwrap_or(value)
}
