//! Workout variants and their metric formulas
//!
//! Every variant shares the [`Training`] contract: distance from the action
//! count and step length, mean speed from distance over duration, and a
//! variant-specific calorie formula. Only the calorie formula has no
//! default; a variant that does not provide one fails when asked.
//!
//! Metrics are computed in `f64`, in the same operation order as the
//! formulas are written, so rounding to the report precision is stable
//! across implementations of the tracker.

use tracing::debug;

use crate::error::{CalculationError, Result};
use crate::models::{InfoMessage, WorkoutKind};

/// Step length in meters for running and walking
pub const LEN_STEP: f64 = 0.65;
/// Stroke length in meters for swimming
pub const LEN_STROKE: f64 = 1.38;
pub const M_IN_KM: f64 = 1000.0;
pub const MIN_IN_H: f64 = 60.0;

/// Readings every workout variant carries
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingBase {
    /// Steps or strokes taken
    pub action: f64,
    /// Duration in hours
    pub duration: f64,
    /// Athlete weight in kg
    pub weight: f64,
}

impl TrainingBase {
    pub fn new(action: f64, duration: f64, weight: f64) -> Self {
        Self {
            action,
            duration,
            weight,
        }
    }
}

/// Common contract of all workout variants
pub trait Training {
    /// Training type name used in reports
    fn name(&self) -> &'static str;

    fn base(&self) -> &TrainingBase;

    /// Distance covered by one action, in meters
    fn step_length(&self) -> f64 {
        LEN_STEP
    }

    /// Distance in km
    fn distance(&self) -> f64 {
        self.base().action * self.step_length() / M_IN_KM
    }

    /// Mean speed in km/h
    fn mean_speed(&self) -> Result<f64> {
        checked_div(self.distance(), self.base().duration, "mean speed")
    }

    /// Calories burned during the workout
    fn spent_calories(&self) -> Result<f64> {
        Err(CalculationError::NotImplemented {
            training: self.name().to_string(),
        }
        .into())
    }

    /// Summarize the workout for printing
    fn show_training_info(&self) -> Result<InfoMessage> {
        let info = InfoMessage {
            training_type: self.name().to_string(),
            duration: finite(self.base().duration, "duration")?,
            distance: finite(self.distance(), "distance")?,
            speed: self.mean_speed()?,
            calories: self.spent_calories()?,
        };

        debug!(
            training = info.training_type.as_str(),
            distance = info.distance,
            speed = info.speed,
            calories = info.calories,
            "Computed training metrics"
        );

        Ok(info)
    }
}

/// Reject infinite or NaN intermediate results
fn finite(value: f64, calculation: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalculationError::Overflow {
            calculation: calculation.to_string(),
        }
        .into())
    }
}

fn checked_div(numerator: f64, divisor: f64, calculation: &str) -> Result<f64> {
    if divisor == 0.0 {
        return Err(CalculationError::DivisionByZero {
            calculation: calculation.to_string(),
        }
        .into());
    }
    finite(numerator / divisor, calculation)
}

/// Floor division rounding toward negative infinity, exact for float operands
fn floor_div(numerator: f64, divisor: f64, calculation: &str) -> Result<f64> {
    if divisor == 0.0 {
        return Err(CalculationError::DivisionByZero {
            calculation: calculation.to_string(),
        }
        .into());
    }

    let remainder = numerator % divisor;
    let mut quotient = (numerator - remainder) / divisor;
    if remainder != 0.0 && (divisor < 0.0) != (remainder < 0.0) {
        quotient -= 1.0;
    }

    let floored = quotient.floor();
    let result = if quotient - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    };
    finite(result, calculation)
}

/// Running: calories grow with mean speed
#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    pub base: TrainingBase,
}

impl Running {
    const CALORIES_SPEED_MULTIPLIER: f64 = 18.0;
    const CALORIES_SPEED_SHIFT: f64 = 20.0;

    pub fn new(action: f64, duration: f64, weight: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration, weight),
        }
    }
}

impl Training for Running {
    fn name(&self) -> &'static str {
        WorkoutKind::Running.name()
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn spent_calories(&self) -> Result<f64> {
        let speed = self.mean_speed()?;
        finite(
            (Self::CALORIES_SPEED_MULTIPLIER * speed - Self::CALORIES_SPEED_SHIFT)
                * self.base.weight
                / M_IN_KM
                * (self.base.duration * MIN_IN_H),
            "running calories",
        )
    }
}

/// Sports walking: calories depend on weight and height
#[derive(Debug, Clone, PartialEq)]
pub struct SportsWalking {
    pub base: TrainingBase,
    /// Athlete height
    pub height: f64,
}

impl SportsWalking {
    const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
    const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;

    pub fn new(action: f64, duration: f64, weight: f64, height: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration, weight),
            height,
        }
    }
}

impl Training for SportsWalking {
    fn name(&self) -> &'static str {
        WorkoutKind::SportsWalking.name()
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    // Squares the distance, then floor-divides by height.
    fn spent_calories(&self) -> Result<f64> {
        let squared = finite(self.distance().powi(2), "walking calories")?;
        let height_term = floor_div(squared, self.height, "walking calories")?;
        finite(
            (Self::CALORIES_WEIGHT_MULTIPLIER * self.base.weight
                + height_term * Self::CALORIES_SPEED_HEIGHT_MULTIPLIER * self.base.weight)
                * self.base.duration
                * MIN_IN_H,
            "walking calories",
        )
    }
}

/// Pool swimming: speed comes from pool laps, not strokes
#[derive(Debug, Clone, PartialEq)]
pub struct Swimming {
    pub base: TrainingBase,
    /// Pool length in meters
    pub length_pool: f64,
    /// Number of pool lengths swum
    pub count_pool: f64,
}

impl Swimming {
    const CALORIES_SPEED_SHIFT: f64 = 1.1;
    const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;

    pub fn new(action: f64, duration: f64, weight: f64, length_pool: f64, count_pool: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration, weight),
            length_pool,
            count_pool,
        }
    }
}

impl Training for Swimming {
    fn name(&self) -> &'static str {
        WorkoutKind::Swimming.name()
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn step_length(&self) -> f64 {
        LEN_STROKE
    }

    fn mean_speed(&self) -> Result<f64> {
        let pool_km = finite(self.length_pool * self.count_pool / M_IN_KM, "mean speed")?;
        checked_div(pool_km, self.base.duration, "mean speed")
    }

    fn spent_calories(&self) -> Result<f64> {
        finite(
            (self.mean_speed()? + Self::CALORIES_SPEED_SHIFT)
                * Self::CALORIES_WEIGHT_MULTIPLIER
                * self.base.weight,
            "swimming calories",
        )
    }
}
