//! Sensor package dispatch
//!
//! Maps a workout type code to its variant and binds the package values to
//! the variant's named fields before construction.

use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::error::{PackageError, Result};
use crate::models::{InfoMessage, SensorPackage, WorkoutKind};
use crate::training::{Running, SportsWalking, Swimming, Training};

/// Package values bound to the field names of one workout type
#[derive(Debug, Clone)]
pub struct PackageFields {
    kind: WorkoutKind,
    values: Vec<(&'static str, Decimal)>,
}

impl PackageFields {
    /// Pair each value with its field name, rejecting wrong value counts
    pub fn bind(kind: WorkoutKind, data: &[Decimal]) -> std::result::Result<Self, PackageError> {
        let fields = kind.fields();
        if fields.len() != data.len() {
            return Err(PackageError::ArityMismatch {
                code: kind.code().to_string(),
                expected: fields.len(),
                actual: data.len(),
            });
        }

        Ok(Self {
            kind,
            values: fields.iter().copied().zip(data.iter().copied()).collect(),
        })
    }

    pub fn kind(&self) -> WorkoutKind {
        self.kind
    }

    /// Value bound to `field`, as the nearest `f64` to its decimal digits
    pub fn value(&self, field: &str) -> std::result::Result<f64, PackageError> {
        let value = self
            .values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
            .ok_or_else(|| PackageError::InvalidValue {
                field: field.to_string(),
                reason: format!("not a field of {}", self.kind.code()),
            })?;

        // Parsing the decimal text rounds correctly, `Decimal::to_f64` does not always
        value
            .to_string()
            .parse::<f64>()
            .map_err(|e| PackageError::InvalidValue {
                field: field.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Build the workout described by a sensor package
#[instrument(level = "debug", skip(data), fields(values = data.len()))]
pub fn read_package(workout_type: &str, data: &[Decimal]) -> Result<Box<dyn Training>> {
    let kind: WorkoutKind = workout_type.parse()?;
    let fields = PackageFields::bind(kind, data)?;

    let training: Box<dyn Training> = match kind {
        WorkoutKind::Swimming => Box::new(Swimming::new(
            fields.value("action")?,
            fields.value("duration")?,
            fields.value("weight")?,
            fields.value("length_pool")?,
            fields.value("count_pool")?,
        )),
        WorkoutKind::Running => Box::new(Running::new(
            fields.value("action")?,
            fields.value("duration")?,
            fields.value("weight")?,
        )),
        WorkoutKind::SportsWalking => Box::new(SportsWalking::new(
            fields.value("action")?,
            fields.value("duration")?,
            fields.value("weight")?,
            fields.value("height")?,
        )),
    };

    debug!(training = training.name(), "Package dispatched");
    Ok(training)
}

/// Build and summarize one sensor package
pub fn process_package(package: &SensorPackage) -> Result<InfoMessage> {
    read_package(&package.workout_type, &package.data)?.show_training_info()
}

/// Summarize packages in order, stopping at the first failure
pub fn process_packages(packages: &[SensorPackage]) -> Result<Vec<InfoMessage>> {
    let mut messages = Vec::with_capacity(packages.len());
    for (index, package) in packages.iter().enumerate() {
        let message = process_package(package)?;
        info!(
            index,
            workout_type = package.workout_type.as_str(),
            "Processed sensor package"
        );
        messages.push(message);
    }
    Ok(messages)
}
