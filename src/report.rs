//! Rendering of workout summaries
//!
//! Text output is the message line per workout. JSON, CSV and table
//! renderings carry the same metrics rounded to three decimal places.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

use crate::error::{Result, WorkoutRsError};
use crate::models::{format_metric, InfoMessage};

/// Output format types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
    Table,
}

impl FromStr for OutputFormat {
    type Err = WorkoutRsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            _ => Err(WorkoutRsError::Configuration(format!(
                "Unsupported output format: {}",
                s
            ))),
        }
    }
}

#[derive(Serialize, Tabled)]
struct FormattedRow {
    #[tabled(rename = "Training")]
    training_type: String,
    #[tabled(rename = "Duration, h")]
    duration: String,
    #[tabled(rename = "Distance, km")]
    distance: String,
    #[tabled(rename = "Speed, km/h")]
    speed: String,
    #[tabled(rename = "Calories, kcal")]
    calories: String,
}

impl From<&InfoMessage> for FormattedRow {
    fn from(info: &InfoMessage) -> Self {
        Self {
            training_type: info.training_type.clone(),
            duration: format_metric(info.duration),
            distance: format_metric(info.distance),
            speed: format_metric(info.speed),
            calories: format_metric(info.calories),
        }
    }
}

/// Write the summaries to `writer` in the requested format
pub fn render<W: Write>(messages: &[InfoMessage], format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for info in messages {
                writeln!(writer, "{}", info.message())?;
            }
        }
        OutputFormat::Json => {
            let rounded: Vec<InfoMessage> = messages.iter().map(InfoMessage::rounded).collect();
            let json = serde_json::to_string_pretty(&rounded)
                .map_err(|e| WorkoutRsError::Report(e.to_string()))?;
            writeln!(writer, "{}", json)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut *writer);
            for info in messages {
                csv_writer
                    .serialize(FormattedRow::from(info))
                    .map_err(|e| WorkoutRsError::Report(e.to_string()))?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Table => {
            let rows: Vec<FormattedRow> = messages.iter().map(FormattedRow::from).collect();
            let mut table = Table::new(rows);
            table.with(Style::modern());
            writeln!(writer, "{}", table)?;
        }
    }

    Ok(())
}

/// Render the summaries into a string
pub fn render_to_string(messages: &[InfoMessage], format: OutputFormat) -> Result<String> {
    let mut buffer = Vec::new();
    render(messages, format, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| WorkoutRsError::Report(e.to_string()))
}
