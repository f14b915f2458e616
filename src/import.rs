use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::models::SensorPackage;

/// Supported package file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Detect the format from the file extension
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(ImportFormat::Json),
            "csv" => Some(ImportFormat::Csv),
            _ => None,
        }
    }
}

/// Load sensor packages from a JSON or CSV file
pub fn load_packages(path: &Path) -> Result<Vec<SensorPackage>> {
    let format = ImportFormat::detect(path).ok_or_else(|| ImportError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let packages = match format {
        ImportFormat::Json => parse_json(&fs::read_to_string(path)?)?,
        ImportFormat::Csv => parse_csv(fs::File::open(path)?)?,
    };

    info!(
        path = %path.display(),
        format = ?format,
        count = packages.len(),
        "Loaded sensor packages"
    );
    Ok(packages)
}

/// Parse a JSON array of `{ "workout_type": .., "data": [..] }` objects
pub fn parse_json(content: &str) -> Result<Vec<SensorPackage>> {
    serde_json::from_str(content).map_err(|e| {
        ImportError::ParseError {
            format: "json".to_string(),
            location: format!("line {}, column {}", e.line(), e.column()),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Parse headerless CSV rows of the form `CODE,v1,v2,...`
///
/// Rows may differ in length; lines starting with `#` are skipped.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<SensorPackage>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut packages = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let location = format!("row {}", row + 1);
        let record = record.map_err(|e| ImportError::ParseError {
            format: "csv".to_string(),
            location: location.clone(),
            reason: e.to_string(),
        })?;

        let mut fields = record.iter();
        let Some(workout_type) = fields.next().filter(|code| !code.is_empty()) else {
            debug!(%location, "Skipping empty row");
            continue;
        };

        let data = fields
            .map(|field| {
                Decimal::from_str(field)
                    .or_else(|_| Decimal::from_scientific(field))
                    .map_err(|e| ImportError::ParseError {
                    format: "csv".to_string(),
                    location: location.clone(),
                    reason: format!("'{}': {}", field, e),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        packages.push(SensorPackage::new(workout_type, data));
    }

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkoutRsError;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_parse_json() {
        let content = r#"[
            {"workout_type": "SWM", "data": [720, 1, 80, 25, 40]},
            {"workout_type": "RUN", "data": [15000, 1.5, 75]}
        ]"#;
        let packages = parse_json(content).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].workout_type, "SWM");
        assert_eq!(packages[1].data, vec![dec!(15000), dec!(1.5), dec!(75)]);
    }

    #[test]
    fn test_parse_json_reports_location() {
        match parse_json("[{\"workout_type\": \"RUN\"}]") {
            Err(WorkoutRsError::Import(ImportError::ParseError { format, .. })) => {
                assert_eq!(format, "json");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_csv_variable_rows() {
        let content = "# sensor dump\nSWM, 720, 1, 80, 25, 40\nRUN,15000,1,75\n\nWLK,9000,1,75,180\n";
        let packages = parse_csv(content.as_bytes()).unwrap();
        assert_eq!(packages, SensorPackage::demo_packages());
    }

    #[test]
    fn test_parse_csv_scientific_notation() {
        let packages = parse_csv("SWM,720,1,80,1e20,2.5e3\n".as_bytes()).unwrap();
        assert_eq!(packages[0].data[3], dec!(100000000000000000000));
        assert_eq!(packages[0].data[4], dec!(2500));
    }

    #[test]
    fn test_parse_csv_rejects_bad_number() {
        let result = parse_csv("RUN,15000,one,75\n".as_bytes());
        match result {
            Err(WorkoutRsError::Import(ImportError::ParseError { location, reason, .. })) => {
                assert_eq!(location, "row 1");
                assert!(reason.contains("'one'"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_packages_by_extension() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "RUN,15000,1,75").unwrap();
        let packages = load_packages(file.path()).unwrap();
        assert_eq!(packages.len(), 1);

        let unknown = Builder::new().suffix(".xml").tempfile().unwrap();
        assert!(matches!(
            load_packages(unknown.path()),
            Err(WorkoutRsError::Import(ImportError::UnsupportedFormat { .. }))
        ));
    }
}
