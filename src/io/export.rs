//! Export explorer rows to CSV and any payload to JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets; headers follow the
//! source dataset's column names (`Company_ID`, `Company_Name`, ...).

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::CompanyRecord;
use crate::error::{AppError, EXIT_USAGE};

/// Write companies to a CSV file at `path`.
pub fn write_companies_csv(path: &Path, companies: &[CompanyRecord]) -> Result<(), AppError> {
    let writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(EXIT_USAGE, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_companies(writer, companies)
}

/// Write companies as CSV to any writer (header row always present).
pub fn write_companies<W: Write>(mut writer: csv::Writer<W>, companies: &[CompanyRecord]) -> Result<(), AppError> {
    if companies.is_empty() {
        // `serialize` emits the header with the first row; write it by hand for empty exports.
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV header: {e}")))?;
    }
    for c in companies {
        writer
            .serialize(c)
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

const CSV_HEADER: [&str; 14] = [
    "Company_ID",
    "Company_Name",
    "Sector",
    "Location",
    "Founded_Year",
    "Employee_Count",
    "Primary_Products",
    "Credit_Rating",
    "Risk_Level",
    "Market_Outlook",
    "Revenue_2024",
    "Net_Profit_2024",
    "Profit_Margin",
    "Growth_Rate",
];

/// Pretty JSON for stdout.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to serialize JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_companies;

    #[test]
    fn csv_export_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("companies.csv");
        let companies = sample_companies();
        write_companies_csv(&path, &companies[..2]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert!(lines.next().unwrap().starts_with("MSME001,Oilmax Systems Pvt Ltd,Manufacturing"));
        assert_eq!(text.lines().count(), 3);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let back: Vec<CompanyRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(back, companies[..2].to_vec());
    }

    #[test]
    fn empty_export_still_has_header() {
        let mut buf = Vec::new();
        write_companies(csv::Writer::from_writer(&mut buf), &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim_end(), CSV_HEADER.join(","));
    }

    #[test]
    fn json_is_pretty() {
        let json = to_json(&sample_companies()[0]).unwrap();
        assert!(json.contains("\n  \"Company_ID\": \"MSME001\""));
    }
}
