//! Portfolio CSV parsing.
//!
//! The uploaded spreadsheet must carry the columns `Name`, `Portfolio Link`,
//! and `Tech Stack` — one portfolio entry per row.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// One row of the uploaded portfolio spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Portfolio Link")]
    pub link: String,
    #[serde(rename = "Tech Stack")]
    pub skills: String,
}

/// Parses uploaded CSV bytes into portfolio entries, preserving row order.
/// A missing column or malformed row fails the whole upload.
pub fn parse_portfolio_csv(data: &[u8]) -> Result<Vec<PortfolioEntry>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<PortfolioEntry>().enumerate() {
        let entry = record.map_err(|e| {
            AppError::Validation(format!("portfolio CSV row {}: {e}", i + 1))
        })?;
        rows.push(entry);
    }

    if rows.is_empty() {
        return Err(AppError::Validation(
            "portfolio CSV contains no data rows".to_string(),
        ));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Name,Portfolio Link,Tech Stack
Alice,https://alice.dev,\"Rust, Tokio, PostgreSQL\"
Bob,https://bob.dev,\"Python, Django\"
Carol,https://carol.dev,\"TypeScript, React\"
";

    #[test]
    fn test_parses_rows_in_order() {
        let rows = parse_portfolio_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].link, "https://alice.dev");
        assert_eq!(rows[0].skills, "Rust, Tokio, PostgreSQL");
        assert_eq!(rows[2].name, "Carol");
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "Name,Tech Stack\nAlice,Rust\n";
        let err = parse_portfolio_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_header_only_file_fails() {
        let csv = "Name,Portfolio Link,Tech Stack\n";
        let err = parse_portfolio_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let csv = "Name,Portfolio Link,Tech Stack\n Alice , https://alice.dev , Rust \n";
        let rows = parse_portfolio_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].skills, "Rust");
    }
}
