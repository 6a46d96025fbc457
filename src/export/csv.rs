//! CSV export and import
//!
//! Both directions use the same four columns, `Date,Amount,Category,Description`,
//! with a header row. Import is row-tolerant: a row that fails validation is
//! recorded as a failure and the rest of the file is still read.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{CategorySet, Expense, DATE_FORMAT};

/// Column headers, in file order
pub const CSV_HEADERS: [&str; 4] = ["Date", "Amount", "Category", "Description"];

/// One CSV row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// 1-based data row (the header is not counted)
    pub row: usize,
    pub reason: String,
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    /// Rows that became valid expenses, in file order
    pub expenses: Vec<Expense>,
    pub failures: Vec<RowFailure>,
}

impl CsvImport {
    pub fn imported(&self) -> usize {
        self.expenses.len()
    }

    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Description")]
    description: String,
}

/// Write expenses as CSV
pub fn export_csv<'a, W: Write>(
    expenses: impl IntoIterator<Item = &'a Expense>,
    writer: W,
) -> TrackerResult<usize> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer
        .write_record(CSV_HEADERS)
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    let mut count = 0;
    for expense in expenses {
        csv_writer
            .write_record([
                expense.date().format(DATE_FORMAT).to_string(),
                expense.amount().format_plain(),
                expense.category().to_string(),
                expense.description().to_string(),
            ])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
        count += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(count)
}

/// Write expenses to a CSV file, replacing it if it exists
pub fn export_csv_file<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
    path: &Path,
) -> TrackerResult<usize> {
    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let count = export_csv(expenses, file)?;
    info!(count, path = %path.display(), "exported expenses to csv");
    Ok(count)
}

/// Read expenses from CSV with a header row
///
/// Rows are validated against `categories`; each rejected row is logged and
/// returned in `failures`. Only an unreadable header is an error.
pub fn import_csv<R: Read>(reader: R, categories: &CategorySet) -> TrackerResult<CsvImport> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    csv_reader
        .headers()
        .map_err(|e| TrackerError::Import(format!("Failed to read CSV header: {}", e)))?;

    let mut result = CsvImport::default();

    for (idx, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = idx + 1;
        let parsed = record.map_err(|e| e.to_string()).and_then(|r| {
            Expense::parse(&r.date, &r.amount, &r.category, &r.description, categories)
                .map_err(|e| e.to_string())
        });

        match parsed {
            Ok(expense) => result.expenses.push(expense),
            Err(reason) => {
                warn!(row, %reason, "skipping invalid csv row");
                result.failures.push(RowFailure { row, reason });
            }
        }
    }

    Ok(result)
}

/// Read expenses from a CSV file
pub fn import_csv_file(path: &Path, categories: &CategorySet) -> TrackerResult<CsvImport> {
    let file = File::open(path).map_err(|e| {
        TrackerError::Import(format!("CSV file not found: {} ({})", path.display(), e))
    })?;
    let result = import_csv(file, categories)?;
    info!(
        imported = result.imported(),
        skipped = result.skipped(),
        path = %path.display(),
        "imported expenses from csv"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn expense(date: &str, amount: &str, category: &str, description: &str) -> Expense {
        Expense::parse(date, amount, category, description, &CategorySet::default()).unwrap()
    }

    #[test]
    fn test_export_layout() {
        let expenses = vec![
            expense("2024-01-10", "30", "Transportation", "Taxi"),
            expense("2024-01-05", "12.5", "Food & Dining", "Lunch, with \"Sam\""),
        ];

        let mut out = Vec::new();
        let count = export_csv(&expenses, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(count, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date,Amount,Category,Description");
        assert_eq!(lines[1], "2024-01-10,30.00,Transportation,Taxi");
        assert_eq!(
            lines[2],
            "2024-01-05,12.50,Food & Dining,\"Lunch, with \"\"Sam\"\"\""
        );
    }

    #[test]
    fn test_export_empty_writes_header_only() {
        let mut out = Vec::new();
        export_csv(&Vec::<Expense>::new(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Date,Amount,Category,Description\n");
    }

    #[test]
    fn test_export_then_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.csv");
        let expenses = vec![
            expense("2024-02-01", "20", "Food & Dining", "Coffee"),
            expense("2024-01-10", "30.75", "Transportation", "Taxi, late"),
        ];

        export_csv_file(&expenses, &path).unwrap();
        let imported = import_csv_file(&path, &CategorySet::default()).unwrap();

        assert_eq!(imported.expenses, expenses);
        assert!(imported.failures.is_empty());
    }

    #[test]
    fn test_bad_rows_are_reported_and_skipped() {
        let data = "\
Date,Amount,Category,Description
2024-01-05,50,Food & Dining,Lunch
2024-13-01,10,Other,Bad month
2024-01-06,abc,Other,Bad amount
2024-01-07,5,Pets,Unknown category
2024-01-08,0.004,Other,Rounds to zero
2024-01-09,7.25,travel,Bus
2024-01-10,3
";
        let result = import_csv(data.as_bytes(), &CategorySet::default()).unwrap();

        assert_eq!(result.imported(), 2);
        assert_eq!(result.expenses[1].category(), "Travel");

        let rows: Vec<usize> = result.failures.iter().map(|f| f.row).collect();
        assert_eq!(rows, vec![2, 3, 4, 5, 7]);
        assert!(result.failures[0].reason.contains("Invalid date"));
        assert!(result.failures[2].reason.contains("Invalid category"));
    }

    #[test]
    fn test_missing_column_fails_every_row() {
        let data = "Date,Amount,Category\n2024-01-05,50,Other\n2024-01-06,20,Other\n";
        let result = import_csv(data.as_bytes(), &CategorySet::default()).unwrap();

        assert!(result.expenses.is_empty());
        assert_eq!(result.skipped(), 2);
    }

    #[test]
    fn test_missing_file_is_import_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = import_csv_file(&temp_dir.path().join("nope.csv"), &CategorySet::default());
        assert!(matches!(result, Err(TrackerError::Import(_))));
    }
}
