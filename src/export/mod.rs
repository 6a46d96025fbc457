//! Export module for the expense tracker
//!
//! CSV is the only exchange format; it is read back by import as well.

pub mod csv;

pub use self::csv::{
    export_csv, export_csv_file, import_csv, import_csv_file, CsvImport, RowFailure, CSV_HEADERS,
};
