/// Data layer: core types, loading, cleaning, and filtering.
///
/// Architecture:
/// ```text
///  ifood_df.csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, check schema → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  impute medians, drop duplicates → CanonicalTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  income range predicate → FilteredView
///   └──────────┘
/// ```
pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;

use thiserror::Error;

/// Everything that can go wrong between the source file and the canonical
/// table. All of these are fatal at startup: no partial dashboard is shown.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed input at row {row}: {detail}")]
    Malformed { row: usize, detail: String },

    #[error("required column '{column}' is missing or non-numeric")]
    Schema { column: String },

    #[error("dataset is empty after cleaning (no rows or no numeric columns)")]
    EmptyDataset,
}
