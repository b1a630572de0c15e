use std::fmt;

// ---------------------------------------------------------------------------
// Required dataset schema
// ---------------------------------------------------------------------------

pub const INCOME: &str = "Income";
pub const RESPONSE: &str = "Response";
pub const COMPLAIN: &str = "Complain";
pub const KIDHOME: &str = "Kidhome";

/// The five historical campaign indicator columns, in declaration order.
/// Declaration order matters: ties in "best campaign" go to the earlier one.
pub const CAMPAIGNS: [&str; 5] = [
    "AcceptedCmp1",
    "AcceptedCmp2",
    "AcceptedCmp3",
    "AcceptedCmp4",
    "AcceptedCmp5",
];

/// Per-category spend columns.
pub const SPEND_COLUMNS: [&str; 6] = [
    "MntWines",
    "MntFruits",
    "MntMeatProducts",
    "MntFishProducts",
    "MntSweetProducts",
    "MntGoldProds",
];

/// Every column the loader refuses to proceed without.
pub fn required_columns() -> Vec<&'static str> {
    let mut cols = vec![INCOME, RESPONSE, COMPLAIN, KIDHOME];
    cols.extend(CAMPAIGNS);
    cols.extend(SPEND_COLUMNS);
    cols
}

// ---------------------------------------------------------------------------
// CellValue – a single raw cell before cleaning
// ---------------------------------------------------------------------------

/// A dynamically-typed raw cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – loader output, column-oriented
// ---------------------------------------------------------------------------

/// One named column of raw cells.
#[derive(Debug, Clone)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<CellValue>,
}

/// The table as loaded from disk: ordered columns, uniform row count,
/// missing values still present.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

// ---------------------------------------------------------------------------
// CanonicalTable – the cleaned, deduplicated dataset
// ---------------------------------------------------------------------------

/// Values of one cleaned column. Numeric columns are guaranteed free of
/// missing values after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
        }
    }
}

/// The cleaned dataset held for the process lifetime. Immutable after
/// cleaning: no duplicate rows, no missing values in numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    pub columns: Vec<Column>,
    n_rows: usize,
}

impl CanonicalTable {
    /// Build a table from cleaned columns. All columns must share one length.
    pub fn new(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map_or(0, Column::len);
        debug_assert!(columns.iter().all(|c| c.len() == n_rows));
        CanonicalTable { columns, n_rows }
    }

    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Values of a numeric column, if a column of that name exists and is
    /// numeric.
    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| match &c.values {
                ColumnValues::Numeric(v) => Some(v.as_slice()),
                ColumnValues::Categorical(_) => None,
            })
    }

    /// All numeric columns in declaration order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().filter_map(|c| match &c.values {
            ColumnValues::Numeric(v) => Some((c.name.as_str(), v.as_slice())),
            ColumnValues::Categorical(_) => None,
        })
    }

    /// Observed min/max of a numeric column. `None` when the column is
    /// absent, non-numeric, or has no rows.
    pub fn numeric_bounds(&self, name: &str) -> Option<(f64, f64)> {
        let values = self.numeric(name)?;
        if values.is_empty() {
            return None;
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}
