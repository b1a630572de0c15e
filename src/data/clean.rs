use std::collections::HashSet;

use super::model::{
    required_columns, CanonicalTable, CellValue, Column, ColumnValues, RawColumn, RawTable,
};
use super::DataError;

// ---------------------------------------------------------------------------
// Cleaning: impute medians, drop duplicate rows
// ---------------------------------------------------------------------------

/// Turn the raw table into the canonical one:
///
/// 1. Type each column: numeric when every non-missing cell is a number (and
///    at least one is), categorical otherwise.
/// 2. Replace missing values in numeric columns with the column median
///    computed over its non-missing values.
/// 3. Drop exact-duplicate rows, keeping the first occurrence.
///
/// Deterministic and idempotent: cleaning an already-clean table changes
/// nothing. Fails with [`DataError::EmptyDataset`] when no rows or no numeric
/// columns survive, and with [`DataError::Schema`] when a required column
/// turned out non-numeric.
pub fn clean(raw: RawTable) -> Result<CanonicalTable, DataError> {
    if raw.n_rows() == 0 {
        return Err(DataError::EmptyDataset);
    }
    let typed: Vec<Column> = raw.columns.iter().map(type_column).collect();

    for required in required_columns() {
        let ok = typed
            .iter()
            .any(|c| c.name == required && matches!(c.values, ColumnValues::Numeric(_)));
        if !ok {
            return Err(DataError::Schema {
                column: required.to_string(),
            });
        }
    }

    let deduped = drop_duplicate_rows(typed, raw.n_rows());
    let table = CanonicalTable::new(deduped);

    if table.is_empty() || table.numeric_columns().next().is_none() {
        return Err(DataError::EmptyDataset);
    }
    Ok(table)
}

/// Decide a raw column's type and impute its missing values.
fn type_column(raw: &RawColumn) -> Column {
    let mut numbers = Vec::with_capacity(raw.cells.len());
    let mut numeric = false;
    for cell in &raw.cells {
        match cell {
            CellValue::Number(v) => {
                numeric = true;
                numbers.push(Some(*v));
            }
            CellValue::Missing => numbers.push(None),
            CellValue::Text(_) => {
                numeric = false;
                break;
            }
        }
    }

    if numeric {
        let observed: Vec<f64> = numbers.iter().flatten().copied().collect();
        let fill = median(&observed);
        let values = numbers.into_iter().map(|v| v.unwrap_or(fill)).collect();
        Column {
            name: raw.name.clone(),
            values: ColumnValues::Numeric(values),
        }
    } else {
        // Missing text cells become empty strings.
        let values = raw.cells.iter().map(|c| match c {
            CellValue::Missing => String::new(),
            other => other.to_string(),
        });
        Column {
            name: raw.name.clone(),
            values: ColumnValues::Categorical(values.collect()),
        }
    }
}

/// Median of the observed values (pandas convention: mean of the two central
/// values for even counts). NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// A hashable key identifying one row's exact contents.
#[derive(Hash, PartialEq, Eq)]
enum RowKey {
    Bits(u64),
    Text(String),
}

fn drop_duplicate_rows(columns: Vec<Column>, n_rows: usize) -> Vec<Column> {
    let mut seen: HashSet<Vec<RowKey>> = HashSet::with_capacity(n_rows);
    let mut keep = Vec::with_capacity(n_rows);

    for row in 0..n_rows {
        let key: Vec<RowKey> = columns
            .iter()
            .map(|c| match &c.values {
                ColumnValues::Numeric(v) => RowKey::Bits(v[row].to_bits()),
                ColumnValues::Categorical(v) => RowKey::Text(v[row].clone()),
            })
            .collect();
        if seen.insert(key) {
            keep.push(row);
        }
    }

    if keep.len() == n_rows {
        return columns;
    }

    columns
        .into_iter()
        .map(|c| {
            let values = match c.values {
                ColumnValues::Numeric(v) => {
                    ColumnValues::Numeric(keep.iter().map(|&i| v[i]).collect())
                }
                ColumnValues::Categorical(v) => {
                    ColumnValues::Categorical(keep.iter().map(|&i| v[i].clone()).collect())
                }
            };
            Column {
                name: c.name,
                values,
            }
        })
        .collect()
}
