use super::model::{CanonicalTable, INCOME};

// ---------------------------------------------------------------------------
// Filter criterion: closed income range selected in the sidebar
// ---------------------------------------------------------------------------

/// The single filter the dashboard exposes: a closed `[min, max]` range over
/// the `Income` column. Both ends inclusive; `min == max` is a valid
/// degenerate range selecting exactly that income.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomeRange {
    pub min: f64,
    pub max: f64,
}

impl IncomeRange {
    pub fn contains(&self, income: f64) -> bool {
        self.min <= income && income <= self.max
    }

    /// Clamp this range into the observed `[lo, hi]` column bounds.
    pub fn clamped_to(self, lo: f64, hi: f64) -> IncomeRange {
        IncomeRange {
            min: self.min.clamp(lo, hi),
            max: self.max.clamp(lo, hi),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the rows matching the current range
// ---------------------------------------------------------------------------

/// A borrowed subset of the canonical table: the table plus the indices of
/// rows whose income falls in the active range. Recomputed from scratch on
/// every filter change; owns nothing beyond the index list.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a CanonicalTable,
    pub indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over every row, used at startup before any filtering.
    pub fn all(table: &'a CanonicalTable) -> Self {
        FilteredView {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Gather the filtered values of one numeric column.
    pub fn numeric(&self, name: &str) -> Option<Vec<f64>> {
        let values = self.table.numeric(name)?;
        Some(self.indices.iter().map(|&i| values[i]).collect())
    }

    /// Gather every numeric column, in declaration order.
    pub fn numeric_columns(&self) -> Vec<(&'a str, Vec<f64>)> {
        self.table
            .numeric_columns()
            .map(|(name, values)| (name, self.indices.iter().map(|&i| values[i]).collect()))
            .collect()
    }
}

/// Select the rows whose income lies within the range, inclusive on both
/// ends. An empty result is fine; every downstream transform must cope.
pub fn filtered_view<'a>(table: &'a CanonicalTable, range: &IncomeRange) -> FilteredView<'a> {
    let indices = match table.numeric(INCOME) {
        Some(values) => values
            .iter()
            .enumerate()
            .filter(|(_, &v)| range.contains(v))
            .map(|(i, _)| i)
            .collect(),
        // Unreachable once cleaning has validated the schema.
        None => Vec::new(),
    };
    FilteredView { table, indices }
}
