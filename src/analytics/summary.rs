use crate::data::filter::FilteredView;

use super::{mean, sample_var};

// ---------------------------------------------------------------------------
// Descriptive statistics (the `describe()` table)
// ---------------------------------------------------------------------------

/// Descriptive statistics of one numeric column over the filtered rows.
/// All fields except `count` are NaN when the view is empty.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Per-column count, mean, sample std, min, quartiles, max.
pub fn describe(view: &FilteredView) -> Vec<ColumnSummary> {
    view.numeric_columns()
        .into_iter()
        .map(|(name, values)| summarize(name, &values))
        .collect()
}

fn summarize(name: &str, values: &[f64]) -> ColumnSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    ColumnSummary {
        name: name.to_string(),
        count: values.len(),
        mean: mean(values),
        std: sample_var(values).sqrt(),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear-interpolation quantile over pre-sorted values (pandas `describe`
/// convention). NaN for an empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + frac * (sorted[upper] - sorted[lower])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CanonicalTable, Column, ColumnValues};
    use approx::assert_relative_eq;

    fn view_of(values: Vec<f64>) -> CanonicalTable {
        CanonicalTable::new(vec![Column {
            name: "Income".to_string(),
            values: ColumnValues::Numeric(values),
        }])
    }

    #[test]
    fn describe_matches_pandas_conventions() {
        let table = view_of(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let view = FilteredView::all(&table);
        let summaries = describe(&view);
        assert_eq!(summaries.len(), 1);

        let s = &summaries[0];
        assert_eq!(s.count, 5);
        assert_relative_eq!(s.mean, 3.0);
        assert_relative_eq!(s.std, 2.5f64.sqrt());
        assert_relative_eq!(s.min, 1.0);
        assert_relative_eq!(s.q1, 2.0);
        assert_relative_eq!(s.median, 3.0);
        assert_relative_eq!(s.q3, 4.0);
        assert_relative_eq!(s.max, 5.0);
    }

    #[test]
    fn quantiles_interpolate_between_values() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(quantile(&sorted, 0.25), 1.75);
        assert_relative_eq!(quantile(&sorted, 0.5), 2.5);
        assert_relative_eq!(quantile(&sorted, 0.75), 3.25);
    }

    #[test]
    fn empty_view_yields_nan_not_panic() {
        let table = view_of(vec![]);
        let view = FilteredView::all(&table);
        let s = &describe(&view)[0];
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.min.is_nan());
        assert!(s.median.is_nan());
    }
}
