use nalgebra::DMatrix;

use crate::data::filter::FilteredView;

use super::AnalyticsError;

// ---------------------------------------------------------------------------
// Standardized PCA: explained-variance fractions of the top components
// ---------------------------------------------------------------------------

/// Number of components reported, fixed by the dashboard layout.
pub const N_COMPONENTS: usize = 5;

/// Fraction of total variance captured by each of the top components, in
/// descending order. Always `N_COMPONENTS` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceDecomposition {
    pub fractions: Vec<f64>,
}

/// Standardize every numeric column to zero mean and unit variance using
/// population statistics of the *filtered rows only*, then eigendecompose
/// the sample covariance of the standardized matrix and report the top-5
/// explained-variance fractions.
///
/// Scaling on the filtered rows (not the canonical table) is deliberate:
/// the same income value can standardize differently under two different
/// filter ranges. Constant columns pass through centered but unscaled.
///
/// Needs at least `N_COMPONENTS` numeric columns and `N_COMPONENTS + 1`
/// rows; anything less is an insufficient-data error that degrades only
/// this widget.
pub fn variance_decomposition(
    view: &FilteredView,
) -> Result<VarianceDecomposition, AnalyticsError> {
    let columns = view.numeric_columns();
    let n_rows = view.len();
    let n_cols = columns.len();

    if n_cols < N_COMPONENTS || n_rows < N_COMPONENTS + 1 {
        return Err(AnalyticsError::InsufficientData {
            needed_cols: N_COMPONENTS,
            needed_rows: N_COMPONENTS + 1,
            cols: n_cols,
            rows: n_rows,
        });
    }

    // Column-wise standardization, population variance (ddof = 0).
    let standardized: Vec<Vec<f64>> = columns
        .iter()
        .map(|(_, values)| standardize(values))
        .collect();

    let x = DMatrix::from_fn(n_rows, n_cols, |i, j| standardized[j][i]);
    let cov = (x.transpose() * &x) / (n_rows as f64 - 1.0);

    let mut eigenvalues: Vec<f64> = cov
        .symmetric_eigen()
        .eigenvalues
        .iter()
        // Tiny negative eigenvalues are numerical noise.
        .map(|&ev| ev.max(0.0))
        .collect();
    eigenvalues.sort_by(|a, b| b.total_cmp(a));

    let total: f64 = eigenvalues.iter().sum();
    let fractions = eigenvalues
        .into_iter()
        .take(N_COMPONENTS)
        .map(|ev| ev / total)
        .collect();

    Ok(VarianceDecomposition { fractions })
}

/// Zero mean, unit population variance. A constant column comes back as all
/// zeros (centered, scale left at 1), matching sklearn's `StandardScaler`.
fn standardize(values: &[f64]) -> Vec<f64> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let pop_var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let scale = if pop_var > 0.0 { pop_var.sqrt() } else { 1.0 };
    values.iter().map(|v| (v - mean) / scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CanonicalTable, Column, ColumnValues};
    use approx::assert_relative_eq;

    fn table(cols: Vec<(&str, Vec<f64>)>) -> CanonicalTable {
        CanonicalTable::new(
            cols.into_iter()
                .map(|(name, values)| Column {
                    name: name.to_string(),
                    values: ColumnValues::Numeric(values),
                })
                .collect(),
        )
    }

    /// Five deterministic pseudo-random-ish columns, ten rows.
    fn wide_table() -> CanonicalTable {
        let series = |a: f64, b: f64| -> Vec<f64> {
            (0..10).map(|i| (i as f64 * a + b).sin() * 10.0 + i as f64).collect()
        };
        table(vec![
            ("c1", series(1.3, 0.2)),
            ("c2", series(2.7, 1.1)),
            ("c3", series(0.9, 2.3)),
            ("c4", series(3.1, 0.7)),
            ("c5", series(1.9, 1.9)),
        ])
    }

    #[test]
    fn fractions_are_sorted_bounded_and_sum_below_one() {
        let t = wide_table();
        let view = FilteredView::all(&t);
        let v = variance_decomposition(&view).unwrap();

        assert_eq!(v.fractions.len(), N_COMPONENTS);
        let mut sum = 0.0;
        for pair in v.fractions.windows(2) {
            assert!(pair[0] >= pair[1], "fractions must be non-increasing");
        }
        for &f in &v.fractions {
            assert!((0.0..=1.0).contains(&f));
            sum += f;
        }
        assert!(sum <= 1.0 + 1e-9);
    }

    #[test]
    fn five_columns_capture_everything() {
        // With exactly 5 columns the 5 fractions must account for all
        // variance.
        let t = wide_table();
        let view = FilteredView::all(&t);
        let v = variance_decomposition(&view).unwrap();
        let sum: f64 = v.fractions.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn too_few_columns_is_insufficient_data() {
        let t = table(vec![
            ("a", (0..10).map(|i| i as f64).collect()),
            ("b", (0..10).map(|i| (i * i) as f64).collect()),
        ]);
        let view = FilteredView::all(&t);
        match variance_decomposition(&view) {
            Err(AnalyticsError::InsufficientData { cols, .. }) => assert_eq!(cols, 2),
            other => panic!("expected insufficient data, got {other:?}"),
        }
        // The same view still yields normal summary statistics.
        let summaries = crate::analytics::summary::describe(&view);
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].mean.is_finite());
    }

    #[test]
    fn too_few_rows_is_insufficient_data() {
        let t = table(vec![
            ("c1", vec![1.0; 5]),
            ("c2", vec![1.0; 5]),
            ("c3", vec![1.0; 5]),
            ("c4", vec![1.0; 5]),
            ("c5", vec![1.0; 5]),
        ]);
        let view = FilteredView::all(&t);
        assert!(matches!(
            variance_decomposition(&view),
            Err(AnalyticsError::InsufficientData { rows: 5, .. })
        ));
    }

    #[test]
    fn duplicated_column_loads_one_component() {
        // Two perfectly correlated columns plus independent ones: the first
        // component must absorb the shared variance, and the last must be
        // (near) zero.
        let base: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let t = table(vec![
            ("a", base.clone()),
            ("a2", base.iter().map(|v| v * 3.0 + 1.0).collect()),
            ("b", (0..12).map(|i| ((i * 7) % 5) as f64).collect()),
            ("c", (0..12).map(|i| ((i * 3) % 7) as f64).collect()),
            ("d", (0..12).map(|i| ((i * 11) % 13) as f64).collect()),
        ]);
        let view = FilteredView::all(&t);
        let v = variance_decomposition(&view).unwrap();
        assert!(v.fractions[0] >= 2.0 / 5.0);
        assert!(v.fractions[4] < 1e-9);
    }

    #[test]
    fn standardize_centers_and_scales() {
        let z = standardize(&[2.0, 4.0, 6.0]);
        assert_relative_eq!(z.iter().sum::<f64>(), 0.0, epsilon = 1e-12);
        let pop_var = z.iter().map(|v| v * v).sum::<f64>() / 3.0;
        assert_relative_eq!(pop_var, 1.0, epsilon = 1e-12);

        let flat = standardize(&[5.0, 5.0, 5.0]);
        assert!(flat.iter().all(|&v| v == 0.0));
    }
}
