use crate::data::filter::FilteredView;

use super::mean;

// ---------------------------------------------------------------------------
// Pairwise Pearson correlation (heatmap input)
// ---------------------------------------------------------------------------

/// Symmetric Pearson correlation matrix over all numeric columns.
/// `values[i][j]` pairs `labels[i]` with `labels[j]`; the diagonal is always
/// 1.0, off-diagonal entries are NaN when either column is constant.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }
}

pub fn pearson_matrix(view: &FilteredView) -> CorrelationMatrix {
    let columns = view.numeric_columns();
    let n = columns.len();
    let labels = columns.iter().map(|(name, _)| name.to_string()).collect();

    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&columns[i].1, &columns[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { labels, values }
}

/// Pearson's r between two equally long series; NaN when either series is
/// constant or shorter than two observations.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    if x.len() < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    sxy / denom
}
