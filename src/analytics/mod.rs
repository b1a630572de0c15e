/// Analytics pipeline: independent, stateless transforms over one
/// [`FilteredView`] snapshot.
///
/// ```text
///   FilteredView ──┬─▶ summary       (descriptive statistics table)
///                  ├─▶ correlation   (Pearson matrix → heatmap)
///                  ├─▶ distribution  (response counts by Kidhome)
///                  ├─▶ ab_test       (Welch's t per campaign)
///                  ├─▶ pca           (explained-variance fractions)
///                  └─▶ metrics       (scalar business metrics)
/// ```
///
/// No transform reads another transform's output, so one pass simply runs
/// them all and collects the results.
pub mod ab_test;
pub mod correlation;
pub mod distribution;
pub mod metrics;
pub mod pca;
pub mod summary;

use thiserror::Error;

use crate::data::filter::FilteredView;

/// Transform-local failure. Non-fatal: it degrades one widget to a
/// placeholder while the rest of the pass renders normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error(
        "not enough data: need at least {needed_cols} numeric columns and \
         {needed_rows} rows, have {cols} and {rows}"
    )]
    InsufficientData {
        needed_cols: usize,
        needed_rows: usize,
        cols: usize,
        rows: usize,
    },
}

/// Everything one render pass shows, produced fresh on each filter change
/// and discarded on the next.
#[derive(Debug, Clone)]
pub struct DashboardOutputs {
    pub summary: Vec<summary::ColumnSummary>,
    pub correlation: correlation::CorrelationMatrix,
    pub response_groups: distribution::GroupedCounts,
    pub campaign_tests: Vec<ab_test::CampaignTest>,
    pub variance: Result<pca::VarianceDecomposition, AnalyticsError>,
    pub metrics: metrics::DerivedMetrics,
}

/// One full recompute pass: pure function of the filtered view.
pub fn run_pipeline(view: &FilteredView) -> DashboardOutputs {
    DashboardOutputs {
        summary: summary::describe(view),
        correlation: correlation::pearson_matrix(view),
        response_groups: distribution::response_by_dependents(view),
        campaign_tests: ab_test::campaign_significance(view),
        variance: pca::variance_decomposition(view),
        metrics: metrics::derived_metrics(view),
    }
}

// ---------------------------------------------------------------------------
// Shared scalar helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean; NaN for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (ddof = 1); NaN for fewer than two values.
pub(crate) fn sample_var(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}
