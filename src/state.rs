use crate::analytics::{run_pipeline, DashboardOutputs};
use crate::data::filter::{filtered_view, FilteredView, IncomeRange};
use crate::data::model::{CanonicalTable, INCOME};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Default income range before the user touches the sliders, clamped into
/// the observed bounds at startup.
const DEFAULT_RANGE: IncomeRange = IncomeRange {
    min: 10_000.0,
    max: 80_000.0,
};

/// The full dashboard state, independent of rendering. The canonical table
/// is immutable after construction; only the filter and the derived outputs
/// change, and the outputs are always a pure function of the filter.
pub struct AppState {
    /// The cleaned dataset, held for the process lifetime.
    pub table: CanonicalTable,

    /// Observed income min/max, the slider bounds.
    pub income_bounds: (f64, f64),

    /// The active filter criterion.
    pub filter: IncomeRange,

    /// How many rows the current filter keeps.
    pub visible_rows: usize,

    /// Outputs of the latest recompute pass.
    pub outputs: DashboardOutputs,
}

impl AppState {
    /// Ingest the cleaned dataset, derive slider bounds, run the first pass.
    pub fn new(table: CanonicalTable) -> Self {
        let income_bounds = table.numeric_bounds(INCOME).unwrap_or((0.0, 0.0));
        let filter = DEFAULT_RANGE.clamped_to(income_bounds.0, income_bounds.1);

        let view = filtered_view(&table, &filter);
        let visible_rows = view.len();
        let outputs = run_pipeline(&view);

        AppState {
            table,
            income_bounds,
            filter,
            visible_rows,
            outputs,
        }
    }

    /// Recompute the filtered view and every transform after a filter
    /// change. One full blocking pass; the user never sees a partially
    /// updated dashboard.
    pub fn refilter(&mut self) {
        let view: FilteredView = filtered_view(&self.table, &self.filter);
        self.visible_rows = view.len();
        self.outputs = run_pipeline(&view);
    }
}
