use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – income range filter
// ---------------------------------------------------------------------------

/// Render the sidebar filter controls. Any slider change triggers one full
/// recompute pass.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let (lo, hi) = state.income_bounds;

    ui.strong("Income range");
    ui.add_space(4.0);

    let mut changed = false;
    changed |= ui
        .add(
            egui::Slider::new(&mut state.filter.min, lo..=hi)
                .text("min")
                .integer(),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut state.filter.max, lo..=hi)
                .text("max")
                .integer(),
        )
        .changed();

    // Keep the range well-formed when one handle crosses the other.
    if state.filter.min > state.filter.max {
        state.filter.max = state.filter.min;
    }

    if changed {
        state.refilter();
    }

    ui.add_space(8.0);
    ui.label(format!(
        "{} of {} customers selected",
        state.visible_rows,
        state.table.len()
    ));

    if state.visible_rows == 0 {
        ui.add_space(4.0);
        ui.label(
            RichText::new("No customers in this range.")
                .color(ui.visuals().warn_fg_color),
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Campaign Lens").strong());
        ui.separator();
        ui.label(format!(
            "{} customers loaded, {} in range [{:.0}, {:.0}]",
            state.table.len(),
            state.visible_rows,
            state.filter.min,
            state.filter.max
        ));
    });
}
