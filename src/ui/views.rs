use eframe::egui::{vec2, Rect, RichText, ScrollArea, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::analytics::ab_test::CampaignTest;
use crate::analytics::correlation::CorrelationMatrix;
use crate::analytics::distribution::GroupedCounts;
use crate::analytics::metrics::DerivedMetrics;
use crate::analytics::pca::VarianceDecomposition;
use crate::analytics::summary::ColumnSummary;
use crate::analytics::AnalyticsError;
use crate::color::{correlation_color, generate_palette};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – the dashboard
// ---------------------------------------------------------------------------

/// Render every widget of the current pass, top to bottom.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Exploratory Data Analysis");
            ui.add_space(4.0);
            summary_table(ui, &state.outputs.summary);
            ui.add_space(12.0);

            ui.columns(2, |cols| {
                cols[0].strong("Response Distribution by Kidhome");
                response_chart(&mut cols[0], &state.outputs.response_groups);

                cols[1].strong("Correlation Heatmap");
                heatmap(&mut cols[1], &state.outputs.correlation);
            });
            ui.add_space(12.0);

            ui.heading("A/B Testing on Campaigns");
            ui.add_space(4.0);
            ab_table(ui, &state.outputs.campaign_tests);
            ui.add_space(12.0);

            ui.heading("Dimensionality Reduction (PCA)");
            ui.add_space(4.0);
            variance_chart(ui, &state.outputs.variance);
            ui.add_space(12.0);

            ui.heading("Insights");
            ui.add_space(4.0);
            insight_widgets(ui, &state.outputs.metrics);
            ui.add_space(12.0);

            ui.heading("Average Spend per Product Category");
            ui.add_space(4.0);
            spend_chart(ui, &state.outputs.metrics);
        });
}

// ---------------------------------------------------------------------------
// Summary statistics table
// ---------------------------------------------------------------------------

fn summary_table(ui: &mut Ui, summaries: &[ColumnSummary]) {
    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto().at_least(130.0))
            .columns(TableColumn::remainder(), 8)
            .header(20.0, |mut header| {
                for title in ["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for s in summaries {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&s.name);
                        });
                        row.col(|ui| {
                            ui.label(s.count.to_string());
                        });
                        for v in [s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max] {
                            row.col(|ui| {
                                ui.label(fmt(v, 2));
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Grouped response distribution
// ---------------------------------------------------------------------------

fn response_chart(ui: &mut Ui, counts: &GroupedCounts) {
    let n_groups = counts.groups.len();
    let palette = generate_palette(n_groups);
    let width = if n_groups > 0 { 0.8 / n_groups as f64 } else { 0.8 };

    let charts: Vec<BarChart> = counts
        .groups
        .iter()
        .enumerate()
        .map(|(g, (&kidhome, &(declined, accepted)))| {
            let offset = (g as f64 - (n_groups as f64 - 1.0) / 2.0) * width;
            let bars = vec![
                Bar::new(offset, declined as f64).width(width),
                Bar::new(1.0 + offset, accepted as f64).width(width),
            ];
            BarChart::new(bars)
                .name(format!("Kidhome {kidhome}"))
                .color(palette[g])
        })
        .collect();

    Plot::new("response_distribution")
        .height(260.0)
        .legend(Legend::default())
        .x_axis_label("Response (0 = declined, 1 = accepted)")
        .y_axis_label("Customers")
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.size();
    if n == 0 {
        ui.label("No numeric columns to correlate.");
        return;
    }

    let size = ui.available_width().min(420.0);
    let (rect, response) = ui.allocate_exact_size(vec2(size, size), Sense::hover());
    let painter = ui.painter_at(rect);
    let cell = rect.width() / n as f32;

    for i in 0..n {
        for j in 0..n {
            let r = matrix.values[i][j];
            let min = rect.min + vec2(j as f32 * cell, i as f32 * cell);
            painter.rect_filled(
                Rect::from_min_size(min, vec2(cell, cell)),
                0.0,
                correlation_color(r),
            );
        }
    }

    if let Some(pos) = response.hover_pos() {
        let i = ((pos.y - rect.min.y) / cell) as usize;
        let j = ((pos.x - rect.min.x) / cell) as usize;
        if i < n && j < n {
            let r = matrix.values[i][j];
            response.on_hover_text(format!(
                "{} × {}: r = {}",
                matrix.labels[i],
                matrix.labels[j],
                fmt(r, 2)
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// A/B test results table
// ---------------------------------------------------------------------------

fn ab_table(ui: &mut Ui, tests: &[CampaignTest]) {
    ui.push_id("ab_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(TableColumn::auto().at_least(130.0))
            .columns(TableColumn::remainder(), 2)
            .header(20.0, |mut header| {
                for title in ["campaign", "t-statistic", "p-value"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for test in tests {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(test.campaign);
                        });
                        row.col(|ui| {
                            ui.label(fmt(test.t_stat, 2));
                        });
                        row.col(|ui| {
                            ui.label(fmt(test.p_value, 4));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Explained-variance bar chart
// ---------------------------------------------------------------------------

fn variance_chart(ui: &mut Ui, variance: &Result<VarianceDecomposition, AnalyticsError>) {
    match variance {
        Ok(v) => {
            let bars: Vec<Bar> = v
                .fractions
                .iter()
                .enumerate()
                .map(|(i, &f)| {
                    Bar::new((i + 1) as f64, f)
                        .width(0.6)
                        .name(format!("PC{}", i + 1))
                })
                .collect();

            Plot::new("explained_variance")
                .height(220.0)
                .x_axis_label("Principal component")
                .y_axis_label("Explained variance fraction")
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars));
                });
        }
        Err(e) => {
            ui.label(RichText::new(e.to_string()).italics());
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar metric widgets
// ---------------------------------------------------------------------------

fn insight_widgets(ui: &mut Ui, metrics: &DerivedMetrics) {
    ui.columns(3, |cols| {
        metric_widget(
            &mut cols[0],
            "Overall Response Rate",
            percent(metrics.response_rate),
        );
        metric_widget(
            &mut cols[1],
            "Customer Complaint Rate",
            percent(metrics.complaint_rate),
        );
        metric_widget(
            &mut cols[2],
            "Best Performing Campaign",
            format!(
                "{} ({})",
                metrics.best_campaign.name,
                percent(metrics.best_campaign.rate)
            ),
        );
    });
}

fn metric_widget(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(RichText::new(value).heading());
}

// ---------------------------------------------------------------------------
// Spend bar chart
// ---------------------------------------------------------------------------

fn spend_chart(ui: &mut Ui, metrics: &DerivedMetrics) {
    let bars: Vec<Bar> = metrics
        .mean_spend
        .iter()
        .enumerate()
        .map(|(i, &(name, value))| {
            let value = if value.is_nan() { 0.0 } else { value };
            Bar::new(i as f64, value).width(0.6).name(name)
        })
        .collect();

    Plot::new("mean_spend")
        .height(220.0)
        .y_axis_label("Mean spend")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Fixed-decimal format with NaN rendered as "n/a".
fn fmt(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

fn percent(rate: f64) -> String {
    if rate.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}%", rate * 100.0)
    }
}
