use std::fmt::Display;

use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::stats::{Measure, Tally};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render every dashboard chart, one under the other.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(dash) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a course file to see statistics  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            tally_chart(ui, "Subscribers by subject", "Subscribers", &dash.subscribers_by_subject);
            tally_chart(ui, "Courses by level", "Courses", &dash.courses_by_level);
            tally_chart(
                ui,
                "Courses per subject and level",
                "Courses",
                &dash.subjects_per_level.flattened(),
            );
            tally_chart(ui, "Subscribers by year", "Subscribers", &dash.subscribers_by_year);
            tally_chart(ui, "Profit by year", "Profit", &dash.profit_by_year);
            tally_chart(ui, "Profit by month", "Profit", &dash.profit_by_month);
            tally_chart(ui, "Subscribers by month", "Subscribers", &dash.subscribers_by_month);
        });
}

/// One bar per category.  Each bar is its own series so the legend names it.
fn tally_chart<K: Display, V: Measure>(ui: &mut Ui, title: &str, y_label: &str, tally: &Tally<K, V>) {
    ui.strong(title);
    if tally.is_empty() {
        ui.label("No data.");
        ui.separator();
        return;
    }

    let labels = tally.labels();
    let colors = ColorMap::new(&labels);

    Plot::new(title)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .y_axis_label(y_label)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (label, value)) in labels.iter().zip(tally.values()).enumerate() {
                let bar = Bar::new(i as f64, value).width(0.7).name(label);
                let chart = BarChart::new(vec![bar])
                    .name(label)
                    .color(colors.color_for(label));
                plot_ui.bar_chart(chart);
            }
        });
    ui.separator();
}
