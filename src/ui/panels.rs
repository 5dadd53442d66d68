use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::{AppState, View};

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Search view (central panel)
// ---------------------------------------------------------------------------

/// Render the search box and the matching courses.
pub fn search_view(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Course title:");
        let mut query = state.query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("e.g. excel")
                .desired_width(320.0),
        );
        if response.changed() {
            state.set_query(query);
        }
        if ui.small_button("Clear").clicked() {
            state.set_query(String::new());
        }
    });
    ui.separator();

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a course file to search  (File → Open…)");
        });
        return;
    }

    if state.query.trim().is_empty() {
        ui.label("Type part of a course title to search.");
        return;
    }

    if state.no_matches() {
        ui.label(
            RichText::new(format!("No courses found for \"{}\".", state.query.trim()))
                .color(Color32::LIGHT_RED),
        );
        return;
    }

    let courses = state.result_courses();
    ui.label(format!("{} courses matching \"{}\"", courses.len(), state.query.trim()));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(40.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(100.0))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Title");
            });
            header.col(|ui| {
                ui.strong("Link");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, courses.len(), |mut row| {
                let course = courses[row.index()];
                let n = row.index() + 1;
                row.col(|ui| {
                    ui.label(n.to_string());
                });
                row.col(|ui| {
                    ui.label(&course.title);
                });
                row.col(|ui| {
                    ui.hyperlink_to("View Course", &course.url);
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export dashboard…"))
                .clicked()
            {
                export_dashboard_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.view, View::Search, "Search");
        ui.selectable_value(&mut state.view, View::Dashboard, "Dashboard");

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .source_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{} courses loaded {source}", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open course data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dashboard_dialog(state: &mut AppState) {
    let Some(dashboard) = &state.dashboard else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export dashboard")
        .set_file_name("dashboard.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = dashboard.write_json(&path) {
            log::error!("Failed to export dashboard: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
