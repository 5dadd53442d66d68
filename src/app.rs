use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, View};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CourseBrowserApp {
    pub state: AppState,
}

impl CourseBrowserApp {
    /// Start the viewer, loading the configured dataset if there is one.
    pub fn new(config: &AppConfig) -> Self {
        let mut app = Self::default();
        if let Some(path) = &config.data_path {
            app.state.load_path(path);
        }
        app
    }
}

impl eframe::App for CourseBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and view switch ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: search results or charts ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Search => panels::search_view(ui, &mut self.state),
            View::Dashboard => plot::dashboard(ui, &self.state),
        });
    }
}
