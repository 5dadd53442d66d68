use clap::Parser;
use course_browser::app::CourseBrowserApp;
use course_browser::config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::parse().with_default_file();
    log::info!("Starting with data file {:?}", config.data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Course Browser",
        options,
        Box::new(move |_cc| Ok(Box::new(CourseBrowserApp::new(&config)))),
    )
}
