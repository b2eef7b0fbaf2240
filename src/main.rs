mod app;
mod ui;

use eframe::egui;

use record_spiral::config::ViewerConfig;

use app::ViewerApp;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title("Record Spiral"),
        ..Default::default()
    };

    eframe::run_native(
        "Record Spiral",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, config)))),
    )
}
