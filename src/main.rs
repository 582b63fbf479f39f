mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::EvDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_env().unwrap_or_else(|e| {
        log::error!("Invalid configuration, using defaults: {e:#}");
        DashboardConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "EV Registrations Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(EvDashboardApp::new(cc, config)))),
    )
}
