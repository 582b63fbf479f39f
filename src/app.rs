use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::loader::{spawn_load, LoadOutcome};
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EvDashboardApp {
    pub state: AppState,
    config: DashboardConfig,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
}

impl EvDashboardApp {
    /// Build the app and kick off the initial dataset load.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut app = Self {
            state: AppState::new(&config),
            config,
            tx,
            rx,
        };
        app.start_load(&cc.egui_ctx);
        app
    }

    fn start_load(&mut self, ctx: &egui::Context) {
        let generation = self.state.begin_load();
        log::info!("Loading dataset from {}", self.config.dataset);

        let ctx = ctx.clone();
        spawn_load(
            self.config.dataset.clone(),
            generation,
            self.tx.clone(),
            move || ctx.request_repaint(),
        );
    }

    fn poll_loads(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.state.apply_outcome(outcome);
        }
    }
}

impl eframe::App for EvDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();

        // ---- Top panel: title, status, reload ----
        let mut reload = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            reload = panels::top_bar(ui, &mut self.state);
        });
        if reload {
            self.start_load(ctx);
        }

        // ---- Left side panel: manufacturer picker + cards ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts above the table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if panels::placeholder(ui, &self.state) {
                return;
            }
            charts::chart_row(ui, &self.state.views);
            ui.separator();
            table::vehicle_table(ui, &mut self.state);
        });
    }
}
