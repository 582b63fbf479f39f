use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, LoadStatus};

// ---------------------------------------------------------------------------
// Left side panel – manufacturer picker and summary cards
// ---------------------------------------------------------------------------

const ALL_MANUFACTURERS: &str = "All manufacturers";

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ui.strong("Manufacturer");
    let current = state.selector.clone();
    let mut picked: Option<Option<String>> = None;

    egui::ComboBox::from_id_salt("manufacturer")
        .selected_text(current.as_deref().unwrap_or(ALL_MANUFACTURERS))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(current.is_none(), ALL_MANUFACTURERS)
                        .clicked()
                    {
                        picked = Some(None);
                    }
                    for choice in &state.choices {
                        let selected = current.as_deref() == Some(choice.label.as_str());
                        if ui.selectable_label(selected, &choice.label).clicked() {
                            picked = Some(Some(choice.label.clone()));
                        }
                    }
                });
        });

    if current.is_some() && ui.small_button("Clear filter").clicked() {
        picked = Some(None);
    }

    if let Some(selector) = picked {
        if selector != current {
            state.set_filter(selector);
        }
    }

    ui.add_space(8.0);
    ui.heading("Summary");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for card in &state.views.cards {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(&card.label).small());
                    ui.label(RichText::new(&card.value).size(20.0).strong());
                });
                ui.add_space(4.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar. Returns true when the user asked for a reload.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) -> bool {
    let mut reload = false;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("EV Registrations");
        ui.separator();

        if ui
            .add_enabled(!state.loading(), egui::Button::new("Reload"))
            .clicked()
        {
            reload = true;
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            let split = &state.views.eligibility;
            ui.label(format!(
                "{} vehicles loaded, {} visible, {} of {} CAFV eligible",
                ds.len(),
                state.views.visible_indices.len(),
                split.eligible,
                split.total()
            ));
        }

        if state.loading() {
            ui.spinner();
        }

        let mut dismiss = false;
        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
            dismiss = ui.small_button("✕").clicked();
        }
        if dismiss {
            state.dismiss_error();
        }
    });

    reload
}

// ---------------------------------------------------------------------------
// Central placeholder
// ---------------------------------------------------------------------------

/// Draw a placeholder while there is nothing to show. Returns true if it
/// took over the panel.
pub fn placeholder(ui: &mut Ui, state: &AppState) -> bool {
    let text = match (state.status, &state.dataset) {
        (_, Some(ds)) if ds.is_empty() => "The dataset contains no vehicles.",
        (_, Some(_)) => return false,
        (LoadStatus::Idle, None) => "Waiting to load the dataset…",
        (LoadStatus::Loading, None) => "Loading dataset…",
        (LoadStatus::Failed, None) => "The dataset could not be loaded. Use Reload to try again.",
        (LoadStatus::Loaded, None) => return false,
    };

    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
    true
}
