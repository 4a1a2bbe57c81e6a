use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SiteSelection;
use crate::state::{AppState, PAYLOAD_SLIDER_MAX};

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left controls panel: site dropdown and payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // Clone what we need so we can mutate state below.
    let sites = match &state.dataset {
        Some(ds) => ds.sites.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    let current = state.site_selection.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label().to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, "All Sites")
                .clicked()
            {
                state.set_site(SiteSelection::All);
            }
            for site in &sites {
                let selection = SiteSelection::Site(site.clone());
                if ui.selectable_label(current == selection, site).clicked() {
                    state.set_site(selection.clone());
                }
            }
        });

    ui.separator();

    // ---- Payload range sliders ----
    ui.strong("Payload range (kg)");
    let (mut low, mut high) = state.payload_range;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, 0.0..=PAYLOAD_SLIDER_MAX)
                .step_by(100.0)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, 0.0..=PAYLOAD_SLIDER_MAX)
                .step_by(100.0)
                .text("max"),
        )
        .changed();

    // Keep low <= high by dragging the other bound along.
    if low_changed {
        high = high.max(low);
    }
    if high_changed {
        low = low.min(high);
    }
    if low_changed || high_changed {
        state.set_payload_range(low, high);
    }
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launch records, {} sites",
                ds.len(),
                ds.sites.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records from {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
