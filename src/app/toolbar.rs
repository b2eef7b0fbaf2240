//! Status line for `ViewerApp`: source, record and cover counts.

use eframe::egui;

use crate::ui::truncate_str;

use super::ViewerApp;

impl ViewerApp {
    /// Render the bottom status strip.
    pub fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(truncate_str(&self.config.source, 48))
                    .monospace()
                    .color(egui::Color32::GRAY),
            );
            ui.separator();

            if self.loading {
                ui.spinner();
                ui.label("Loading collection...");
                return;
            }

            if self.error.is_some() {
                ui.colored_label(egui::Color32::from_rgb(255, 80, 80), "Load failed");
                return;
            }

            let Some(session) = self.session.as_ref() else {
                return;
            };

            ui.label(format!("Records: {}", session.registry().len()));
            if session.skipped() > 0 {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 160, 0),
                    format!("Skipped: {}", session.skipped()),
                );
            }
            ui.separator();

            ui.label(format!("Covers: {}", self.image_loader.loaded_count()));
            let pending = self.image_loader.pending_count();
            if pending > 0 {
                ui.label(format!("({} loading)", pending));
            }
            let failed = self.image_loader.failed_count();
            if failed > 0 {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 80, 80),
                    format!("{} failed", failed),
                );
            }

            if let Some(entity) = session.selected().and_then(|id| session.registry().get(id)) {
                ui.separator();
                ui.label(format!("#{} {}", entity.index + 1, truncate_str(&entity.data.title, 32)));
            }
        });
    }
}
