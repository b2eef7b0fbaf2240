//! Viewport rendering for `ViewerApp`.
//!
//! Routes pointer, click, wheel and key input into the `Session`, ticks it
//! once per frame, paints the spiral and overlays the info panel.

use std::time::Instant;

use eframe::egui;

use record_spiral::engine::panel::InfoPanel;
use record_spiral::render::camera::ZoomDirection;
use record_spiral::render::paint::{ndc_from_screen, paint_scene};

use crate::ui::{fade, truncate_str};

use super::ViewerApp;

const PANEL_WIDTH: f32 = 280.0;
const PANEL_MARGIN: f32 = 16.0;

impl ViewerApp {
    /// Render the central viewport.
    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.loading {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        if let Some(ref err) = self.error {
            ui.centered_and_justified(|ui| {
                ui.colored_label(
                    egui::Color32::from_rgb(230, 90, 90),
                    format!("Could not load the record collection\n\n{}", err),
                );
            });
            return;
        }

        let fade_in = self.config.panel_fade;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let response = ui.allocate_response(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        let now = Instant::now();

        session.resize(rect.width(), rect.height());

        if let Some(pos) = response.hover_pos() {
            session.pointer_moved(ndc_from_screen(rect, pos));
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                session.click_at(ndc_from_screen(rect, pos), now);
            }
        }

        if response.hovered() {
            for step in ui.input(|i| wheel_zoom_steps(&i.events)) {
                session.zoom(step);
            }
        }

        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            session.deselect(now);
        }

        session.tick(now);

        let painter = ui.painter_at(rect);
        paint_scene(
            &painter,
            rect,
            session.registry(),
            session.camera(),
            &self.cover_textures,
        );

        if let Some(panel) = session.panel() {
            draw_info_panel(&painter, rect, panel, panel.alpha(now, fade_in));
        }

        painter.text(
            rect.left_bottom() + egui::vec2(8.0, -8.0),
            egui::Align2::LEFT_BOTTOM,
            format!(
                "Click: select | Esc: deselect | Scroll: zoom | d={:.1}",
                session.camera().distance()
            ),
            egui::FontId::proportional(12.0),
            egui::Color32::from_rgba_unmultiplied(200, 200, 210, 160),
        );

        ctx.request_repaint();
    }
}

/// One zoom step per wheel event, whatever its magnitude. Scrolling up zooms in.
fn wheel_zoom_steps(events: &[egui::Event]) -> Vec<ZoomDirection> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::MouseWheel { delta, .. } if delta.y > 0.0 => Some(ZoomDirection::In),
            egui::Event::MouseWheel { delta, .. } if delta.y < 0.0 => Some(ZoomDirection::Out),
            _ => None,
        })
        .collect()
}

/// Metadata card pinned to the top-right corner of the viewport.
fn draw_info_panel(painter: &egui::Painter, rect: egui::Rect, panel: &InfoPanel, alpha: f32) {
    let rows = [
        ("Year", panel.year.as_str()),
        ("Genre", panel.genre.as_str()),
        ("Label", panel.label.as_str()),
    ];
    let height = 76.0 + rows.len() as f32 * 20.0;
    let panel_rect = egui::Rect::from_min_size(
        egui::pos2(rect.right() - PANEL_WIDTH - PANEL_MARGIN, rect.top() + PANEL_MARGIN),
        egui::vec2(PANEL_WIDTH, height),
    );

    painter.rect_filled(
        panel_rect,
        8.0,
        fade(egui::Color32::from_rgba_unmultiplied(18, 18, 24, 220), alpha),
    );
    painter.rect_stroke(
        panel_rect,
        8.0,
        egui::Stroke::new(1.0, fade(egui::Color32::from_rgb(255, 220, 140), alpha)),
    );

    let max_chars = ((PANEL_WIDTH - 32.0) / 8.0) as usize;
    let left = panel_rect.left() + 16.0;
    let mut y = panel_rect.top() + 14.0;

    painter.text(
        egui::pos2(left, y),
        egui::Align2::LEFT_TOP,
        truncate_str(&panel.title, max_chars),
        egui::FontId::proportional(18.0),
        fade(egui::Color32::from_rgb(245, 245, 245), alpha),
    );
    y += 26.0;
    painter.text(
        egui::pos2(left, y),
        egui::Align2::LEFT_TOP,
        truncate_str(&panel.artist, max_chars),
        egui::FontId::proportional(14.0),
        fade(egui::Color32::from_rgb(200, 200, 210), alpha),
    );
    y += 30.0;

    for (name, value) in rows {
        painter.text(
            egui::pos2(left, y),
            egui::Align2::LEFT_TOP,
            format!("{}: {}", name, truncate_str(value, max_chars.saturating_sub(7))),
            egui::FontId::proportional(12.0),
            fade(egui::Color32::from_rgb(160, 160, 175), alpha),
        );
        y += 20.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(y: f32) -> egui::Event {
        egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: egui::vec2(0.0, y),
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn every_wheel_tick_in_a_frame_zooms() {
        let events = vec![wheel(1.0), wheel(1.0), wheel(1.0)];
        assert_eq!(wheel_zoom_steps(&events), vec![ZoomDirection::In; 3]);
    }

    #[test]
    fn wheel_direction_and_other_events() {
        let events = vec![
            wheel(-2.5),
            egui::Event::PointerGone,
            wheel(0.0),
            wheel(0.4),
            egui::Event::Copy,
        ];
        assert_eq!(
            wheel_zoom_steps(&events),
            vec![ZoomDirection::Out, ZoomDirection::In]
        );
    }
}
