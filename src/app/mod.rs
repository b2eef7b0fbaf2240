//! `ViewerApp`: the top-level egui application state.
//!
//! The struct lives here; its methods are split across the sibling modules:
//!
//! - `loading`: background collection load and cover requests
//! - `content`: the 3-D viewport and the info panel overlay
//! - `toolbar`: bottom status line

pub mod content;
pub mod loading;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::mpsc;

use eframe::egui;

use record_spiral::config::ViewerConfig;
use record_spiral::engine::pipeline::{LoadError, LoadedCollection};
use record_spiral::engine::session::Session;
use record_spiral::net::image::ImageLoader;

// ─── Application state ───────────────────────────────────────────────────────

pub struct ViewerApp {
    pub config: ViewerConfig,
    /// `None` until the collection has loaded
    pub session: Option<Session>,
    pub error: Option<String>,
    pub loading: bool,
    pub load_rx: Option<mpsc::Receiver<Result<LoadedCollection, LoadError>>>,
    // Cover loading
    pub image_loader: ImageLoader,
    pub cover_textures: HashMap<String, egui::TextureHandle>,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut app = Self {
            config,
            session: None,
            error: None,
            loading: false,
            load_rx: None,
            image_loader: ImageLoader::new(),
            cover_textures: HashMap::new(),
        };
        app.start_load(&cc.egui_ctx);
        app
    }

    /// Turn finished cover downloads into textures.
    fn upload_covers(&mut self, ctx: &egui::Context) {
        self.image_loader.poll();
        for (location, data) in self.image_loader.take_ready() {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [data.width as usize, data.height as usize],
                &data.rgba,
            );
            let tex = ctx.load_texture(
                format!("cover_{}", location),
                image,
                egui::TextureOptions::LINEAR,
            );
            self.cover_textures.insert(location, tex);
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load();
        self.upload_covers(ctx);

        // Bottom status line
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        // Viewport
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_content(ui, ctx);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.cover_textures.clear();
        if let Some(session) = self.session.take() {
            session.teardown();
        }
    }
}
