//! Collection loading for `ViewerApp`.
//!
//! The table is read and parsed on a background thread (`start_load`); the
//! frame loop polls the channel (`check_load`) and builds the `Session` once
//! a result arrives. Cover downloads are queued at the same time.

use std::sync::mpsc;
use std::time::Instant;

use eframe::egui;

use record_spiral::engine::pipeline::load_collection;
use record_spiral::engine::session::Session;

use super::ViewerApp;

impl ViewerApp {
    /// Start reading the configured source on a background thread.
    pub fn start_load(&mut self, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.load_rx = Some(rx);

        let source = self.config.source.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = load_collection(&source);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Poll the load channel and build the session when the table arrives.
    pub fn check_load(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                log::error!("Collection loader exited without a result");
                self.error = Some(String::from("Loader stopped unexpectedly"));
                self.loading = false;
                self.load_rx = None;
                return;
            }
        };

        match result {
            Ok(collection) => {
                let mut rng = rand::rng();
                let session = Session::new(collection, &self.config, &mut rng, Instant::now());
                for entity in session.registry().iter() {
                    if let Some(location) = &entity.cover_source {
                        self.image_loader.request(location);
                    }
                }
                self.session = Some(session);
                self.error = None;
            }
            Err(e) => {
                log::error!("Failed to load collection: {}", e);
                self.error = Some(e.to_string());
                self.session = None;
            }
        }
        self.loading = false;
        self.load_rx = None;
    }
}
