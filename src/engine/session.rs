//! `Session`: all state of one viewing session.
//!
//! Owns the scene registry, the selection, the pointer and the camera, and is
//! the only thing the frame loop talks to. Built once the collection has
//! loaded; torn down when the viewer exits.
//!
//! Frame order: input events (`pointer_moved`, `click`, `zoom`, `resize`) are
//! applied as they arrive, then `tick` runs once before painting.

use std::time::Instant;

use glam::Vec2;
use rand::Rng;

use crate::config::ViewerConfig;
use crate::engine::panel::InfoPanel;
use crate::engine::pipeline::LoadedCollection;
use crate::engine::selection::{Selection, Transition};
use crate::net::fetch::resolve_location;
use crate::render::animator::{animate_float, FloatConfig};
use crate::render::camera::{Camera, ZoomDirection};
use crate::render::entity::RecordEntity;
use crate::render::layout::spiral_position;
use crate::render::registry::{EntityId, SceneRegistry};

pub struct Session {
    registry: SceneRegistry,
    selection: Selection,
    /// Last pointer position in NDC
    pointer: Vec2,
    camera: Camera,
    panel: Option<InfoPanel>,
    float: FloatConfig,
    started_at: Instant,
    skipped: usize,
}

impl Session {
    /// Lay out and build every valid row of `collection`.
    ///
    /// Rows without a title or artist are skipped; survivors are indexed in
    /// their original order and spread over the spiral by that index.
    pub fn new<R: Rng>(
        collection: LoadedCollection,
        cfg: &ViewerConfig,
        rng: &mut R,
        now: Instant,
    ) -> Self {
        let total = collection.rows.iter().filter(|r| r.is_valid()).count();
        let mut registry = SceneRegistry::new();
        let mut skipped = collection.unreadable;

        for data in collection.rows {
            let index = registry.len();
            let position = spiral_position(index, total, &cfg.spiral);
            let cover = data
                .image_url
                .as_deref()
                .map(|href| resolve_location(&collection.origin, href));
            match RecordEntity::build(data, position, index, rng) {
                Some(mut entity) => {
                    entity.cover_source = cover;
                    registry.push(entity);
                }
                None => skipped += 1,
            }
        }

        log::info!("Built {} records ({} rows skipped)", registry.len(), skipped);

        Self {
            registry,
            selection: Selection::Idle,
            pointer: Vec2::ZERO,
            camera: Camera::new(cfg.camera),
            panel: None,
            float: cfg.float,
            started_at: now,
            skipped,
        }
    }

    // ── Accessors ──

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Overlay contents, when a record is selected.
    pub fn panel(&self) -> Option<&InfoPanel> {
        self.panel.as_ref()
    }

    /// Rows dropped at build time (incomplete or unreadable).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    // ── Input ──

    /// Record the pointer position (NDC, `y` up). No state transition.
    pub fn pointer_moved(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    /// Primary click at the last pointer position.
    pub fn click(&mut self, now: Instant) -> Transition {
        let ray = self.camera.ray_from_ndc(self.pointer);
        let hit = self.registry.hit_test(&ray).map(|h| h.entity);
        let transition = self.selection.click(hit, &mut self.registry);
        self.apply(transition, now);
        transition
    }

    /// Pointer move followed by a click, for events that carry a position.
    pub fn click_at(&mut self, ndc: Vec2, now: Instant) -> Transition {
        self.pointer_moved(ndc);
        self.click(now)
    }

    /// Clear the selection as an empty click would.
    pub fn deselect(&mut self, now: Instant) -> Transition {
        let transition = self.selection.clear(&mut self.registry);
        self.apply(transition, now);
        transition
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        self.camera.zoom(direction);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
    }

    fn apply(&mut self, transition: Transition, now: Instant) {
        match transition {
            Transition::Selected { entity, previous } => {
                let Some(e) = self.registry.get(entity) else {
                    return;
                };
                log::debug!(
                    "Selected #{} \"{}\" (previous: {:?})",
                    e.index,
                    e.data.title,
                    previous
                );
                self.panel = Some(InfoPanel::for_record(entity, &e.data, now));
                self.camera.fly_to(e.position, now);
            }
            Transition::Cleared { previous } => {
                log::debug!("Cleared selection of #{}", previous.0);
                self.panel = None;
                self.camera.cancel_animation();
            }
            Transition::Unchanged => {}
        }
    }

    // ── Frame ──

    /// One frame: camera behaviour for the current state, then float/spin.
    pub fn tick(&mut self, now: Instant) {
        if self.selection.is_idle() {
            self.camera.follow_pointer(self.pointer);
        } else {
            self.camera.advance(now);
        }
        let t = now.saturating_duration_since(self.started_at).as_secs_f32();
        animate_float(self.registry.entities_mut(), t, &self.float);
    }

    /// Id of the selected record.
    pub fn selected(&self) -> Option<EntityId> {
        self.selection.selected()
    }

    /// End of session. Consumes the state so nothing can touch it afterwards.
    pub fn teardown(self) {
        log::info!("Session closed ({} records)", self.registry.len());
    }
}
