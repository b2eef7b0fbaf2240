//! egui Painter-based rendering of the record spiral.
//!
//! Every record is two flat primitives, so the scene is drawn with the
//! painter's algorithm: primitives are projected through the camera, sorted
//! far-to-near by view depth and filled as convex meshes. Covers whose
//! texture has arrived are drawn textured; the rest get a flat sleeve colour.

use std::collections::HashMap;

use egui::epaint::{Mesh, Vertex};
use egui::{Color32, Pos2, Rect, Shape, Stroke, TextureHandle};
use glam::{Vec2, Vec3};

use crate::render::camera::Camera;
use crate::render::entity::{Material, PrimitiveKind, RecordEntity, COVER_OFFSET_Z};
use crate::render::registry::SceneRegistry;

/// Rim segments used to approximate a disc.
const DISC_SEGMENTS: usize = 40;

/// Scene colours.
struct Theme {
    background: Color32,
    vinyl: [f32; 3],
    vinyl_rim: Color32,
    centre_label: [f32; 3],
    sleeve: [f32; 3],
    glow: Color32,
}

impl Theme {
    fn night() -> Self {
        Self {
            background: Color32::from_rgb(10, 10, 14),
            vinyl: [0.07, 0.07, 0.08],
            vinyl_rim: Color32::from_rgb(70, 70, 80),
            centre_label: [0.75, 0.22, 0.18],
            sleeve: [0.32, 0.33, 0.38],
            glow: Color32::from_rgb(255, 220, 140),
        }
    }
}

// ── Screen mapping ──

/// NDC (`y` up) → screen position inside `rect`.
pub fn screen_from_ndc(rect: Rect, ndc: Vec2) -> Pos2 {
    Pos2::new(
        rect.center().x + ndc.x * rect.width() * 0.5,
        rect.center().y - ndc.y * rect.height() * 0.5,
    )
}

/// Screen position inside `rect` → NDC (`y` up).
pub fn ndc_from_screen(rect: Rect, pos: Pos2) -> Vec2 {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (pos.x - rect.center().x) / (rect.width() * 0.5),
        -(pos.y - rect.center().y) / (rect.height() * 0.5),
    )
}

/// Convert a linear colour + emissive + opacity into an egui colour.
fn shade(base: [f32; 3], light: f32, material: &Material) -> Color32 {
    let c = |i: usize| ((base[i] * light + material.emissive[i]).clamp(0.0, 1.0) * 255.0) as u8;
    let a = (material.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(c(0), c(1), c(2), a)
}

// ── Draw list ──

struct DrawItem<'a> {
    entity: &'a RecordEntity,
    kind: PrimitiveKind,
    depth: f32,
}

/// Primitives in far-to-near order, with their view depth.
fn draw_order<'a>(registry: &'a SceneRegistry, camera: &Camera) -> Vec<DrawItem<'a>> {
    let view = camera.view();
    let mut items: Vec<DrawItem<'a>> = Vec::with_capacity(registry.len() * 2);
    for entity in registry.iter() {
        let m = entity.transform();
        for kind in [PrimitiveKind::Disc, PrimitiveKind::Cover] {
            let local = match kind {
                PrimitiveKind::Disc => Vec3::ZERO,
                PrimitiveKind::Cover => Vec3::new(0.0, 0.0, COVER_OFFSET_Z),
            };
            let depth = -view.transform_point3(m.transform_point3(local)).z;
            items.push(DrawItem { entity, kind, depth });
        }
    }
    items.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    items
}

/// Paint the whole scene into `rect`.
pub fn paint_scene(
    painter: &egui::Painter,
    rect: Rect,
    registry: &SceneRegistry,
    camera: &Camera,
    textures: &HashMap<String, TextureHandle>,
) {
    let theme = Theme::night();
    painter.rect_filled(rect, 0.0, theme.background);

    for item in draw_order(registry, camera) {
        let Some(outline) = project_outline(item.entity, item.kind, camera, rect) else {
            continue;
        };
        let light = facing_light(item.entity, camera);
        let material = item.entity.material(item.kind);

        match item.kind {
            PrimitiveKind::Disc => {
                painter.add(Shape::mesh(fan_mesh(&outline, shade(theme.vinyl, light, material))));
                let rim = if material.is_highlighted() { theme.glow } else { theme.vinyl_rim };
                painter.add(Shape::closed_line(outline.clone(), Stroke::new(1.0, rim)));

                // Centre label, a third of the disc
                let centre = centroid(&outline);
                let label: Vec<Pos2> = outline
                    .iter()
                    .map(|p| centre + (*p - centre) * 0.33)
                    .collect();
                painter.add(Shape::mesh(fan_mesh(&label, shade(theme.centre_label, light, material))));
            }
            PrimitiveKind::Cover => {
                let texture = item
                    .entity
                    .cover_source
                    .as_deref()
                    .and_then(|src| textures.get(src));
                let mesh = match texture {
                    Some(tex) => {
                        let tint = shade([1.0, 1.0, 1.0], light, material);
                        textured_quad(&outline, tex, tint)
                    }
                    None => fan_mesh(&outline, shade(theme.sleeve, light, material)),
                };
                painter.add(Shape::mesh(mesh));
                if material.is_highlighted() {
                    painter.add(Shape::closed_line(outline, Stroke::new(2.0, theme.glow)));
                }
            }
        }
    }
}

/// Projected outline of a primitive, or `None` if any point is behind the camera.
fn project_outline(
    entity: &RecordEntity,
    kind: PrimitiveKind,
    camera: &Camera,
    rect: Rect,
) -> Option<Vec<Pos2>> {
    entity
        .outline(kind, DISC_SEGMENTS)
        .into_iter()
        .map(|p| camera.project(p).map(|(ndc, _)| screen_from_ndc(rect, ndc)))
        .collect()
}

/// Cheap two-sided diffuse term from how squarely the record faces the camera.
fn facing_light(entity: &RecordEntity, camera: &Camera) -> f32 {
    let normal = entity.transform().transform_vector3(Vec3::Z);
    let to_camera = (camera.position - entity.position).normalize_or_zero();
    0.55 + 0.45 * normal.dot(to_camera).abs()
}

fn centroid(points: &[Pos2]) -> Pos2 {
    let n = points.len().max(1) as f32;
    let sum = points.iter().fold(egui::Vec2::ZERO, |acc, p| acc + p.to_vec2());
    (sum / n).to_pos2()
}

/// Triangle fan over a convex polygon.
fn fan_mesh(points: &[Pos2], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for p in points {
        mesh.colored_vertex(*p, color);
    }
    for i in 1..points.len().saturating_sub(1) {
        mesh.add_triangle(0, i as u32, i as u32 + 1);
    }
    mesh
}

/// Two-triangle quad with the cover image; corners are TL, TR, BR, BL.
fn textured_quad(corners: &[Pos2], texture: &TextureHandle, tint: Color32) -> Mesh {
    let mut mesh = Mesh::with_texture(texture.id());
    let uvs = [
        Pos2::new(0.0, 0.0),
        Pos2::new(1.0, 0.0),
        Pos2::new(1.0, 1.0),
        Pos2::new(0.0, 1.0),
    ];
    for (pos, uv) in corners.iter().zip(uvs) {
        mesh.vertices.push(Vertex {
            pos: *pos,
            uv,
            color: tint,
        });
    }
    if corners.len() == 4 {
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
    }
    mesh
}
