//! Record entities: a vinyl disc and its cover sleeve moving as one group.

use glam::{Mat4, Quat, Vec3};
use rand::Rng;

use crate::data::RecordData;

/// Opacity of an unselected record.
pub const BASE_OPACITY: f32 = 0.9;
/// Opacity of the selected record.
pub const HIGHLIGHT_OPACITY: f32 = 1.0;
/// Emissive glow added to the selected record.
pub const HIGHLIGHT_EMISSIVE: [f32; 3] = [0.2, 0.2, 0.2];

/// Disc radius in local units.
pub const DISC_RADIUS: f32 = 1.0;
/// Half the side of the square cover.
pub const COVER_HALF_EXTENT: f32 = 0.7;
/// Cover sits slightly in front of the disc along local +Z.
pub const COVER_OFFSET_Z: f32 = 0.05;

/// Surface parameters touched by selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub opacity: f32,
    pub emissive: [f32; 3],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            opacity: BASE_OPACITY,
            emissive: [0.0; 3],
        }
    }
}

impl Material {
    pub fn highlight(&mut self) {
        self.opacity = HIGHLIGHT_OPACITY;
        self.emissive = HIGHLIGHT_EMISSIVE;
    }

    pub fn revert(&mut self) {
        *self = Material::default();
    }

    pub fn is_highlighted(&self) -> bool {
        *self != Material::default()
    }
}

/// The two visual parts of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Disc,
    Cover,
}

/// One renderable record.
#[derive(Debug, Clone)]
pub struct RecordEntity {
    /// Ordinal among the valid records, in load order
    pub index: usize,
    /// Group translation; `y` is animated every frame
    pub position: Vec3,
    /// Resting height the float animation oscillates around
    pub original_y: f32,
    /// Float phase in [0, 2π), fixed for the entity's lifetime
    pub float_offset: f32,
    /// Group rotation about the world Y axis (radians)
    pub rotation_y: f32,
    pub disc: Material,
    pub cover: Material,
    /// Resolved cover location, once known
    pub cover_source: Option<String>,
    pub data: RecordData,
}

impl RecordEntity {
    /// Build the entity for `data` at `position`.
    ///
    /// Returns `None` for rows without a title or artist.
    pub fn build<R: Rng>(
        data: RecordData,
        position: Vec3,
        index: usize,
        rng: &mut R,
    ) -> Option<Self> {
        if !data.is_valid() {
            return None;
        }
        Some(Self {
            index,
            position,
            original_y: position.y,
            float_offset: rng.random_range(0.0..std::f32::consts::TAU),
            rotation_y: 0.0,
            disc: Material::default(),
            cover: Material::default(),
            cover_source: None,
            data,
        })
    }

    pub fn highlight(&mut self) {
        self.disc.highlight();
        self.cover.highlight();
    }

    pub fn revert(&mut self) {
        self.disc.revert();
        self.cover.revert();
    }

    pub fn is_highlighted(&self) -> bool {
        self.disc.is_highlighted() || self.cover.is_highlighted()
    }

    pub fn material(&self, kind: PrimitiveKind) -> &Material {
        match kind {
            PrimitiveKind::Disc => &self.disc,
            PrimitiveKind::Cover => &self.cover,
        }
    }

    /// Local → world transform of the group.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_y(self.rotation_y), self.position)
    }

    /// World-space corners of a primitive's outline.
    ///
    /// The disc is approximated by `segments` points on its rim; the cover
    /// yields its four corners (top-left, top-right, bottom-right, bottom-left).
    pub fn outline(&self, kind: PrimitiveKind, segments: usize) -> Vec<Vec3> {
        let m = self.transform();
        match kind {
            PrimitiveKind::Disc => (0..segments.max(3))
                .map(|i| {
                    let a = i as f32 / segments.max(3) as f32 * std::f32::consts::TAU;
                    m.transform_point3(Vec3::new(a.cos() * DISC_RADIUS, a.sin() * DISC_RADIUS, 0.0))
                })
                .collect(),
            PrimitiveKind::Cover => {
                let e = COVER_HALF_EXTENT;
                [(-e, e), (e, e), (e, -e), (-e, -e)]
                    .iter()
                    .map(|&(x, y)| m.transform_point3(Vec3::new(x, y, COVER_OFFSET_Z)))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn data(title: &str, artist: &str) -> RecordData {
        RecordData {
            title: title.into(),
            artist: artist.into(),
            ..Default::default()
        }
    }

    #[test]
    fn build_starts_at_baseline() {
        let mut rng = StdRng::seed_from_u64(7);
        let e = RecordEntity::build(data("Blue", "Joni Mitchell"), Vec3::new(1.0, 2.0, 3.0), 4, &mut rng)
            .unwrap();
        assert_eq!(e.index, 4);
        assert_eq!(e.original_y, 2.0);
        assert_eq!(e.disc.opacity, BASE_OPACITY);
        assert_eq!(e.cover.opacity, BASE_OPACITY);
        assert_eq!(e.disc.emissive, [0.0; 3]);
        assert!(!e.is_highlighted());
    }

    #[test]
    fn build_skips_incomplete_rows() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(RecordEntity::build(data("", "X"), Vec3::ZERO, 0, &mut rng).is_none());
        assert!(RecordEntity::build(data("X", ""), Vec3::ZERO, 0, &mut rng).is_none());
    }

    #[test]
    fn float_offset_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for i in 0..1000 {
            let e = RecordEntity::build(data("T", "A"), Vec3::ZERO, i, &mut rng).unwrap();
            assert!(e.float_offset >= 0.0 && e.float_offset < std::f32::consts::TAU);
        }
    }

    #[test]
    fn revert_undoes_highlight_exactly() {
        let baseline = Material::default();
        let mut m = baseline;
        m.highlight();
        assert_eq!(m.opacity, HIGHLIGHT_OPACITY);
        assert_eq!(m.emissive, HIGHLIGHT_EMISSIVE);
        m.revert();
        assert_eq!(m, baseline);

        // repeated cycles never drift
        for _ in 0..10 {
            m.highlight();
            m.highlight();
            m.revert();
        }
        assert_eq!(m, baseline);
    }

    #[test]
    fn entity_highlight_touches_both_primitives() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut e = RecordEntity::build(data("T", "A"), Vec3::ZERO, 0, &mut rng).unwrap();
        e.highlight();
        assert_eq!(e.disc.opacity, HIGHLIGHT_OPACITY);
        assert_eq!(e.cover.emissive, HIGHLIGHT_EMISSIVE);
        e.revert();
        assert_eq!(e.disc, Material::default());
        assert_eq!(e.cover, Material::default());
    }

    #[test]
    fn cover_outline_follows_group_transform() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut e = RecordEntity::build(data("T", "A"), Vec3::new(5.0, 0.0, 0.0), 0, &mut rng).unwrap();
        e.rotation_y = std::f32::consts::FRAC_PI_2;
        let corners = e.outline(PrimitiveKind::Cover, 0);
        assert_eq!(corners.len(), 4);
        // local +Z maps to world +X after a quarter turn about Y
        for c in &corners {
            assert!((c.x - (5.0 + COVER_OFFSET_Z)).abs() < 1e-5);
        }
    }
}
