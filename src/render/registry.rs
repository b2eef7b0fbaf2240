//! Scene registry: every record entity, in load order, plus the table that
//! maps each pickable primitive back to the entity that owns it.

use glam::Vec3;

use super::camera::Ray;
use super::entity::{PrimitiveKind, RecordEntity, COVER_HALF_EXTENT, COVER_OFFSET_Z, DISC_RADIUS};

/// Stable handle of an entity: its position in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// A pickable primitive and its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveHandle {
    pub owner: EntityId,
    pub kind: PrimitiveKind,
}

/// Nearest ray intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub entity: EntityId,
    pub primitive: PrimitiveKind,
    /// Distance along the ray
    pub distance: f32,
}

/// Append-only collection of record entities.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    entities: Vec<RecordEntity>,
    primitives: Vec<PrimitiveHandle>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity; its id is its position in the registry.
    pub fn push(&mut self, entity: RecordEntity) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(entity);
        for kind in [PrimitiveKind::Disc, PrimitiveKind::Cover] {
            self.primitives.push(PrimitiveHandle { owner: id, kind });
        }
        id
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&RecordEntity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut RecordEntity> {
        self.entities.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordEntity> {
        self.entities.iter()
    }

    pub fn entities_mut(&mut self) -> &mut [RecordEntity] {
        &mut self.entities
    }

    pub fn primitives(&self) -> &[PrimitiveHandle] {
        &self.primitives
    }

    /// Nearest primitive hit by `ray`, resolved to its owning entity.
    pub fn hit_test(&self, ray: &Ray) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for handle in &self.primitives {
            let Some(entity) = self.entities.get(handle.owner.0) else {
                continue;
            };
            if let Some(distance) = intersect_primitive(entity, handle.kind, ray) {
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(Hit {
                        entity: handle.owner,
                        primitive: handle.kind,
                        distance,
                    });
                }
            }
        }
        best
    }
}

/// Distance along `ray` to a primitive, if it is hit in front of the origin.
fn intersect_primitive(entity: &RecordEntity, kind: PrimitiveKind, ray: &Ray) -> Option<f32> {
    // Rigid transform: distances are the same in local and world space.
    let to_local = entity.transform().inverse();
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(ray.direction);

    let plane_z = match kind {
        PrimitiveKind::Disc => 0.0,
        PrimitiveKind::Cover => COVER_OFFSET_Z,
    };
    if direction.z.abs() < 1e-6 {
        return None;
    }
    let t = (plane_z - origin.z) / direction.z;
    if t <= 0.0 {
        return None;
    }
    let p: Vec3 = origin + direction * t;

    let inside = match kind {
        PrimitiveKind::Disc => p.x * p.x + p.y * p.y <= DISC_RADIUS * DISC_RADIUS,
        PrimitiveKind::Cover => p.x.abs() <= COVER_HALF_EXTENT && p.y.abs() <= COVER_HALF_EXTENT,
    };
    inside.then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RecordData;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entity_at(pos: Vec3, index: usize) -> RecordEntity {
        let mut rng = StdRng::seed_from_u64(index as u64);
        let data = RecordData {
            title: format!("Title {}", index),
            artist: "Artist".into(),
            ..Default::default()
        };
        RecordEntity::build(data, pos, index, &mut rng).unwrap()
    }

    fn ray(origin: Vec3, towards: Vec3) -> Ray {
        Ray {
            origin,
            direction: (towards - origin).normalize(),
        }
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut reg = SceneRegistry::new();
        let a = reg.push(entity_at(Vec3::ZERO, 0));
        let b = reg.push(entity_at(Vec3::X, 1));
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.primitives().len(), 4);
        assert!(reg.primitives().iter().filter(|p| p.owner == b).count() == 2);
    }

    #[test]
    fn centre_hit_on_cover_resolves_to_owner() {
        let mut reg = SceneRegistry::new();
        reg.push(entity_at(Vec3::new(-4.0, 0.0, 0.0), 0));
        let target = reg.push(entity_at(Vec3::new(4.0, 0.0, 0.0), 1));

        let hit = reg.hit_test(&ray(Vec3::new(4.0, 0.0, 10.0), Vec3::new(4.0, 0.0, 0.0))).unwrap();
        assert_eq!(hit.entity, target);
        // cover is in front of the disc
        assert_eq!(hit.primitive, PrimitiveKind::Cover);
        assert!((hit.distance - (10.0 - COVER_OFFSET_Z)).abs() < 1e-4);
    }

    #[test]
    fn disc_rim_outside_cover_resolves_to_owner() {
        let mut reg = SceneRegistry::new();
        let id = reg.push(entity_at(Vec3::ZERO, 0));
        // 0.85 from centre: outside the 0.7 cover square, inside the unit disc
        let hit = reg.hit_test(&ray(Vec3::new(0.85, 0.0, 10.0), Vec3::new(0.85, 0.0, 0.0))).unwrap();
        assert_eq!(hit.entity, id);
        assert_eq!(hit.primitive, PrimitiveKind::Disc);
    }

    #[test]
    fn miss_returns_none() {
        let mut reg = SceneRegistry::new();
        reg.push(entity_at(Vec3::ZERO, 0));
        assert!(reg.hit_test(&ray(Vec3::new(3.0, 0.0, 10.0), Vec3::new(3.0, 0.0, 0.0))).is_none());
        // pointing away
        assert!(reg.hit_test(&ray(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 20.0))).is_none());
    }

    #[test]
    fn nearest_entity_wins() {
        let mut reg = SceneRegistry::new();
        reg.push(entity_at(Vec3::new(0.0, 0.0, -3.0), 0));
        let front = reg.push(entity_at(Vec3::new(0.0, 0.0, 2.0), 1));
        let hit = reg.hit_test(&ray(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)).unwrap();
        assert_eq!(hit.entity, front);
    }

    #[test]
    fn rotation_is_respected() {
        let mut reg = SceneRegistry::new();
        let mut e = entity_at(Vec3::ZERO, 0);
        e.rotation_y = std::f32::consts::FRAC_PI_2;
        let id = reg.push(e);
        // edge-on from +Z: nothing to hit
        assert!(reg.hit_test(&ray(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)).is_none());
        // face-on from +X
        let hit = reg.hit_test(&ray(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO)).unwrap();
        assert_eq!(hit.entity, id);
    }
}
