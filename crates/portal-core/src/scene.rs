//! Per-frame resolved world positions, the only view of the forest the
//! camera controller sees.

use crate::constants::PICK_RADIUS_SCALE;
use crate::entity::{CelestialEntity, EntityKind};
use fnv::FnvHashMap;
use glam::{Affine3A, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedBody {
    pub position: Vec3,
    /// Visual radius used for reticle picking.
    pub radius: f32,
    pub kind: EntityKind,
}

/// Registry of `id -> world position` for the current frame.
#[derive(Clone, Debug, Default)]
pub struct ResolvedScene {
    bodies: FnvHashMap<String, ResolvedBody>,
}

impl ResolvedScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, body: ResolvedBody) {
        self.bodies.insert(id.into(), body);
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedBody> {
        self.bodies.get(id)
    }

    pub fn position(&self, id: &str) -> Option<Vec3> {
        self.bodies.get(id).map(|b| b.position)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Compose orbit transforms down `entity`'s subtree under `parent` and record
    /// every world position at time `t`.
    pub fn resolve_tree(&mut self, entity: &CelestialEntity, parent: Affine3A, t: f32) {
        let world = parent * entity.orbit.transform_at(t);
        self.insert(
            entity.id.clone(),
            ResolvedBody {
                position: world.transform_point3(Vec3::ZERO),
                radius: entity.visual_size,
                kind: entity.kind,
            },
        );
        for child in &entity.children {
            self.resolve_tree(child, world, t);
        }
    }

    /// Nearest body hit by the ray, if any. Ties keep the first id in sort order.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<&str> {
        let dir = ray_dir.try_normalize()?;
        let mut best: Option<(&str, f32)> = None;
        for (id, body) in &self.bodies {
            let Some(t) = ray_sphere(ray_origin, dir, body.position, body.radius * PICK_RADIUS_SCALE)
            else {
                continue;
            };
            let closer = match best {
                None => true,
                Some((best_id, best_t)) => t < best_t || (t == best_t && id.as_str() < best_id),
            };
            if closer {
                best = Some((id.as_str(), t));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Distance along a normalized ray to the first intersection with a sphere.
///
/// A ray starting inside the sphere hits its far side.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sq;
    (far >= 0.0).then_some(far)
}
