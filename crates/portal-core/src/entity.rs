use crate::error::{Result, UniverseError};
use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Structural role of a celestial entity.
///
/// Star -> Planet -> Satellite is the only legal parent chain. Relics and
/// meteors float freely and never have a parent or children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Star,
    Planet,
    Satellite,
    Relic,
    Meteor,
}

impl EntityKind {
    /// Nesting depth below the owning star; free-floating kinds sit at 0.
    pub fn depth(self) -> usize {
        match self {
            EntityKind::Star | EntityKind::Relic | EntityKind::Meteor => 0,
            EntityKind::Planet => 1,
            EntityKind::Satellite => 2,
        }
    }

    /// Whether an entity of this kind may own a child of kind `child`.
    pub fn can_parent(self, child: EntityKind) -> bool {
        matches!(
            (self, child),
            (EntityKind::Star, EntityKind::Planet) | (EntityKind::Planet, EntityKind::Satellite)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Star => "star",
            EntityKind::Planet => "planet",
            EntityKind::Satellite => "satellite",
            EntityKind::Relic => "relic",
            EntityKind::Meteor => "meteor",
        }
    }
}

/// Closed circular orbit around the parent's local origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Radians per second.
    pub speed: f32,
    /// Euler XYZ tilt of the orbital plane.
    pub inclination: Vec3,
    pub phase: f32,
}

impl Orbit {
    #[inline]
    pub fn angle_at(&self, t: f32) -> f32 {
        self.phase + t * self.speed
    }

    /// Local transform at time `t`: tilt, spin about +Y, then step out to the radius.
    ///
    /// Children are placed in this frame, so their orbits ride along with the
    /// parent's motion.
    pub fn transform_at(&self, t: f32) -> Affine3A {
        let tilt = Quat::from_euler(
            EulerRot::XYZ,
            self.inclination.x,
            self.inclination.y,
            self.inclination.z,
        );
        Affine3A::from_quat(tilt)
            * Affine3A::from_rotation_y(self.angle_at(t))
            * Affine3A::from_translation(Vec3::new(self.radius, 0.0, 0.0))
    }

    /// Position relative to the parent at time `t`.
    pub fn local_position(&self, t: f32) -> Vec3 {
        self.transform_at(t).transform_point3(Vec3::ZERO)
    }
}

/// A node of the generated star -> planet -> satellite forest.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialEntity {
    pub id: String,
    pub kind: EntityKind,
    pub label: String,
    /// Semantic tag, passthrough for cosmetic layers.
    pub category: String,
    pub orbit: Orbit,
    pub visual_size: f32,
    pub color: [f32; 3],
    pub erosion: f32,
    pub tendency: f32,
    /// Tuning drift from 12-TET in cents.
    pub cent_deviation: f32,
    pub qualia: String,
    pub universe_id: u32,
    pub parent: Option<String>,
    pub children: Vec<CelestialEntity>,
}

impl CelestialEntity {
    /// Append `child`, enforcing the legal parent chain and stamping its parent id.
    pub fn attach_child(&mut self, mut child: CelestialEntity) -> Result<&CelestialEntity> {
        if !self.kind.can_parent(child.kind) {
            return Err(UniverseError::InvalidArgument(format!(
                "{} '{}' cannot own {} '{}'",
                self.kind.as_str(),
                self.id,
                child.kind.as_str(),
                child.id
            )));
        }
        child.parent = Some(self.id.clone());
        child.universe_id = self.universe_id;
        self.children.push(child);
        Ok(&self.children[self.children.len() - 1])
    }

    /// Depth-first walk of this entity and all descendants, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a CelestialEntity)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Number of entities in this subtree including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }
}
