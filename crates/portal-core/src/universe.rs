//! Static universe table: category vocabularies, per-category traits and the
//! child-generation policy of each top-level galaxy.

use crate::constants::WARP_ARRIVAL_OFFSET;
use crate::error::{Result, UniverseError};
use crate::state::Viewpoint;
use glam::Vec3;

/// Broad flavour of a universe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniverseKind {
    Canon,
    Xen,
    Unformed,
}

/// Cosmetic base tuple of a star category.
///
/// `distance` ranges are disjoint and grow with the category's position in
/// its profile, so a later category always orbits further from the galactic
/// core than an earlier one.
#[derive(Clone, Debug)]
pub struct CategoryTraits {
    pub name: &'static str,
    pub distance: (f32, f32),
    pub color: [f32; 3],
    pub base_size: f32,
    pub base_erosion: f32,
    pub qualia: &'static str,
    /// Analyzable stars carry planets (and sometimes satellites).
    pub analyzable: bool,
}

/// How a child's erosion is derived from its parent.
#[derive(Clone, Copy, Debug)]
pub enum ErosionRule {
    /// Parent erosion times a factor.
    Scaled(f32),
    /// Fresh sample in `[lo, hi)`, independent of the parent.
    Range(f32, f32),
}

/// Planet/satellite generation policy for analyzable stars.
#[derive(Clone, Debug)]
pub struct ChildPolicy {
    /// Inclusive planet count range, never above 2.
    pub planet_count: (u32, u32),
    pub satellite_chance: f32,
    /// Radius range of the first planet; later planets add `planet_spacing` each.
    pub planet_radius: (f32, f32),
    pub planet_spacing: f32,
    pub planet_speed: (f32, f32),
    pub planet_size: (f32, f32),
    pub planet_erosion: ErosionRule,
    /// `None` keeps the star's category.
    pub planet_category: Option<&'static str>,
    pub planet_label: &'static str,
    /// `None` keeps the star's color, otherwise indexed by star index.
    pub planet_palette: Option<&'static [[f32; 3]]>,
    pub satellite_radius: f32,
    pub satellite_speed: f32,
    pub satellite_size: f32,
    pub satellite_erosion: ErosionRule,
    pub satellite_category: &'static str,
    pub satellite_label: &'static str,
    /// Full width of the seeded cent drift added at each level down the tree.
    pub planet_cent_drift: f32,
    pub satellite_cent_drift: f32,
}

#[derive(Clone, Debug)]
pub struct UniverseProfile {
    pub id: u32,
    pub name: &'static str,
    pub kind: UniverseKind,
    /// Star id prefix, e.g. `Kp` gives `Kp.0001`.
    pub prefix: &'static str,
    pub origin: Vec3,
    pub theme_color: [f32; 3],
    pub is_microtonal: bool,
    pub erosion: f32,
    pub tendency: f32,
    pub star_count: u32,
    pub categories: &'static [CategoryTraits],
    /// Extra seeded erosion added on top of the category base, clamped to 1.
    pub erosion_jitter: f32,
    /// Seeded size variation in `[-size_jitter, size_jitter]`.
    pub size_jitter: f32,
    /// Full width of the seeded star cent deviation around 0.
    pub star_cent_spread: f32,
    pub children: ChildPolicy,
}

impl UniverseProfile {
    /// Category assigned to the star at `index` (round-robin).
    pub fn category_for(&self, index: usize) -> &CategoryTraits {
        &self.categories[index % self.categories.len()]
    }

    pub fn category_named(&self, name: &str) -> Option<&CategoryTraits> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Arrival viewpoint used as the destination of a cinematic warp.
    pub fn anchor(&self) -> Viewpoint {
        Viewpoint {
            position: self.origin + WARP_ARRIVAL_OFFSET,
            look_target: self.origin,
        }
    }
}

const CANON_CATEGORIES: &[CategoryTraits] = &[
    CategoryTraits {
        name: "Original",
        distance: (30.0, 45.0),
        color: [1.0, 0.267, 0.0],
        base_size: 1.0,
        base_erosion: 0.05,
        qualia: "Artificial_Grid",
        analyzable: true,
    },
    CategoryTraits {
        name: "Cover",
        distance: (50.0, 70.0),
        color: [1.0, 1.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.1,
        qualia: "Mimicry",
        analyzable: false,
    },
    CategoryTraits {
        name: "Remix",
        distance: (80.0, 100.0),
        color: [0.0, 1.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.4,
        qualia: "Fluctuation",
        analyzable: true,
    },
    CategoryTraits {
        name: "Bootleg",
        distance: (105.0, 125.0),
        color: [1.0, 0.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.7,
        qualia: "Violation",
        analyzable: false,
    },
    CategoryTraits {
        name: "WIP",
        distance: (130.0, 150.0),
        color: [0.8, 1.0, 0.0],
        base_size: 0.4,
        base_erosion: 0.3,
        qualia: "Unborn",
        analyzable: false,
    },
    CategoryTraits {
        name: "???",
        distance: (160.0, 200.0),
        color: [0.133, 0.0, 0.2],
        base_size: 1.0,
        base_erosion: 1.0,
        qualia: "The_Void",
        analyzable: false,
    },
];

const XEN_CATEGORIES: &[CategoryTraits] = &[
    CategoryTraits {
        name: "Pure_Micro",
        distance: (30.0, 55.0),
        color: [1.0, 0.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.8,
        qualia: "Fluid_Harmony",
        analyzable: true,
    },
    CategoryTraits {
        name: "Just_Intonation",
        distance: (60.0, 85.0),
        color: [0.533, 0.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.8,
        qualia: "Fluid_Harmony",
        analyzable: true,
    },
    CategoryTraits {
        name: "Spectral",
        distance: (90.0, 115.0),
        color: [1.0, 0.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.8,
        qualia: "Fluid_Harmony",
        analyzable: true,
    },
    CategoryTraits {
        name: "Xenharmonic",
        distance: (120.0, 150.0),
        color: [0.533, 0.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.8,
        qualia: "Fluid_Harmony",
        analyzable: true,
    },
    CategoryTraits {
        name: "Noise",
        distance: (155.0, 180.0),
        color: [1.0, 0.0, 1.0],
        base_size: 1.0,
        base_erosion: 0.8,
        qualia: "Fluid_Harmony",
        analyzable: true,
    },
];

const NASCENT_CATEGORIES: &[CategoryTraits] = &[
    CategoryTraits {
        name: "Undefined",
        distance: (40.0, 60.0),
        color: [1.0, 1.0, 1.0],
        base_size: 0.9,
        base_erosion: 0.0,
        qualia: "Superposition",
        analyzable: false,
    },
    CategoryTraits {
        name: "Potential",
        distance: (65.0, 85.0),
        color: [1.0, 1.0, 1.0],
        base_size: 0.9,
        base_erosion: 0.0,
        qualia: "Superposition",
        analyzable: false,
    },
    CategoryTraits {
        name: "Quantum",
        distance: (90.0, 110.0),
        color: [1.0, 1.0, 1.0],
        base_size: 0.9,
        base_erosion: 0.0,
        qualia: "Superposition",
        analyzable: false,
    },
    CategoryTraits {
        name: "Collapsed",
        distance: (115.0, 135.0),
        color: [1.0, 1.0, 1.0],
        base_size: 0.9,
        base_erosion: 0.0,
        qualia: "Superposition",
        analyzable: false,
    },
    CategoryTraits {
        name: "Nascent",
        distance: (140.0, 160.0),
        color: [1.0, 1.0, 1.0],
        base_size: 0.9,
        base_erosion: 0.0,
        qualia: "Superposition",
        analyzable: false,
    },
];

const XEN_PLANET_PALETTE: &[[f32; 3]] = &[[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 0.0]];

const CANON_CHILDREN: ChildPolicy = ChildPolicy {
    planet_count: (1, 1),
    satellite_chance: 0.3,
    planet_radius: (5.0, 5.0),
    planet_spacing: 3.0,
    planet_speed: (0.5, 0.5),
    planet_size: (0.2, 0.2),
    planet_erosion: ErosionRule::Scaled(0.5),
    planet_category: None,
    planet_label: "Analysis",
    planet_palette: None,
    satellite_radius: 1.5,
    satellite_speed: 1.0,
    satellite_size: 0.08,
    satellite_erosion: ErosionRule::Scaled(0.3),
    satellite_category: "Sub_Analysis",
    satellite_label: "Sub_Analysis",
    planet_cent_drift: 0.0,
    satellite_cent_drift: 0.0,
};

const XEN_CHILDREN: ChildPolicy = ChildPolicy {
    planet_count: (1, 2),
    satellite_chance: 0.4,
    planet_radius: (6.0, 8.0),
    planet_spacing: 4.0,
    planet_speed: (0.4, 0.7),
    planet_size: (0.25, 0.4),
    planet_erosion: ErosionRule::Range(0.6, 0.9),
    planet_category: Some("Harmonic"),
    planet_label: "Harmonic",
    planet_palette: Some(XEN_PLANET_PALETTE),
    satellite_radius: 2.0,
    satellite_speed: 0.8,
    satellite_size: 0.1,
    satellite_erosion: ErosionRule::Range(0.5, 0.5),
    satellite_category: "Overtone",
    satellite_label: "Overtone",
    planet_cent_drift: 30.0,
    satellite_cent_drift: 15.0,
};

/// Every known universe, indexed by id.
pub static UNIVERSES: [UniverseProfile; 3] = [
    UniverseProfile {
        id: 0,
        name: "CANON",
        kind: UniverseKind::Canon,
        prefix: "Kp",
        origin: Vec3::new(0.0, 0.0, 0.0),
        theme_color: [1.0, 0.267, 0.0],
        is_microtonal: false,
        erosion: 0.2,
        tendency: 0.1,
        star_count: 40,
        categories: CANON_CATEGORIES,
        erosion_jitter: 0.0,
        size_jitter: 0.0,
        star_cent_spread: 0.0,
        children: CANON_CHILDREN,
    },
    UniverseProfile {
        id: 1,
        name: "XEN",
        kind: UniverseKind::Xen,
        prefix: "Mu",
        origin: Vec3::new(2000.0, 0.0, 0.0),
        theme_color: [1.0, 0.0, 1.0],
        is_microtonal: true,
        erosion: 0.8,
        tendency: 0.6,
        star_count: 40,
        categories: XEN_CATEGORIES,
        erosion_jitter: 0.2,
        size_jitter: 0.0,
        star_cent_spread: 100.0,
        children: XEN_CHILDREN,
    },
    UniverseProfile {
        id: 2,
        name: "NASCENT",
        kind: UniverseKind::Unformed,
        prefix: "Ns",
        origin: Vec3::new(1000.0, 0.0, 1000.0),
        theme_color: [1.0, 1.0, 1.0],
        is_microtonal: false,
        erosion: 0.0,
        tendency: 0.0,
        star_count: 30,
        categories: NASCENT_CATEGORIES,
        erosion_jitter: 0.0,
        size_jitter: 0.3,
        star_cent_spread: 0.0,
        children: CANON_CHILDREN,
    },
];

/// Look up a universe profile by id.
pub fn universe(id: u32) -> Result<&'static UniverseProfile> {
    UNIVERSES
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| UniverseError::InvalidArgument(format!("unknown universe id {id}")))
}
