//! Seeded procedural generation of the celestial forest.
//!
//! Every generator takes an explicit seed and threads a single `StdRng`
//! through the whole call, so the same inputs always produce bit-identical
//! output. There is no ambient randomness anywhere in this module.

use crate::constants::*;
use crate::entity::{CelestialEntity, EntityKind, Orbit};
use crate::error::{Result, UniverseError};
use crate::universe::{universe, ErosionRule, UniverseProfile};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

/// One generated galaxy: its stars (with nested children) placed around `origin`.
#[derive(Clone, Debug, PartialEq)]
pub struct Galaxy {
    pub universe_id: u32,
    pub origin: Vec3,
    pub stars: Vec<CelestialEntity>,
}

impl Galaxy {
    /// Stars and all their descendants, parents before children.
    pub fn flatten(&self) -> Vec<&CelestialEntity> {
        let mut out = Vec::with_capacity(self.entity_count());
        for star in &self.stars {
            star.walk(&mut |e| out.push(e));
        }
        out
    }

    pub fn entity_count(&self) -> usize {
        self.stars.iter().map(|s| s.subtree_len()).sum()
    }

    pub fn star(&self, id: &str) -> Option<&CelestialEntity> {
        self.stars.iter().find(|s| s.id == id)
    }

    pub fn star_mut(&mut self, id: &str) -> Option<&mut CelestialEntity> {
        self.stars.iter_mut().find(|s| s.id == id)
    }
}

/// Derive an independent seed from a base seed and a salt (universe index, impact count, ...).
#[inline]
pub fn mix_seed(seed: u64, salt: u64) -> u64 {
    seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[inline]
fn sample(rng: &mut StdRng, range: (f32, f32)) -> f32 {
    range.0 + rng.gen::<f32>() * (range.1 - range.0)
}

/// Signed sample in `[-width/2, width/2)`.
#[inline]
fn centered(rng: &mut StdRng, width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * width
}

#[inline]
fn small_tilt(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        centered(rng, INCLINATION_SPREAD),
        0.0,
        centered(rng, INCLINATION_SPREAD),
    )
}

fn child_erosion(rule: ErosionRule, parent: f32, rng: &mut StdRng) -> f32 {
    match rule {
        ErosionRule::Scaled(factor) => (parent * factor).clamp(0.0, 1.0),
        ErosionRule::Range(lo, hi) => sample(rng, (lo, hi)).clamp(0.0, 1.0),
    }
}

/// Generate `count` stars for `universe_id` around `offset`.
///
/// Stars cycle through the universe's category list (`i % len`), so
/// categories are spread evenly. Analyzable stars receive up to two planets,
/// and each planet may receive one satellite. Children orbit their parent's
/// local origin and inherit its cent deviation plus a bounded seeded drift.
pub fn generate(count: i32, offset: Vec3, universe_id: u32, seed: u64) -> Result<Galaxy> {
    if count < 0 {
        return Err(UniverseError::InvalidArgument(format!(
            "star count must be non-negative, got {count}"
        )));
    }
    let profile = universe(universe_id)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stars = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        stars.push(build_star(profile, i, &mut rng)?);
    }
    log::debug!(
        "[generator] universe={} stars={} seed={}",
        profile.name,
        stars.len(),
        seed
    );
    Ok(Galaxy {
        universe_id,
        origin: offset,
        stars,
    })
}

fn build_star(profile: &UniverseProfile, index: usize, rng: &mut StdRng) -> Result<CelestialEntity> {
    let traits = profile.category_for(index);
    let id = format!("{}.{:04}", profile.prefix, index + 1);

    let radius = sample(rng, traits.distance);
    let visual_size = traits.base_size + (rng.gen::<f32>() * 2.0 - 1.0) * profile.size_jitter;
    let erosion = (traits.base_erosion + rng.gen::<f32>() * profile.erosion_jitter).clamp(0.0, 1.0);
    let cent_deviation = centered(rng, profile.star_cent_spread);
    let orbit = Orbit {
        radius,
        speed: sample(rng, STAR_SPEED_RANGE),
        inclination: small_tilt(rng),
        phase: rng.gen::<f32>() * PHASE_MAX,
    };

    let mut star = CelestialEntity {
        label: id.clone(),
        id,
        kind: EntityKind::Star,
        category: traits.name.to_string(),
        orbit,
        visual_size,
        color: traits.color,
        erosion,
        tendency: profile.tendency,
        cent_deviation,
        qualia: traits.qualia.to_string(),
        universe_id: profile.id,
        parent: None,
        children: Vec::new(),
    };

    if traits.analyzable {
        let policy = &profile.children;
        let planet_count = rng.gen_range(policy.planet_count.0..=policy.planet_count.1);
        for p in 0..planet_count as usize {
            let planet = build_planet(profile, &star, index, p, rng)?;
            star.attach_child(planet)?;
        }
    }
    Ok(star)
}

fn build_planet(
    profile: &UniverseProfile,
    star: &CelestialEntity,
    star_index: usize,
    p: usize,
    rng: &mut StdRng,
) -> Result<CelestialEntity> {
    let policy = &profile.children;
    let id = format!("{}-P{}", star.id, p + 1);
    let radius = sample(rng, policy.planet_radius) + p as f32 * policy.planet_spacing;
    debug_assert!(radius < PLANET_ZONE, "planet {id} escapes the planet zone");

    let color = policy
        .planet_palette
        .map(|pal| pal[star_index % pal.len()])
        .unwrap_or(star.color);
    let mut planet = CelestialEntity {
        id,
        kind: EntityKind::Planet,
        label: format!("{}_{}", policy.planet_label, p + 1),
        category: policy
            .planet_category
            .map(str::to_string)
            .unwrap_or_else(|| star.category.clone()),
        orbit: Orbit {
            radius,
            speed: sample(rng, policy.planet_speed),
            inclination: small_tilt(rng),
            phase: rng.gen::<f32>() * PHASE_MAX,
        },
        visual_size: sample(rng, policy.planet_size),
        color,
        erosion: child_erosion(policy.planet_erosion, star.erosion, rng),
        tendency: star.tendency,
        cent_deviation: star.cent_deviation + centered(rng, policy.planet_cent_drift),
        qualia: star.qualia.clone(),
        universe_id: star.universe_id,
        parent: None,
        children: Vec::new(),
    };

    if rng.gen::<f32>() < policy.satellite_chance {
        let satellite = CelestialEntity {
            id: format!("{}-S1", planet.id),
            kind: EntityKind::Satellite,
            label: format!("{}_{}.1", policy.satellite_label, p + 1),
            category: policy.satellite_category.to_string(),
            orbit: Orbit {
                radius: policy.satellite_radius,
                speed: policy.satellite_speed,
                inclination: small_tilt(rng),
                phase: rng.gen::<f32>() * PHASE_MAX,
            },
            visual_size: policy.satellite_size,
            color: planet.color,
            erosion: child_erosion(policy.satellite_erosion, star.erosion, rng),
            tendency: planet.tendency,
            cent_deviation: planet.cent_deviation + centered(rng, policy.satellite_cent_drift),
            qualia: planet.qualia.clone(),
            universe_id: planet.universe_id,
            parent: None,
            children: Vec::new(),
        };
        planet.attach_child(satellite)?;
    }
    Ok(planet)
}

/// Oort-cloud meteors orbiting far outside the star field (`Mt.001`, `Mt.002`, ...).
pub fn generate_meteor_belt(count: usize, universe_id: u32, seed: u64) -> Vec<CelestialEntity> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| CelestialEntity {
            id: format!("Mt.{:03}", i + 1),
            kind: EntityKind::Meteor,
            label: format!("Ref_Signal_{}", i + 1),
            category: "Reference".to_string(),
            visual_size: 0.3 + rng.gen::<f32>() * 0.4,
            orbit: Orbit {
                radius: sample(&mut rng, METEOR_DISTANCE_RANGE),
                speed: sample(&mut rng, METEOR_SPEED_RANGE),
                inclination: Vec3::new(centered(&mut rng, PI), 0.0, centered(&mut rng, PI)),
                phase: rng.gen::<f32>() * TAU,
            },
            color: [0.667, 0.667, 0.667],
            erosion: rng.gen::<f32>(),
            tendency: 0.0,
            cent_deviation: 0.0,
            qualia: "Unknown_Signal".to_string(),
            universe_id,
            parent: None,
            children: Vec::new(),
        })
        .collect()
}

/// One relic shard per question (`Shard-0`, `Shard-1`, ...), labelled with the question itself.
pub fn generate_relic_shards(questions: &[&str], universe_id: u32, seed: u64) -> Vec<CelestialEntity> {
    let mut rng = StdRng::seed_from_u64(seed);
    questions
        .iter()
        .enumerate()
        .map(|(i, question)| CelestialEntity {
            id: format!("Shard-{i}"),
            kind: EntityKind::Relic,
            label: question.to_string(),
            category: "Relic".to_string(),
            visual_size: 0.8,
            orbit: Orbit {
                radius: sample(&mut rng, RELIC_DISTANCE_RANGE),
                speed: 0.05,
                inclination: Vec3::new(rng.gen::<f32>() * PI, 0.0, rng.gen::<f32>() * PI),
                phase: rng.gen::<f32>() * PI,
            },
            color: [1.0, 1.0, 1.0],
            erosion: 0.8,
            tendency: 0.0,
            cent_deviation: 0.0,
            qualia: "Philosophical_Debris".to_string(),
            universe_id,
            parent: None,
            children: Vec::new(),
        })
        .collect()
}

/// Build the planet a meteor impact leaves behind on `star`.
///
/// The new id takes the next free `-P{n}` suffix. Attributes are a pure
/// function of `seed` and that suffix.
pub fn impact_planet(star: &CelestialEntity, seed: u64) -> Result<CelestialEntity> {
    if star.kind != EntityKind::Star {
        return Err(UniverseError::InvalidArgument(format!(
            "impact target '{}' is a {}, not a star",
            star.id,
            star.kind.as_str()
        )));
    }
    let mut n = star.children.len() + 1;
    while star.children.iter().any(|c| c.id == format!("{}-P{}", star.id, n)) {
        n += 1;
    }
    let mut rng = StdRng::seed_from_u64(mix_seed(seed, n as u64));
    Ok(CelestialEntity {
        id: format!("{}-P{}", star.id, n),
        kind: EntityKind::Planet,
        label: format!("Impact_{n}"),
        category: "Impact".to_string(),
        orbit: Orbit {
            radius: sample(&mut rng, IMPACT_RADIUS_RANGE),
            speed: 0.3 + rng.gen::<f32>() * 0.3,
            inclination: small_tilt(&mut rng),
            phase: rng.gen::<f32>() * PHASE_MAX,
        },
        visual_size: 0.3,
        color: [1.0, 0.667, 0.0],
        erosion: (star.erosion + 0.3).min(1.0),
        tendency: star.tendency,
        cent_deviation: star.cent_deviation + centered(&mut rng, 30.0),
        qualia: "Collision".to_string(),
        universe_id: star.universe_id,
        parent: None,
        children: Vec::new(),
    })
}
