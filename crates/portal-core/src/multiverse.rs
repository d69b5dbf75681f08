use crate::constants::{METEOR_COUNT, QUESTIONS};
use crate::entity::{CelestialEntity, EntityKind};
use crate::error::{Result, UniverseError};
use crate::generator::{
    generate, generate_meteor_belt, generate_relic_shards, impact_planet, mix_seed, Galaxy,
};
use crate::registry::EntityRegistry;
use crate::scene::ResolvedScene;
use crate::universe::{universe, UNIVERSES};
use glam::Affine3A;

const METEOR_SALT: u64 = 0x4D45_5445;
const RELIC_SALT: u64 = 0x5348_4152;
/// Meteors and relics drift around the canon galaxy.
const LOOSE_UNIVERSE: u32 = 0;

/// Everything generated for one session: a galaxy per known universe, the
/// meteor belt, the relic shards and the flattened id registry.
///
/// Topology is fixed after construction except for impacts, which only ever
/// append a planet to an existing star.
#[derive(Clone, Debug)]
pub struct Multiverse {
    galaxies: Vec<Galaxy>,
    meteors: Vec<CelestialEntity>,
    relics: Vec<CelestialEntity>,
    registry: EntityRegistry,
}

impl Multiverse {
    /// Generate every universe from one session seed. Per-universe seeds are
    /// derived from it so universes can be regenerated independently.
    pub fn generate(seed: u64) -> Result<Self> {
        let galaxies = UNIVERSES
            .iter()
            .enumerate()
            .map(|(i, profile)| {
                generate(
                    profile.star_count as i32,
                    profile.origin,
                    profile.id,
                    mix_seed(seed, i as u64 + 1),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let meteors = generate_meteor_belt(METEOR_COUNT, LOOSE_UNIVERSE, mix_seed(seed, METEOR_SALT));
        let relics = generate_relic_shards(&QUESTIONS, LOOSE_UNIVERSE, mix_seed(seed, RELIC_SALT));

        let mut registry = EntityRegistry::build(&galaxies, &meteors)?;
        for relic in &relics {
            registry.insert_tree(relic)?;
        }
        log::info!(
            "[multiverse] galaxies={} entities={} seed={}",
            galaxies.len(),
            registry.len(),
            seed
        );
        Ok(Self {
            galaxies,
            meteors,
            relics,
            registry,
        })
    }

    pub fn galaxies(&self) -> &[Galaxy] {
        &self.galaxies
    }

    pub fn galaxy(&self, universe_id: u32) -> Option<&Galaxy> {
        self.galaxies.iter().find(|g| g.universe_id == universe_id)
    }

    pub fn meteors(&self) -> &[CelestialEntity] {
        &self.meteors
    }

    pub fn relics(&self) -> &[CelestialEntity] {
        &self.relics
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Full entity data for `id`, searching every tree.
    pub fn entity(&self, id: &str) -> Option<&CelestialEntity> {
        fn find<'a>(e: &'a CelestialEntity, id: &str) -> Option<&'a CelestialEntity> {
            if e.id == id {
                return Some(e);
            }
            e.children.iter().find_map(|c| find(c, id))
        }
        self.galaxies
            .iter()
            .flat_map(|g| g.stars.iter())
            .chain(self.meteors.iter())
            .chain(self.relics.iter())
            .find_map(|e| find(e, id))
    }

    /// Resolve every entity's world position at time `t`.
    pub fn resolve(&self, t: f32) -> ResolvedScene {
        let mut scene = ResolvedScene::new();
        self.resolve_into(t, &mut scene);
        scene
    }

    /// Like `resolve`, reusing `scene`'s allocation.
    pub fn resolve_into(&self, t: f32, scene: &mut ResolvedScene) {
        scene.clear();
        for galaxy in &self.galaxies {
            let origin = Affine3A::from_translation(galaxy.origin);
            for star in &galaxy.stars {
                scene.resolve_tree(star, origin, t);
            }
        }
        // Loose bodies orbit the canon origin; a missing profile only means no offset.
        let loose_origin = universe(LOOSE_UNIVERSE)
            .map(|u| Affine3A::from_translation(u.origin))
            .unwrap_or(Affine3A::IDENTITY);
        for entity in self.meteors.iter().chain(self.relics.iter()) {
            scene.resolve_tree(entity, loose_origin, t);
        }
    }

    /// Append the planet a meteor impact leaves on `star_id` and register it.
    pub fn record_impact(&mut self, star_id: &str, seed: u64) -> Result<&CelestialEntity> {
        match self.registry.get(star_id) {
            None => return Err(UniverseError::UnresolvedReference(star_id.to_string())),
            Some(record) if record.kind != EntityKind::Star => {
                return Err(UniverseError::InvalidArgument(format!(
                    "impact target '{star_id}' is a {}, not a star",
                    record.kind.as_str()
                )))
            }
            Some(_) => {}
        }
        let star = self
            .galaxies
            .iter_mut()
            .find_map(|g| g.star_mut(star_id))
            .ok_or_else(|| UniverseError::UnresolvedReference(star_id.to_string()))?;
        let planet = impact_planet(star, seed)?;
        if self.registry.contains(&planet.id) {
            return Err(UniverseError::InvalidArgument(format!(
                "duplicate entity id '{}'",
                planet.id
            )));
        }
        let attached = star.attach_child(planet)?;
        self.registry.insert_tree(attached)?;
        log::info!("[impact] {} gained {}", star_id, attached.id);
        Ok(attached)
    }
}
