use crate::entity::{CelestialEntity, EntityKind};
use crate::error::{Result, UniverseError};
use crate::generator::Galaxy;
use fnv::FnvHashMap;

/// Flat per-entity summary stored in the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityRecord {
    pub id: String,
    pub kind: EntityKind,
    pub category: String,
    pub label: String,
    pub universe_id: u32,
    pub parent: Option<String>,
    pub depth: usize,
}

impl EntityRecord {
    fn from_entity(entity: &CelestialEntity) -> Self {
        Self {
            id: entity.id.clone(),
            kind: entity.kind,
            category: entity.category.clone(),
            label: entity.label.clone(),
            universe_id: entity.universe_id,
            parent: entity.parent.clone(),
            depth: entity.kind.depth(),
        }
    }
}

/// Flattened id index over every galaxy plus the free-floating meteors and relics.
///
/// Ids are unique across the whole session; inserting a duplicate is an error.
/// Insertion order is kept so listings stay stable.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    records: FnvHashMap<String, EntityRecord>,
    order: Vec<String>,
}

impl EntityRegistry {
    pub fn build(galaxies: &[Galaxy], loose: &[CelestialEntity]) -> Result<Self> {
        let mut registry = Self::default();
        for galaxy in galaxies {
            for star in &galaxy.stars {
                registry.insert_tree(star)?;
            }
        }
        for entity in loose {
            registry.insert_tree(entity)?;
        }
        Ok(registry)
    }

    /// Register `entity` and all of its descendants.
    pub fn insert_tree(&mut self, entity: &CelestialEntity) -> Result<()> {
        let mut result = Ok(());
        entity.walk(&mut |e| {
            if result.is_ok() {
                result = self.insert(EntityRecord::from_entity(e));
            }
        });
        result
    }

    fn insert(&mut self, record: EntityRecord) -> Result<()> {
        if self.records.contains_key(&record.id) {
            return Err(UniverseError::InvalidArgument(format!(
                "duplicate entity id '{}'",
                record.id
            )));
        }
        self.order.push(record.id.clone());
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Direct children of `id`, in insertion order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EntityRecord> + 'a {
        self.iter().filter(move |r| r.parent.as_deref() == Some(id))
    }

    /// Case-insensitive match on id or label, for search boxes.
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a EntityRecord> {
        let q = query.to_lowercase();
        self.iter()
            .filter(|r| r.id.to_lowercase().contains(&q) || r.label.to_lowercase().contains(&q))
            .collect()
    }
}
