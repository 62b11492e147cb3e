//! EntityRegistry - the shared pool of live entities.
//!
//! Entities are stored in registration order; bulk operations filter by name
//! prefix and collision class. While a move pass is running the registry is
//! append-only: spawns are parked until the pass ends (so they are not
//! visited in the same pass) and removals are deferred to the pass boundary
//! (so iteration stays stable).

use crate::entity::{Entity, EntitySpec};
use ember_core::EntityId;

/// Owns all live entities, regardless of which state spawned them.
#[derive(Default)]
pub struct EntityRegistry {
    /// Registration-ordered slots. A slot is only `None` transiently, while
    /// its entity is lent out to a move hook.
    slots: Vec<Option<Entity>>,
    /// Entities spawned during the current pass, visible from the next one.
    pending: Vec<Entity>,
    /// Remove filters requested during the current pass.
    deferred_removals: Vec<(Option<String>, u32)>,
    in_pass: bool,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register an entity.
    ///
    /// Non-unique names replace: if an entity with the same name already
    /// exists, the new one takes its place (last-spawn-wins). Unique names
    /// get a generated suffix and always coexist.
    pub fn spawn(&mut self, spec: EntitySpec) -> EntityId {
        let entity = Entity::from_spec(spec);
        let id = entity.id();
        log::trace!("spawn {:?} (kind {:?})", entity.name(), entity.kind());
        if self.in_pass {
            self.pending.push(entity);
        } else {
            self.insert(entity);
        }
        id
    }

    /// Destroy every entity matching the name prefix (`None` = all) and
    /// collision class (0 = all). During a move pass the removal is applied
    /// at the pass boundary so iteration order stays stable.
    pub fn remove_all(&mut self, prefix: Option<&str>, class: u32) {
        if self.in_pass {
            self.deferred_removals
                .push((prefix.map(String::from), class));
            return;
        }
        let before = self.len();
        self.slots
            .retain(|slot| slot.as_ref().is_some_and(|e| !e.matches(prefix, class)));
        let removed = before - self.len();
        if removed > 0 {
            log::trace!("removed {} entities (prefix={:?}, class={})", removed, prefix, class);
        }
    }

    /// First entity with this exact name, if any.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Live entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entities whose `expires_with` state just left the active set.
    pub(crate) fn remove_expired(&mut self, exited: &[String]) {
        self.slots.retain(|slot| {
            slot.as_ref().is_some_and(|e| {
                e.expires_with()
                    .map_or(true, |s| !exited.iter().any(|x| x == s))
            })
        });
    }

    pub(crate) fn begin_pass(&mut self) {
        debug_assert!(!self.in_pass, "move passes do not nest");
        self.in_pass = true;
    }

    /// Flush deferred removals first, then park-released spawns: a removal
    /// requested during the pass also covers entities spawned in that same
    /// pass.
    pub(crate) fn end_pass(&mut self) {
        self.in_pass = false;
        let removals = std::mem::take(&mut self.deferred_removals);
        for (prefix, class) in &removals {
            self.remove_all(prefix.as_deref(), *class);
            self.pending
                .retain(|e| !e.matches(prefix.as_deref(), *class));
        }
        for entity in std::mem::take(&mut self.pending) {
            self.insert(entity);
        }
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn take_slot(&mut self, index: usize) -> Option<Entity> {
        self.slots.get_mut(index).and_then(|s| s.take())
    }

    pub(crate) fn put_back(&mut self, index: usize, entity: Entity) {
        self.slots[index] = Some(entity);
    }

    fn insert(&mut self, entity: Entity) {
        // Last-spawn-wins for non-unique names: suffixed unique names can
        // never collide, so an exact-name sweep is correct for both.
        self.slots
            .retain(|slot| slot.as_ref().is_some_and(|e| e.name() != entity.name()));
        self.slots.push(Some(entity));
    }
}
