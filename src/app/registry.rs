//! Item entity registry
//!
//! Stands in for an engine's instantiate/destroy pair: a plain registry
//! keyed by identity with explicit create and destroy. Destroy is
//! idempotent, which the simulation relies on when a click races the end of
//! a session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::sim::{ItemId, ItemSpawner};

/// One live item entity on the conveyor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemEntity {
    pub id: ItemId,
    pub position: [f32; 2],
}

/// Registry of live item entities, keyed by id
#[derive(Debug, Default)]
pub struct EntityRegistry {
    next_id: u64,
    entities: HashMap<ItemId, ItemEntity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity at `position` and returns its freshly allocated id
    pub fn spawn(&mut self, position: [f32; 2]) -> ItemId {
        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.entities.insert(id, ItemEntity { id, position });
        id
    }

    /// Removes the entity for `id`; returns false when it was already gone
    pub fn destroy(&mut self, id: ItemId) -> bool {
        self.entities.remove(&id).is_some()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemEntity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Ids of all live entities, in no particular order
    pub fn live_ids(&self) -> Vec<ItemId> {
        self.entities.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Shared handle over an [`EntityRegistry`]
///
/// The simulation owns one clone as its spawner while the host keeps
/// another to observe (and click) the entities. Single-threaded; all
/// access happens on the one host dispatch queue.
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Rc<RefCell<EntityRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of all live entities
    pub fn live_ids(&self) -> Vec<ItemId> {
        self.inner.borrow().live_ids()
    }

    /// Position of a live entity, if it exists
    pub fn position_of(&self, id: ItemId) -> Option<[f32; 2]> {
        self.inner.borrow().get(id).map(|entity| entity.position)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl ItemSpawner for SharedRegistry {
    fn spawn(&mut self, position: [f32; 2]) -> ItemId {
        self.inner.borrow_mut().spawn(position)
    }

    fn destroy(&mut self, id: ItemId) {
        self.inner.borrow_mut().destroy(id);
    }
}
