//! Keep-set: ids the user has chosen to keep.
//!
//! Ids not present in the fetched list are inert; nothing merges or prunes them.

use crate::domain::Entity;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepSet {
    ids: HashSet<i64>,
}

impl KeepSet {
    pub fn new(ids: HashSet<i64>) -> Self {
        Self { ids }
    }

    pub fn is_kept(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn set(&mut self, id: i64, keep: bool) {
        if keep {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
    }

    pub fn toggle(&mut self, id: i64) {
        let keep = !self.is_kept(id);
        self.set(id, keep);
    }

    /// Mark every visible entity as kept. Hidden entities are untouched.
    pub fn select_all(&mut self, visible: &[Entity]) {
        self.ids.extend(visible.iter().map(|e| e.id));
    }

    /// Unmark every visible entity. Hidden entities are untouched.
    pub fn deselect_all(&mut self, visible: &[Entity]) {
        for e in visible {
            self.ids.remove(&e.id);
        }
    }

    /// Number of entities in `all` that are kept.
    pub fn kept_count(&self, all: &[Entity]) -> usize {
        all.iter().filter(|e| self.is_kept(e.id)).count()
    }

    /// Entities of the full fetched list that are not kept, in fetched order.
    pub fn to_leave(&self, all: &[Entity]) -> Vec<Entity> {
        all.iter().filter(|e| !self.is_kept(e.id)).cloned().collect()
    }

    pub fn ids(&self) -> &HashSet<i64> {
        &self.ids
    }
}
