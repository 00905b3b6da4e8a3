use std::hash::Hash;

use super::{DisjointSets, SetArena, SetError, SetId};

/// Union-find without any balancing.
///
/// `union(a, b)` always hangs the root of `a` under the root of `b` and `find` never rewrites
/// parents, so a find can cost as much as the size of the set.
#[derive(Debug, Clone)]
pub struct TrivialDisjointSets<E> {
    arena: SetArena<E>,
}

impl<E: Hash + Eq> TrivialDisjointSets<E> {
    pub fn new() -> Self {
        Self {
            arena: SetArena::default(),
        }
    }

    pub fn from_elements(elements: impl IntoIterator<Item = E>) -> Result<Self, SetError> {
        let mut sets = Self::new();
        for data in elements {
            sets.make_set(data)?;
        }
        Ok(sets)
    }
}

impl<E: Hash + Eq> Default for TrivialDisjointSets<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Hash + Eq> DisjointSets<E> for TrivialDisjointSets<E> {
    fn make_set(&mut self, data: E) -> Result<(), SetError> {
        self.arena.insert(data)
    }

    fn union(&mut self, a: &E, b: &E) -> Result<(), SetError> {
        let (a, b) = self.arena.slots(a, b)?;
        let (root_a, root_b) = (self.arena.root(a), self.arena.root(b));
        if root_a == root_b {
            return Err(SetError::AlreadyMerged);
        }

        self.arena.link(root_a, root_b);
        Ok(())
    }

    fn find(&mut self, data: &E) -> Option<SetId> {
        let slot = self.arena.slot(data)?;
        Some(self.arena.id(self.arena.root(slot)))
    }

    fn number_of_sets(&self) -> usize {
        self.arena.set_count
    }

    fn average_depth(&self) -> f64 {
        self.arena.average_depth()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn contains(&self, data: &E) -> bool {
        self.arena.contains(data)
    }
}
