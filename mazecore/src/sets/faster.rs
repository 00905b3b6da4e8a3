use std::{cmp::Ordering, hash::Hash, mem};

use rand::{thread_rng, Rng, SeedableRng as _};

use super::{DisjointSets, SetArena, SetError, SetId};
use crate::Random;

/// Union by rank with path halving.
///
/// Ties in rank are broken by a coin flip from the owned `rng`, so pass a seeded generator via
/// [`FasterDisjointSets::with_rng`] when the resulting trees have to be reproducible.
#[derive(Debug, Clone)]
pub struct FasterDisjointSets<E, R = Random> {
    arena: SetArena<E>,
    rng: R,
}

impl<E: Hash + Eq> FasterDisjointSets<E, Random> {
    pub fn new() -> Self {
        Self::with_rng(Random::seed_from_u64(thread_rng().gen()))
    }
}

impl<E: Hash + Eq> Default for FasterDisjointSets<E, Random> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Hash + Eq, R: Rng> FasterDisjointSets<E, R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            arena: SetArena::default(),
            rng,
        }
    }

    pub fn from_elements(
        elements: impl IntoIterator<Item = E>,
        rng: R,
    ) -> Result<Self, SetError> {
        let mut sets = Self::with_rng(rng);
        for data in elements {
            sets.make_set(data)?;
        }
        Ok(sets)
    }
}

impl<E: Hash + Eq, R: Rng> DisjointSets<E> for FasterDisjointSets<E, R> {
    fn make_set(&mut self, data: E) -> Result<(), SetError> {
        self.arena.insert(data)
    }

    fn union(&mut self, a: &E, b: &E) -> Result<(), SetError> {
        let (a, b) = self.arena.slots(a, b)?;
        let mut root_a = self.arena.root_halving(a);
        let mut root_b = self.arena.root_halving(b);
        if root_a == root_b {
            return Err(SetError::AlreadyMerged);
        }

        let nodes = &self.arena.nodes;
        match nodes[root_a].rank.cmp(&nodes[root_b].rank) {
            Ordering::Greater => self.arena.link(root_b, root_a),
            Ordering::Less => self.arena.link(root_a, root_b),
            Ordering::Equal => {
                if self.rng.gen_bool(0.5) {
                    mem::swap(&mut root_a, &mut root_b);
                }
                self.arena.link(root_a, root_b);
                self.arena.nodes[root_b].rank += 1;
            }
        }

        Ok(())
    }

    fn find(&mut self, data: &E) -> Option<SetId> {
        let slot = self.arena.slot(data)?;
        let root = self.arena.root_halving(slot);
        Some(self.arena.id(root))
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
