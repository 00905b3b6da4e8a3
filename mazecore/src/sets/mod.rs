//! Disjoint sets (union-find).
//!
//! Two interchangeable implementations share one contract, [`DisjointSets`]:
//! - [`TrivialDisjointSets`] links roots blindly and never compresses paths.
//! - [`FasterDisjointSets`] uses union by rank with random tie breaking and path halving.
//!
//! Both keep their nodes in an arena indexed by `usize`, with a hash map from element to arena
//! slot, so parents are plain indices instead of shared references.

mod faster;
mod trivial;

use std::{fmt, hash::Hash};

use hashbrown::HashMap;
use thiserror::Error;

pub use faster::FasterDisjointSets;
pub use trivial::TrivialDisjointSets;

/// Public identifier of a set, stored at its current root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(u32);

impl SetId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetError {
    #[error("element is already in a set")]
    AlreadyPresent,
    #[error("both elements must already be in a set")]
    UnknownElement,
    #[error("both elements are already in the same set")]
    AlreadyMerged,
}

pub trait DisjointSets<E> {
    /// Creates a new singleton set `{data}`.
    ///
    /// Fails with [`SetError::AlreadyPresent`] if `data` is already a member.
    fn make_set(&mut self, data: E) -> Result<(), SetError>;

    /// Merges the sets containing `a` and `b`, afterwards `find(a) == find(b)`.
    ///
    /// Both elements must be members and must not share a set already, merging the same pair
    /// twice is an error rather than a no-op.
    fn union(&mut self, a: &E, b: &E) -> Result<(), SetError>;

    /// Returns the id of the set `data` belongs to, `None` if it was never added.
    ///
    /// Takes `&mut self` because finding may compress paths.
    fn find(&mut self, data: &E) -> Option<SetId>;

    /// `find(a) == find(b)`, so two absent elements count as the same set.
    fn same_set(&mut self, a: &E, b: &E) -> bool {
        self.find(a) == self.find(b)
    }

    fn number_of_sets(&self) -> usize;

    /// Mean distance of every element from its root, `0.0` when empty.
    fn average_depth(&self) -> f64;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, data: &E) -> bool;
}

#[derive(Debug, Clone)]
struct SetNode {
    id: SetId,
    rank: u32,
    parent: Option<usize>,
}

/// Node storage shared by both implementations.
#[derive(Debug, Clone)]
struct SetArena<E> {
    index: HashMap<E, usize>,
    nodes: Vec<SetNode>,
    next_id: u32,
    set_count: usize,
}

impl<E> Default for SetArena<E> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            next_id: 0,
            set_count: 0,
        }
    }
}

impl<E: Hash + Eq> SetArena<E> {
    fn insert(&mut self, data: E) -> Result<(), SetError> {
        if self.index.contains_key(&data) {
            return Err(SetError::AlreadyPresent);
        }

        let slot = self.nodes.len();
        self.nodes.push(SetNode {
            id: SetId(self.next_id),
            rank: 0,
            parent: None,
        });
        self.next_id += 1;
        self.index.insert(data, slot);
        self.set_count += 1;

        Ok(())
    }

    fn slot(&self, data: &E) -> Option<usize> {
        self.index.get(data).copied()
    }

    fn slots(&self, a: &E, b: &E) -> Result<(usize, usize), SetError> {
        match (self.slot(a), self.slot(b)) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(SetError::UnknownElement),
        }
    }

    fn contains(&self, data: &E) -> bool {
        self.index.contains_key(data)
    }
}

impl<E> SetArena<E> {
    fn root(&self, mut slot: usize) -> usize {
        while let Some(parent) = self.nodes[slot].parent {
            slot = parent;
        }
        slot
    }

    /// Walks to the root, pointing every visited node at its grandparent on the way.
    fn root_halving(&mut self, mut slot: usize) -> usize {
        while let Some(parent) = self.nodes[slot].parent {
            if let Some(grandparent) = self.nodes[parent].parent {
                self.nodes[slot].parent = Some(grandparent);
            }
            slot = parent;
        }
        slot
    }

    /// Hangs `child` (a root) under `parent` (another root).
    fn link(&mut self, child: usize, parent: usize) {
        debug_assert!(self.nodes[child].parent.is_none());
        debug_assert!(self.nodes[parent].parent.is_none());
        debug_assert_ne!(child, parent);

        self.nodes[child].parent = Some(parent);
        self.set_count -= 1;

        log::trace!(
            "merged set {} into {}, {} sets left",
            self.nodes[child].id,
            self.nodes[parent].id,
            self.set_count
        );
    }

    fn id(&self, slot: usize) -> SetId {
        self.nodes[slot].id
    }

    fn depth(&self, mut slot: usize) -> usize {
        let mut depth = 0;
        while let Some(parent) = self.nodes[slot].parent {
            slot = parent;
            depth += 1;
        }
        depth
    }

    fn average_depth(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }

        let total: usize = (0..self.nodes.len()).map(|slot| self.depth(slot)).sum();
        total as f64 / self.nodes.len() as f64
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}
