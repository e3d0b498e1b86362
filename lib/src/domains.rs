use rustc_hash::{FxHashMap, FxHashSet};

use crate::puzzle::Puzzle;
use crate::slot::Slot;

/// The per-slot candidate pools consistency enforcement carves down.
///
/// Pools only ever shrink; the search reads them but never writes.
pub struct Domains {
    by_slot: FxHashMap<Slot, FxHashSet<String>>,
}

impl Domains {
    /// Every slot starts with the entire word list.
    pub(crate) fn seed(puzzle: &Puzzle) -> Self {
        let all_words: FxHashSet<String> = puzzle.words().iter().cloned().collect();

        Self {
            by_slot: puzzle.slots().map(|slot| (slot, all_words.clone())).collect(),
        }
    }

    /// The words still available for `slot`.
    pub fn candidates(&self, slot: Slot) -> &FxHashSet<String> {
        &self.by_slot[&slot]
    }

    /// How many words remain for `slot`.
    pub fn remaining(&self, slot: Slot) -> usize {
        self.by_slot[&slot].len()
    }

    /// Drops every candidate of `slot` that fails `keep`. Returns whether
    /// the pool shrank.
    pub(crate) fn retain<F>(&mut self, slot: Slot, keep: F) -> bool
    where
        F: FnMut(&String) -> bool,
    {
        let pool = self.by_slot.get_mut(&slot).unwrap();
        let before = pool.len();
        pool.retain(keep);
        pool.len() != before
    }
}
