use std::cmp::Reverse;
use std::collections::VecDeque;

use itertools::Itertools;
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::domains::Domains;
use crate::puzzle::Puzzle;
use crate::slot::Slot;

/// A partial or complete mapping from slot to word.
pub type Assignment = FxHashMap<Slot, String>;

/// Fills a [`Puzzle`] by consistency enforcement followed by backtracking
/// search.
///
/// The solver owns the candidate pools; the puzzle itself is never touched.
/// Filtering runs once, up front, and the search then treats the pools as
/// read-only, extending copy-on-branch assignments instead.
pub struct Solver<'p> {
    puzzle: &'p Puzzle,
    domains: Domains,
}

impl<'p> Solver<'p> {
    /// A solver over `puzzle` with every domain seeded from the full word
    /// list.
    pub fn new(puzzle: &'p Puzzle) -> Self {
        Self {
            puzzle,
            domains: Domains::seed(puzzle),
        }
    }

    /// Read-only view of the current candidate pools.
    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Enforces node and arc consistency, then searches.
    ///
    /// `None` means no assignment satisfies every constraint; an
    /// unsatisfiable puzzle is a normal outcome, not an error.
    pub fn solve(mut self) -> Option<Assignment> {
        self.enforce_node_consistency();
        if !self.ac3(None) {
            debug!("a domain emptied during propagation; unsatisfiable");
            return None;
        }

        // a slot with no crossings never appears in an arc, so propagation
        // alone does not prove its domain non-empty
        let puzzle = self.puzzle;
        if puzzle.slots().any(|slot| self.domains.remaining(slot) == 0) {
            debug!("a domain emptied during filtering; unsatisfiable");
            return None;
        }

        self.backtrack(&Assignment::default())
    }

    /// Drops every candidate whose length differs from its slot's length.
    ///
    /// Idempotent; afterwards each domain holds only words that fit their
    /// slot exactly.
    pub fn enforce_node_consistency(&mut self) {
        let puzzle = self.puzzle;
        for slot in puzzle.slots() {
            self.domains.retain(slot, |word| word.len() == slot.length);
            trace!(
                "{} keeps {} candidates after length filtering",
                slot,
                self.domains.remaining(slot)
            );
        }
    }

    /// Makes `x`'s domain consistent with `y`'s under their crossing
    /// constraint: a word survives iff some candidate of `y` supplies the
    /// shared letter. Returns whether anything was removed; slots that do
    /// not cross are left alone.
    pub fn revise(&mut self, x: Slot, y: Slot) -> bool {
        let Some((ix, iy)) = self.puzzle.overlap(x, y) else {
            return false;
        };

        let supported: FxHashSet<u8> = self.domains.candidates(y)
            .iter()
            .filter_map(|v| v.as_bytes().get(iy).copied())
            .collect();

        self.domains.retain(x, |w| {
            w.as_bytes().get(ix).is_some_and(|c| supported.contains(c))
        })
    }

    /// AC-3 propagation over the crossing constraints.
    ///
    /// Starts from `arcs` when given, otherwise from every ordered crossing
    /// pair, and revises until the queue drains. Returns `false` as soon as
    /// any domain empties, i.e. the puzzle is already unsatisfiable; `true`
    /// means every remaining word has support along every arc.
    pub fn ac3(&mut self, arcs: Option<Vec<(Slot, Slot)>>) -> bool {
        let puzzle = self.puzzle;
        let mut queue: VecDeque<(Slot, Slot)> = match arcs {
            Some(arcs) => arcs.into(),
            None => puzzle.slots()
                .flat_map(|x| puzzle.neighbors(x).map(move |y| (x, y)))
                .collect(),
        };

        let mut revisions = 0usize;
        while let Some((x, y)) = queue.pop_front() {
            if !self.revise(x, y) {
                continue;
            }
            revisions += 1;

            if self.domains.remaining(x) == 0 {
                debug!("{} lost its last candidate revising against {}", x, y);
                return false;
            }

            // x shrank, so consistency already established for the arcs
            // into x no longer holds
            queue.extend(puzzle.neighbors(x).filter(|z| *z != y).map(|z| (z, x)));
        }

        trace!("arc consistency reached after {} revisions", revisions);
        true
    }

    // MRV with a degree tie-break: smallest domain first, most crossings
    // first among those, structural order as the final tie-break to keep
    // selection deterministic
    pub(crate) fn select_slot(&self, assignment: &Assignment) -> Option<Slot> {
        self.puzzle.slots()
            .filter(|slot| !assignment.contains_key(slot))
            .min_by_key(|slot| {
                (
                    self.domains.remaining(*slot),
                    Reverse(self.puzzle.neighbors(*slot).count()),
                    *slot,
                )
            })
    }

    // least-constraining value: candidates ordered by how many options they
    // strike from unassigned neighboring domains, fewest first
    pub(crate) fn order_words(&self, slot: Slot, assignment: &Assignment) -> Vec<String> {
        let unassigned_neighbors = self.puzzle.neighbors(slot)
            .filter(|neighbor| !assignment.contains_key(neighbor))
            .collect_vec();

        self.domains.candidates(slot)
            .iter()
            .map(|word| {
                let ruled_out: usize = unassigned_neighbors.iter()
                    .map(|&neighbor| {
                        let (here, there) = self.puzzle.overlap(slot, neighbor).unwrap();
                        let letter = word.as_bytes().get(here).copied();
                        self.domains.candidates(neighbor)
                            .iter()
                            .filter(|v| v.as_bytes().get(there).copied() != letter)
                            .count()
                    })
                    .sum();
                (ruled_out, word.clone())
            })
            .sorted()
            .map(|(_, word)| word)
            .collect_vec()
    }

    // whether extending the assignment with (slot, word) keeps it
    // consistent: the word is unused, fits the slot, and agrees with every
    // already-placed crossing word on the shared letter
    pub(crate) fn fits(&self, slot: Slot, word: &str, assignment: &Assignment) -> bool {
        if word.len() != slot.length {
            return false;
        }
        if assignment.values().any(|used| used == word) {
            return false;
        }

        for neighbor in self.puzzle.neighbors(slot) {
            let Some(placed) = assignment.get(&neighbor) else {
                continue;
            };
            let (here, there) = self.puzzle.overlap(slot, neighbor).unwrap();
            if word.as_bytes()[here] != placed.as_bytes()[there] {
                return false;
            }
        }

        true
    }

    // depth-first over partial assignments; consistency is checked before
    // every descent, so None from a child always means the branch is
    // exhausted, never that the extension was invalid
    fn backtrack(&self, assignment: &Assignment) -> Option<Assignment> {
        if assignment.len() == self.puzzle.slot_count() {
            return Some(assignment.clone());
        }

        let slot = self.select_slot(assignment)?;
        trace!(
            "trying {} with {} candidates, {} assigned",
            slot,
            self.domains.remaining(slot),
            assignment.len()
        );

        for word in self.order_words(slot, assignment) {
            if !self.fits(slot, &word, assignment) {
                continue;
            }

            // each branch extends its own copy; a failed sibling leaves no
            // residue behind
            let mut extended = assignment.clone();
            extended.insert(slot, word);

            if let Some(complete) = self.backtrack(&extended) {
                return Some(complete);
            }
        }

        None
    }
}
