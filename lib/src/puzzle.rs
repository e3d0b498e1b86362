use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use rustc_hash::FxHashMap;
use unordered_pair::UnorderedPair;

use crate::cell::Cell;
use crate::location::Dimension;
use crate::slot::Slot;
use crate::solver::Assignment;

/// Character indices of the cell a crossing pair of slots shares.
// stored relative to the Ord-lesser slot of the pair; overlap() swaps the
// indices back when queried with the greater slot first
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Overlap {
    pub(crate) in_lesser: usize,
    pub(crate) in_greater: usize,
}

/// A crossword structure plus its word list.
///
/// Holds everything the solver consumes: the cell grid, the set of slots,
/// which slots cross which, and at which character index. All of it is
/// computed once by a [`PuzzleBuilder`](crate::builder::PuzzleBuilder) and
/// read-only afterwards.
pub struct Puzzle {
    // width, height
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) grid: Array2<Cell>,
    pub(crate) words: Vec<String>,
    // adjacency between crossing slots; every edge carries its indices in
    // the overlap table
    pub(crate) graph: UnGraphMap<Slot, ()>,
    pub(crate) overlaps: FxHashMap<UnorderedPair<Slot>, Overlap>,
}

impl Puzzle {
    /// Every slot of the structure, in a stable order.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.graph.nodes()
    }

    /// How many slots the structure has.
    pub fn slot_count(&self) -> usize {
        self.graph.node_count()
    }

    /// All slots sharing a cell with `slot`.
    pub fn neighbors(&self, slot: Slot) -> impl Iterator<Item = Slot> + '_ {
        self.graph.neighbors(slot)
    }

    /// Where `a` and `b` cross: the index of the shared cell within `a`'s
    /// word and within `b`'s word. `None` when they do not share a cell.
    pub fn overlap(&self, a: Slot, b: Slot) -> Option<(usize, usize)> {
        let overlap = self.overlaps.get(&UnorderedPair(a, b))?;
        Some(match a <= b {
            true => (overlap.in_lesser, overlap.in_greater),
            false => (overlap.in_greater, overlap.in_lesser),
        })
    }

    /// The full word list every domain is seeded from.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Grid dimensions as `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.dims.0.get(), self.dims.1.get())
    }

    /// A displayable view of this structure filled in by `assignment`.
    pub fn filled<'s>(&'s self, assignment: &'s Assignment) -> Filled<'s> {
        Filled { puzzle: self, assignment }
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", print(self.grid.map(|cell| match cell {
            Cell::Open => ' ',
            Cell::Blocked => '█',
        })))
    }
}

/// A structure grid with the words of an assignment written into it.
///
/// Blocked cells render as `█`; open cells show their assigned letter, or a
/// space if no slot covering them is assigned.
pub struct Filled<'s> {
    puzzle: &'s Puzzle,
    assignment: &'s Assignment,
}

impl Display for Filled<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut letters = self.puzzle.grid.map(|cell| match cell {
            Cell::Open => ' ',
            Cell::Blocked => '█',
        });

        // crossing slots agree on shared cells in any consistent assignment,
        // so write order does not matter
        for (slot, word) in self.assignment {
            for (location, letter) in slot.cells().zip(word.chars()) {
                letters[location.as_index()] = letter;
            }
        }

        write!(f, "{}", print(letters))
    }
}

fn print(board: Array2<char>) -> String {
    let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

    for row in board.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}
