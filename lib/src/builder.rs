//! Turns structure text and a word list into a [`Puzzle`].

use std::num::NonZero;

use itertools::Itertools;
use log::debug;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use rustc_hash::FxHashMap;
use strum::VariantArray;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::cell::Cell;
use crate::location::Location;
use crate::puzzle::{Overlap, Puzzle};
use crate::slot::{Direction, Slot};

/// Reasons input text cannot become a [`Puzzle`].
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PuzzleError {
    /// The structure text contained no rows, or only empty ones.
    #[error("structure grid has no cells")]
    EmptyGrid,
}

/// Builds a [`Puzzle`] from structure text and a word list.
///
/// In the structure text, every non-empty line is one row of the grid; `_`
/// marks an open cell and any other character a wall. Rows shorter than the
/// widest row are padded with walls. The word list holds one candidate per
/// line; entries are uppercased and deduplicated.
#[derive(Default)]
pub struct PuzzleBuilder {
    structure: String,
    word_list: String,
}

impl PuzzleBuilder {
    /// Sets the structure text.
    pub fn structure(&mut self, text: &str) -> &mut Self {
        self.structure = text.to_owned();
        self
    }

    /// Sets the word list text.
    pub fn word_list(&mut self, text: &str) -> &mut Self {
        self.word_list = text.to_owned();
        self
    }

    /// Parses both inputs into a [`Puzzle`], discovering every slot and
    /// every crossing pair.
    pub fn build(&self) -> Result<Puzzle, PuzzleError> {
        let rows = self.structure.lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect_vec())
            .collect_vec();

        let height = NonZero::new(rows.len()).ok_or(PuzzleError::EmptyGrid)?;
        let width = NonZero::new(rows.iter().map(Vec::len).max().unwrap_or(0))
            .ok_or(PuzzleError::EmptyGrid)?;

        let grid = Array2::from_shape_fn((height.get(), width.get()), |(y, x)| {
            match rows[y].get(x).copied() {
                Some('_') => Cell::Open,
                _ => Cell::Blocked,
            }
        });

        let slots = scan_slots(&grid);

        let mut graph = UnGraphMap::with_capacity(slots.len(), slots.len());
        for slot in &slots {
            graph.add_node(*slot);
        }

        // only perpendicular slots can share a cell; runs along the same
        // axis are maximal and therefore disjoint
        let mut overlaps = FxHashMap::default();
        let (across, down): (Vec<Slot>, Vec<Slot>) = slots.iter()
            .copied()
            .partition(|slot| slot.direction == Direction::Across);

        for (&a, &d) in across.iter().cartesian_product(down.iter()) {
            let (ax, ay) = (a.location.0, a.location.1);
            let (dx, dy) = (d.location.0, d.location.1);

            if !(ax..ax + a.length).contains(&dx) || !(dy..dy + d.length).contains(&ay) {
                continue;
            }

            graph.add_edge(a, d, ());
            overlaps.insert(UnorderedPair(a, d), match a <= d {
                true => Overlap { in_lesser: dx - ax, in_greater: ay - dy },
                false => Overlap { in_lesser: ay - dy, in_greater: dx - ax },
            });
        }

        let words = self.word_list.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_uppercase)
            .sorted()
            .dedup()
            .collect_vec();

        debug!(
            "built puzzle: {} slots, {} crossings, {} words",
            graph.node_count(),
            overlaps.len(),
            words.len()
        );

        Ok(Puzzle {
            dims: (width, height),
            grid,
            words,
            graph,
            overlaps,
        })
    }
}

fn scan_slots(grid: &Array2<Cell>) -> Vec<Slot> {
    let mut slots = Vec::new();

    for &direction in Direction::VARIANTS {
        for (index, cell) in grid.indexed_iter() {
            if !cell.is_open() {
                continue;
            }
            let location = Location::from(index);

            // a run starts where the preceding cell along the axis is a wall
            // or off the grid; stepping off the top/left edge wraps the
            // coordinate, which also misses the lookup
            let before = direction.step_back_from(location);
            if grid.get(before.as_index()).is_some_and(|c| c.is_open()) {
                continue;
            }

            let mut length = 0;
            let mut current = location;
            while grid.get(current.as_index()).is_some_and(|c| c.is_open()) {
                length += 1;
                current = direction.step_from(current);
            }

            // single open cells belong to the crossing run only
            if length >= 2 {
                slots.push(Slot { location, length, direction });
            }
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::builder::{PuzzleBuilder, PuzzleError};
    use crate::location::Location;
    use crate::slot::{Direction, Slot};

    #[test]
    fn open_grid_has_all_runs() {
        let puzzle = PuzzleBuilder::default()
            .structure("___\n___\n___\n")
            .build()
            .unwrap();

        let slots = puzzle.slots().collect_vec();
        assert_eq!(slots.len(), 6);
        assert!(slots.contains(&Slot {
            location: Location(0, 1),
            length: 3,
            direction: Direction::Across,
        }));
        assert!(slots.contains(&Slot {
            location: Location(2, 0),
            length: 3,
            direction: Direction::Down,
        }));
    }

    #[test]
    fn walls_split_runs() {
        // row 1 is split by a wall; its right fragment is a single cell
        let puzzle = PuzzleBuilder::default()
            .structure("___\n_#_\n__#\n")
            .build()
            .unwrap();

        let slots = puzzle.slots().collect_vec();
        assert!(slots.contains(&Slot {
            location: Location(0, 0),
            length: 3,
            direction: Direction::Across,
        }));
        assert!(slots.contains(&Slot {
            location: Location(0, 2),
            length: 2,
            direction: Direction::Across,
        }));
        assert!(slots.contains(&Slot {
            location: Location(0, 0),
            length: 3,
            direction: Direction::Down,
        }));
        // no slot may start at the walled cell
        assert!(!slots.iter().any(|slot| slot.location == Location(1, 1)));
    }

    #[test]
    fn short_rows_pad_with_walls() {
        let puzzle = PuzzleBuilder::default()
            .structure("___\n_\n")
            .build()
            .unwrap();

        assert_eq!(puzzle.dims(), (3, 2));
        let slots = puzzle.slots().collect_vec();
        assert_eq!(slots, vec![
            Slot { location: Location(0, 0), length: 3, direction: Direction::Across },
            Slot { location: Location(0, 0), length: 2, direction: Direction::Down },
        ]);
    }

    #[test]
    fn empty_structure_is_an_error() {
        assert!(matches!(
            PuzzleBuilder::default().build(),
            Err(PuzzleError::EmptyGrid)
        ));
        assert!(matches!(
            PuzzleBuilder::default().structure("\n\n").build(),
            Err(PuzzleError::EmptyGrid)
        ));
    }

    #[test]
    fn words_are_uppercased_and_deduplicated() {
        let puzzle = PuzzleBuilder::default()
            .structure("__\n")
            .word_list("dog\n\ncat\nDog\n  at\n")
            .build()
            .unwrap();

        assert_eq!(puzzle.words(), &["AT", "CAT", "DOG"]);
    }

    #[test]
    fn crossing_indices_are_symmetric() {
        // across row 1 and down column 2 share the cell (2, 1): the third
        // letter of the across word, the second letter of the down word
        let puzzle = PuzzleBuilder::default()
            .structure("##_\n___\n##_\n##_\n")
            .build()
            .unwrap();

        let across = puzzle.slots().find(|s| s.direction == Direction::Across).unwrap();
        let down = puzzle.slots().find(|s| s.direction == Direction::Down).unwrap();

        assert_eq!(puzzle.overlap(across, down), Some((2, 1)));
        assert_eq!(puzzle.overlap(down, across), Some((1, 2)));
    }

    #[test]
    fn parallel_slots_never_cross() {
        let puzzle = PuzzleBuilder::default()
            .structure("___\n###\n___\n")
            .build()
            .unwrap();

        let slots = puzzle.slots().collect_vec();
        assert_eq!(slots.len(), 2);
        assert_eq!(puzzle.overlap(slots[0], slots[1]), None);
        assert_eq!(puzzle.neighbors(slots[0]).count(), 0);
    }
}
