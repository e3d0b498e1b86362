#![warn(missing_docs)]

//! Fills crossword grids by treating every run of open cells as a variable
//! over a shared word list, propagating length and crossing-letter
//! constraints, and backtracking over whatever the propagation leaves.

pub use domains::Domains;
pub use location::Location;
pub use puzzle::{Filled, Puzzle};
pub use slot::{Direction, Slot};
pub use solver::{Assignment, Solver};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod domains;
pub(crate) mod location;
pub(crate) mod puzzle;
pub(crate) mod slot;
pub(crate) mod solver;
