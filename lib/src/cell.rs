use std::fmt::{Display, Formatter};

/// One cell of the structure grid.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Cell {
    /// Fillable; covered by at least one slot unless stranded.
    Open,
    /// A wall, never holds a letter.
    #[default]
    Blocked,
}

impl Cell {
    pub(crate) fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Open => ' ',
            Self::Blocked => '█',
        })
    }
}
