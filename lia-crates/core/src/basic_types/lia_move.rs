use std::fmt::Display;

/// The outcome of an attempt to restore integer feasibility.
///
/// Every outcome except [`LiaMove::Undefined`] is definitive: it ends a single
/// [`IntSolver::check`](crate::IntSolver::check) invocation. [`LiaMove::Undefined`] is the
/// expected result of a strategy which made no progress, after which the next strategy is tried.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LiaMove {
    /// Every integer column takes an integral value.
    Sat,
    /// A cut which is violated by the current assignment has been produced, together with the
    /// explanation of why it holds.
    Cut,
    /// A column has been selected to split on; the split is described by the cut buffer.
    Branch,
    /// The current region contains no integer solution; the explanation proves it.
    Conflict,
    /// No conclusion was reached.
    #[default]
    Undefined,
}

impl LiaMove {
    /// Whether the move ends the current check.
    pub fn is_definitive(self) -> bool {
        self != LiaMove::Undefined
    }
}

impl Display for LiaMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiaMove::Sat => write!(f, "sat"),
            LiaMove::Cut => write!(f, "cut"),
            LiaMove::Branch => write!(f, "branch"),
            LiaMove::Conflict => write!(f, "conflict"),
            LiaMove::Undefined => write!(f, "undefined"),
        }
    }
}
