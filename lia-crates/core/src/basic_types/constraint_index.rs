use std::fmt::Display;

use crate::containers::StorageKey;

/// Identifies a constraint of the relaxation which realises a bound of a column.
///
/// The integer solver never inspects constraints; it only collects these identifiers into an
/// [`Explanation`](crate::Explanation) so the caller can re-derive a cut or a conflict.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConstraintIndex(u32);

impl ConstraintIndex {
    pub fn new(index: u32) -> Self {
        ConstraintIndex(index)
    }
}

impl Display for ConstraintIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl StorageKey for ConstraintIndex {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintIndex(index as u32)
    }
}
