use std::fmt::Display;
use std::ops::Deref;

use itertools::Itertools;

use super::ConstraintIndex;
use crate::relaxation::ColumnId;
use crate::relaxation::Relaxation;

/// The set of constraint witnesses which justifies a cut or a conflict.
///
/// The explanation is append-only while it is being assembled; it is cleared at the start of
/// every check and before every strategy attempt. Duplicates are tolerated, [`Explanation::unique`]
/// can be used to obtain the set without them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Explanation {
    witnesses: Vec<ConstraintIndex>,
}

impl Deref for Explanation {
    type Target = [ConstraintIndex];

    fn deref(&self) -> &Self::Target {
        &self.witnesses
    }
}

impl Explanation {
    pub fn clear(&mut self) {
        self.witnesses.clear();
    }

    pub fn push(&mut self, witness: ConstraintIndex) {
        self.witnesses.push(witness);
    }

    /// Adds the witnesses of the lower and upper bound of `column`, for those bounds which exist.
    ///
    /// This is how bound-based certificates (e.g. of a GCD conflict on a fixed or boxed column)
    /// are assembled.
    pub fn push_bound_witnesses(&mut self, relaxation: &dyn Relaxation, column: ColumnId) {
        self.witnesses.extend(
            [
                relaxation.lower_bound_witness(column),
                relaxation.upper_bound_witness(column),
            ]
            .into_iter()
            .flatten(),
        );
    }

    /// The witnesses without duplicates, in the order of their first occurrence.
    pub fn unique(&self) -> impl Iterator<Item = ConstraintIndex> + '_ {
        self.witnesses.iter().copied().unique()
    }
}

impl Extend<ConstraintIndex> for Explanation {
    fn extend<T: IntoIterator<Item = ConstraintIndex>>(&mut self, iter: T) {
        self.witnesses.extend(iter);
    }
}

impl FromIterator<ConstraintIndex> for Explanation {
    fn from_iter<T: IntoIterator<Item = ConstraintIndex>>(iter: T) -> Self {
        Explanation {
            witnesses: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Explanation {
    type Item = ConstraintIndex;

    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.witnesses.into_iter()
    }
}

impl Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.unique().join(", "))
    }
}
