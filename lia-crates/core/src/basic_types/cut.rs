use std::fmt::Display;

use num::BigInt;
use num::BigRational;
use num::One;
use num::Signed;
use num::Zero;

use crate::math::InfRational;
use crate::relaxation::ColumnId;
use crate::relaxation::Relaxation;

/// A linear combination `Σ coefficient · column` of columns of the relaxation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearTerm {
    terms: Vec<(ColumnId, BigRational)>,
}

impl LinearTerm {
    /// Adds `coefficient · column` to the term; coefficients of the same column are merged.
    pub fn add(&mut self, column: ColumnId, coefficient: BigRational) {
        if let Some((_, existing)) = self.terms.iter_mut().find(|(other, _)| *other == column) {
            *existing += coefficient;
        } else {
            self.terms.push((column, coefficient));
        }
        self.terms.retain(|(_, coefficient)| !coefficient.is_zero());
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnId, &BigRational)> + '_ {
        self.terms
            .iter()
            .map(|(column, coefficient)| (*column, coefficient))
    }

    /// Evaluates the term under the current assignment of the relaxation.
    pub fn apply(&self, relaxation: &dyn Relaxation) -> InfRational {
        self.terms
            .iter()
            .fold(InfRational::zero(), |sum, (column, coefficient)| {
                sum + relaxation.value(*column) * coefficient
            })
    }
}

impl FromIterator<(ColumnId, BigRational)> for LinearTerm {
    fn from_iter<T: IntoIterator<Item = (ColumnId, BigRational)>>(iter: T) -> Self {
        let mut term = LinearTerm::default();
        for (column, coefficient) in iter {
            term.add(column, coefficient);
        }
        term
    }
}

impl Display for LinearTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (index, (column, coefficient)) in self.terms.iter().enumerate() {
            match (index, coefficient.is_negative()) {
                (0, false) => {}
                (0, true) => write!(f, "-")?,
                (_, false) => write!(f, " + ")?,
                (_, true) => write!(f, " - ")?,
            }
            let magnitude = coefficient.abs();
            if magnitude.is_one() {
                write!(f, "{column}")?;
            } else {
                write!(f, "{magnitude} * {column}")?;
            }
        }
        Ok(())
    }
}

/// The scratch buffer into which strategies write the cut or branch they produce: the
/// inequality `term <= bound` if `is_upper`, and `term >= bound` otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cut {
    pub term: LinearTerm,
    pub bound: BigRational,
    pub is_upper: bool,
}

impl Default for Cut {
    fn default() -> Self {
        Cut {
            term: LinearTerm::default(),
            bound: BigRational::zero(),
            is_upper: true,
        }
    }
}

impl Cut {
    pub fn clear(&mut self) {
        self.term.clear();
        self.bound = BigRational::zero();
        self.is_upper = true;
    }

    /// Describes the split `column <= bound`; its complement is `column >= bound + 1`.
    pub fn set_branch(&mut self, column: ColumnId, bound: BigInt) {
        self.term.clear();
        self.term.add(column, BigRational::one());
        self.bound = BigRational::from_integer(bound);
        self.is_upper = true;
    }

    /// Whether the current assignment of the relaxation violates the inequality.
    ///
    /// A cut which is not violated does not cut off the current solution, and is therefore not
    /// accepted.
    pub fn is_violated_by(&self, relaxation: &dyn Relaxation) -> bool {
        let value = self.term.apply(relaxation);
        let bound = InfRational::from_rational(self.bound.clone());
        if self.is_upper {
            value > bound
        } else {
            value < bound
        }
    }
}

impl Display for Cut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let relation = if self.is_upper { "<=" } else { ">=" };
        write!(f, "{} {relation} {}", self.term, self.bound)
    }
}

#[cfg(test)]
mod tests {
    use num::BigInt;
    use num::BigRational;

    use super::Cut;
    use super::LinearTerm;
    use crate::math::InfRational;
    use crate::relaxation::Tableau;

    fn rational(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn term_merges_coefficients_of_the_same_column() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, InfRational::from_integer(2));
        let y = tableau.new_column(true, InfRational::from_integer(3));

        let term: LinearTerm = [
            (x, rational(1, 1)),
            (y, rational(2, 1)),
            (x, rational(-1, 1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(term.iter().count(), 1);
        assert_eq!(term.apply(&tableau), InfRational::from_integer(6));
    }

    #[test]
    fn violation_depends_on_direction() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, InfRational::from_fraction(5, 2));

        let mut cut = Cut::default();
        cut.set_branch(x, BigInt::from(2));
        assert!(cut.is_violated_by(&tableau));

        cut.is_upper = false;
        assert!(!cut.is_violated_by(&tableau));

        cut.bound = rational(3, 1);
        assert!(cut.is_violated_by(&tableau));
    }

    #[test]
    fn infinitesimal_part_decides_violation_on_the_bound() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(false, InfRational::new(rational(2, 1), rational(1, 1)));

        let mut cut = Cut::default();
        cut.set_branch(x, BigInt::from(2));

        assert!(cut.is_violated_by(&tableau));
    }

    #[test]
    fn cut_is_displayed_as_inequality() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, InfRational::zero());
        let y = tableau.new_column(true, InfRational::zero());

        let cut = Cut {
            term: [(x, rational(1, 1)), (y, rational(-3, 2))]
                .into_iter()
                .collect(),
            bound: rational(4, 1),
            is_upper: false,
        };

        assert_eq!(cut.to_string(), "x0 - 3/2 * x1 >= 4");
    }
}
