//! The view of the LP relaxation which the integer solver works on.
//!
//! The relaxation itself (its simplex engine, how it stores constraints) lives outside of this
//! crate; the integer solver only needs the narrow capability interface described by
//! [`Relaxation`]. A dictionary-form implementation, [`Tableau`], is provided so the solver can
//! be used stand-alone.
mod guard;
mod tableau;

use std::fmt::Debug;
use std::fmt::Display;

use num::BigRational;

pub(crate) use guard::TrackPivotedRowsGuard;
pub use tableau::Tableau;
pub use tableau::TableauError;

use crate::basic_types::ConstraintIndex;
use crate::containers::StorageKey;
use crate::math::InfRational;

/// A column (variable) of the relaxation.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColumnId(u32);

impl ColumnId {
    pub fn new(index: u32) -> Self {
        ColumnId(index)
    }
}

impl Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl StorageKey for ColumnId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ColumnId(index as u32)
    }
}

/// Which bounds a column has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Free,
    LowerBound,
    UpperBound,
    Boxed,
    /// Both bounds are present and equal.
    Fixed,
}

impl ColumnType {
    pub fn from_bounds(lower: Option<&InfRational>, upper: Option<&InfRational>) -> ColumnType {
        match (lower, upper) {
            (None, None) => ColumnType::Free,
            (Some(_), None) => ColumnType::LowerBound,
            (None, Some(_)) => ColumnType::UpperBound,
            (Some(lower), Some(upper)) if lower == upper => ColumnType::Fixed,
            (Some(_), Some(_)) => ColumnType::Boxed,
        }
    }

    pub fn has_lower(self) -> bool {
        matches!(
            self,
            ColumnType::LowerBound | ColumnType::Boxed | ColumnType::Fixed
        )
    }

    pub fn has_upper(self) -> bool {
        matches!(
            self,
            ColumnType::UpperBound | ColumnType::Boxed | ColumnType::Fixed
        )
    }
}

/// An occurrence of a non-basic column in a row of the tableau.
///
/// The row defines its basic column as `basic_column = coefficient · column + rest`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowEntry {
    pub basic_column: ColumnId,
    pub coefficient: BigRational,
}

/// Read (and narrowly write) access to an LP relaxation which is optimal over the rationals.
///
/// The only way the integer solver changes the assignment is through
/// [`Relaxation::set_nonbasic_value`], which must keep every basic column consistent with its
/// row.
pub trait Relaxation: Debug {
    fn column_count(&self) -> usize;

    fn column_is_int(&self, column: ColumnId) -> bool;

    /// The lower bound of the column, if it has one.
    fn lower_bound(&self, column: ColumnId) -> Option<&InfRational>;

    /// The upper bound of the column, if it has one.
    fn upper_bound(&self, column: ColumnId) -> Option<&InfRational>;

    fn value(&self, column: ColumnId) -> &InfRational;

    fn is_basic(&self, column: ColumnId) -> bool;

    /// The non-basic columns, in the order the relaxation keeps them.
    fn nonbasic_columns(&self) -> Vec<ColumnId>;

    /// For every row in which `column` has a non-zero coefficient, the basic column of that row
    /// together with the coefficient.
    fn row_participation(&self, column: ColumnId) -> Vec<RowEntry>;

    /// Assigns `value` to the non-basic `column` and propagates the change to every basic column
    /// which depends on it.
    ///
    /// Calling this on a basic column is a programming error.
    fn set_nonbasic_value(&mut self, column: ColumnId, value: InfRational);

    /// The constraint which realises the lower bound of `column`.
    fn lower_bound_witness(&self, column: ColumnId) -> Option<ConstraintIndex>;

    /// The constraint which realises the upper bound of `column`.
    fn upper_bound_witness(&self, column: ColumnId) -> Option<ConstraintIndex>;

    fn track_pivoted_rows(&self) -> bool;

    fn set_track_pivoted_rows(&mut self, track: bool);

    /// Pivots basic columns with a fixed value out of the basis where possible.
    fn pivot_fixed_vars_from_basis(&mut self);

    fn columns(&self) -> Box<dyn Iterator<Item = ColumnId> + '_> {
        Box::new((0..self.column_count()).map(ColumnId::create_from_index))
    }

    fn column_type(&self, column: ColumnId) -> ColumnType {
        ColumnType::from_bounds(self.lower_bound(column), self.upper_bound(column))
    }

    fn column_is_int_inf(&self, column: ColumnId) -> bool {
        self.column_is_int(column) && !self.value(column).is_int()
    }

    /// Whether some integer column has a non-integral value.
    fn has_inf_int(&self) -> bool {
        self.columns().any(|column| self.column_is_int_inf(column))
    }

    /// Whether every column lies within its bounds.
    fn is_feasible(&self) -> bool {
        self.columns().all(|column| {
            let value = self.value(column);
            self.lower_bound(column).is_none_or(|lower| lower <= value)
                && self.upper_bound(column).is_none_or(|upper| value <= upper)
        })
    }

    fn at_lower(&self, column: ColumnId) -> bool {
        self.lower_bound(column) == Some(self.value(column))
    }

    fn at_upper(&self, column: ColumnId) -> bool {
        self.upper_bound(column) == Some(self.value(column))
    }

    fn at_bound(&self, column: ColumnId) -> bool {
        self.at_lower(column) || self.at_upper(column)
    }

    /// Whether every non-basic column sits at one of its bounds, and unbounded integer non-basic
    /// columns take integral values.
    fn nonbasic_columns_are_at_bounds(&self) -> bool {
        self.nonbasic_columns()
            .into_iter()
            .all(|column| match self.column_type(column) {
                ColumnType::Boxed | ColumnType::Fixed => self.at_bound(column),
                ColumnType::LowerBound => self.at_lower(column),
                ColumnType::UpperBound => self.at_upper(column),
                ColumnType::Free => !self.column_is_int_inf(column),
            })
    }
}

/// Lists the integer columns with a non-integral value, for tracing.
#[derive(Debug)]
pub(crate) struct InfeasibleColumnsDisplay<'a> {
    pub(crate) relaxation: &'a dyn Relaxation,
}

impl Display for InfeasibleColumnsDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut num_basic = 0;
        for column in self
            .relaxation
            .columns()
            .filter(|&column| self.relaxation.column_is_int_inf(column))
        {
            let is_basic = self.relaxation.is_basic(column);
            if is_basic {
                num_basic += 1;
            }

            write!(f, "{column} ")?;
            match self.relaxation.lower_bound(column) {
                Some(lower) => write!(f, "[{lower}, ")?,
                None => write!(f, "(-oo, ")?,
            }
            match self.relaxation.upper_bound(column) {
                Some(upper) => write!(f, "{upper}]")?,
                None => write!(f, "oo)")?,
            }
            write!(f, " = {}", self.relaxation.value(column))?;
            if is_basic {
                write!(f, " (basic)")?;
            }
            writeln!(f)?;
        }
        write!(f, "num of int infeasible basic columns: {num_basic}")
    }
}
