use log::trace;
use num::BigRational;
use num::One;
use num::Zero;
use thiserror::Error;

use super::ColumnId;
use super::ColumnType;
use super::Relaxation;
use super::RowEntry;
use crate::basic_types::ConstraintIndex;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::lia_assert_simple;
use crate::math::InfRational;

/// Errors related to building a [`Tableau`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableauError {
    /// The column was not created by this tableau.
    #[error("column {0} does not exist in the tableau")]
    UnknownColumn(ColumnId),
    /// A row was added for a column which is already basic.
    #[error("column {0} is already basic")]
    ColumnAlreadyBasic(ColumnId),
    /// A row was added for a column which already occurs in the body of another row.
    #[error("column {0} occurs in another row and cannot become basic")]
    ColumnInRowBody(ColumnId),
    /// A basic column was used in the body of a row.
    #[error("column {0} is basic and cannot occur in the body of a row")]
    BasicColumnInRowBody(ColumnId),
}

#[derive(Clone, Debug)]
struct Bound {
    value: InfRational,
    witness: ConstraintIndex,
}

#[derive(Clone, Debug)]
struct Column {
    is_int: bool,
    lower: Option<Bound>,
    upper: Option<Bound>,
    value: InfRational,
    basis_row: Option<usize>,
}

/// A row `basic = Σ coefficient · column` over non-basic columns.
#[derive(Clone, Debug)]
struct Row {
    basic: ColumnId,
    entries: Vec<(ColumnId, BigRational)>,
}

impl Row {
    fn coefficient_of(&self, column: ColumnId) -> Option<&BigRational> {
        self.entries
            .iter()
            .find(|(entry_column, _)| *entry_column == column)
            .map(|(_, coefficient)| coefficient)
    }

    /// Adds `coefficient · column` to the row, removing the entry if it cancels out.
    fn add_scaled(&mut self, column: ColumnId, coefficient: BigRational) {
        if let Some(position) = self
            .entries
            .iter()
            .position(|(entry_column, _)| *entry_column == column)
        {
            self.entries[position].1 += coefficient;
            if self.entries[position].1.is_zero() {
                let _ = self.entries.remove(position);
            }
        } else if !coefficient.is_zero() {
            self.entries.push((column, coefficient));
        }
    }
}

/// An in-memory LP relaxation in dictionary form.
///
/// Every row defines one basic column as a linear combination of non-basic columns. Values of
/// non-basic columns are set directly, values of basic columns follow from their row.
#[derive(Clone, Debug, Default)]
pub struct Tableau {
    columns: KeyedVec<ColumnId, Column>,
    rows: Vec<Row>,
    track_pivoted_rows: bool,
    pivoted_rows: HashSet<usize>,
}

impl Tableau {
    /// Creates a new non-basic column without bounds.
    pub fn new_column(&mut self, is_int: bool, value: InfRational) -> ColumnId {
        self.columns.push(Column {
            is_int,
            lower: None,
            upper: None,
            value,
            basis_row: None,
        })
    }

    pub fn set_lower_bound(
        &mut self,
        column: ColumnId,
        bound: InfRational,
        witness: ConstraintIndex,
    ) {
        self.columns[column].lower = Some(Bound {
            value: bound,
            witness,
        });
    }

    pub fn set_upper_bound(
        &mut self,
        column: ColumnId,
        bound: InfRational,
        witness: ConstraintIndex,
    ) {
        self.columns[column].upper = Some(Bound {
            value: bound,
            witness,
        });
    }

    /// Makes `basic` a basic column defined by `basic = Σ coefficient · column`.
    ///
    /// The value of `basic` is recomputed from the current values of the row's columns. Returns
    /// the index of the new row.
    pub fn add_row(
        &mut self,
        basic: ColumnId,
        entries: impl IntoIterator<Item = (ColumnId, BigRational)>,
    ) -> Result<usize, TableauError> {
        let column = self
            .columns
            .get(basic)
            .ok_or(TableauError::UnknownColumn(basic))?;
        if column.basis_row.is_some() {
            return Err(TableauError::ColumnAlreadyBasic(basic));
        }
        if self
            .rows
            .iter()
            .any(|row| row.coefficient_of(basic).is_some())
        {
            return Err(TableauError::ColumnInRowBody(basic));
        }

        let mut row = Row {
            basic,
            entries: vec![],
        };
        for (column, coefficient) in entries {
            let entry = self
                .columns
                .get(column)
                .ok_or(TableauError::UnknownColumn(column))?;
            if entry.basis_row.is_some() || column == basic {
                return Err(TableauError::BasicColumnInRowBody(column));
            }
            row.add_scaled(column, coefficient);
        }

        let row_index = self.rows.len();
        self.columns[basic].value = self.evaluate(&row);
        self.columns[basic].basis_row = Some(row_index);
        self.rows.push(row);

        Ok(row_index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The row in which `column` is basic.
    pub fn row_of_basic_column(&self, column: ColumnId) -> Option<usize> {
        self.columns[column].basis_row
    }

    /// The rows changed by pivoting while tracking was enabled.
    pub fn pivoted_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.pivoted_rows.iter().copied()
    }

    fn evaluate(&self, row: &Row) -> InfRational {
        row.entries
            .iter()
            .fold(InfRational::zero(), |sum, (column, coefficient)| {
                sum + &self.columns[*column].value * coefficient
            })
    }

    /// Exchanges the basic column of `row_index` with the non-basic `entering` column of that
    /// row, which occurs in it with `pivot_coefficient`. Values are unaffected, only the
    /// representation of the rows changes.
    fn pivot(&mut self, row_index: usize, entering: ColumnId, pivot_coefficient: BigRational) {
        let leaving = self.rows[row_index].basic;

        trace!("pivoting {leaving} out of the basis in favour of {entering}");

        // leaving = a · entering + rest  =>  entering = leaving / a - rest / a
        let old_entries = std::mem::take(&mut self.rows[row_index].entries);
        let mut pivot_row = Row {
            basic: entering,
            entries: vec![(leaving, BigRational::one() / &pivot_coefficient)],
        };
        for (column, coefficient) in old_entries {
            if column != entering {
                pivot_row.add_scaled(column, -(coefficient / &pivot_coefficient));
            }
        }

        for (index, row) in self.rows.iter_mut().enumerate() {
            if index == row_index {
                continue;
            }
            let Some(scale) = row.coefficient_of(entering).cloned() else {
                continue;
            };

            row.add_scaled(entering, -scale.clone());
            for (column, coefficient) in &pivot_row.entries {
                row.add_scaled(*column, &scale * coefficient);
            }
            if self.track_pivoted_rows {
                let _ = self.pivoted_rows.insert(index);
            }
        }

        self.rows[row_index] = pivot_row;
        self.columns[leaving].basis_row = None;
        self.columns[entering].basis_row = Some(row_index);
        if self.track_pivoted_rows {
            let _ = self.pivoted_rows.insert(row_index);
        }
    }
}

impl Relaxation for Tableau {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_is_int(&self, column: ColumnId) -> bool {
        self.columns[column].is_int
    }

    fn lower_bound(&self, column: ColumnId) -> Option<&InfRational> {
        self.columns[column].lower.as_ref().map(|bound| &bound.value)
    }

    fn upper_bound(&self, column: ColumnId) -> Option<&InfRational> {
        self.columns[column].upper.as_ref().map(|bound| &bound.value)
    }

    fn value(&self, column: ColumnId) -> &InfRational {
        &self.columns[column].value
    }

    fn is_basic(&self, column: ColumnId) -> bool {
        self.columns[column].basis_row.is_some()
    }

    fn nonbasic_columns(&self) -> Vec<ColumnId> {
        self.columns
            .iter_with_keys()
            .filter(|(_, column)| column.basis_row.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    fn row_participation(&self, column: ColumnId) -> Vec<RowEntry> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.coefficient_of(column).map(|coefficient| RowEntry {
                    basic_column: row.basic,
                    coefficient: coefficient.clone(),
                })
            })
            .collect()
    }

    fn set_nonbasic_value(&mut self, column: ColumnId, value: InfRational) {
        lia_assert_simple!(
            !self.is_basic(column),
            "the value of basic column {column} can only change through its row"
        );

        let delta = &value - &self.columns[column].value;
        self.columns[column].value = value;
        if delta.is_zero() {
            return;
        }

        for entry in self.row_participation(column) {
            let change = &delta * &entry.coefficient;
            self.columns[entry.basic_column].value += &change;
        }
    }

    fn lower_bound_witness(&self, column: ColumnId) -> Option<ConstraintIndex> {
        self.columns[column].lower.as_ref().map(|bound| bound.witness)
    }

    fn upper_bound_witness(&self, column: ColumnId) -> Option<ConstraintIndex> {
        self.columns[column].upper.as_ref().map(|bound| bound.witness)
    }

    fn track_pivoted_rows(&self) -> bool {
        self.track_pivoted_rows
    }

    fn set_track_pivoted_rows(&mut self, track: bool) {
        self.track_pivoted_rows = track;
    }

    fn pivot_fixed_vars_from_basis(&mut self) {
        for row_index in 0..self.rows.len() {
            let basic = self.rows[row_index].basic;
            if self.column_type(basic) != ColumnType::Fixed {
                continue;
            }

            let entering = self.rows[row_index]
                .entries
                .iter()
                .find(|(column, _)| self.column_type(*column) != ColumnType::Fixed)
                .cloned();
            if let Some((entering, pivot_coefficient)) = entering {
                self.pivot(row_index, entering, pivot_coefficient);
            }
        }
    }
}
