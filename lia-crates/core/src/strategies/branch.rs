use std::cmp::Ordering;

use itertools::Itertools;
use log::debug;
use num::BigRational;
use num::One;

use super::IntegralityStrategy;
use super::StrategyContext;
use crate::basic_types::LiaMove;
use crate::math::InfRational;
use crate::relaxation::ColumnId;
use crate::relaxation::Relaxation;

/// Which integer-infeasible column [`Branch`] splits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BranchColumnSelection {
    /// The column with the smallest distance between its bounds; ties are broken randomly.
    #[default]
    FirstFail,
    /// The column whose value is furthest away from an integer.
    MostFractional,
    /// Any column with equal probability.
    Random,
}

/// Splits on an integer column `x` with a fractional value `v` by describing `x <= ⌊v⌋` in the
/// cut buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Branch {
    selection: BranchColumnSelection,
}

impl Branch {
    pub fn new(selection: BranchColumnSelection) -> Self {
        Branch { selection }
    }

    fn select_column(&self, context: &mut StrategyContext<'_>) -> Option<ColumnId> {
        let candidates = context
            .relaxation()
            .columns()
            .filter(|&column| context.relaxation().column_is_int_inf(column))
            .collect::<Vec<_>>();
        if candidates.is_empty() {
            return None;
        }

        match self.selection {
            BranchColumnSelection::FirstFail => {
                let smallest = candidates
                    .into_iter()
                    .min_set_by(|&lhs, &rhs| compare_ranges(context.relaxation(), lhs, rhs));
                Some(smallest[context.random().generate_usize_in_range(0..smallest.len())])
            }
            BranchColumnSelection::MostFractional => candidates
                .into_iter()
                .map(|column| (column, distance_to_integer(context.relaxation().value(column))))
                .min_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs))
                .map(|(column, _)| column),
            BranchColumnSelection::Random => {
                Some(candidates[context.random().generate_usize_in_range(0..candidates.len())])
            }
        }
    }
}

impl IntegralityStrategy for Branch {
    fn name(&self) -> &str {
        "branch"
    }

    fn attempt(&mut self, context: &mut StrategyContext<'_>) -> LiaMove {
        let Some(column) = self.select_column(context) else {
            return LiaMove::Sat;
        };

        let bound = context.relaxation().value(column).floor().to_integer();
        context.cut_mut().set_branch(column, bound);
        debug!("branching on {}", context.cut());

        LiaMove::Branch
    }
}

/// The distance between the bounds of a column, where [`None`] is an unbounded range.
fn range_of(relaxation: &dyn Relaxation, column: ColumnId) -> Option<InfRational> {
    match (relaxation.lower_bound(column), relaxation.upper_bound(column)) {
        (Some(lower), Some(upper)) => Some(upper - lower),
        _ => None,
    }
}

fn compare_ranges(relaxation: &dyn Relaxation, lhs: ColumnId, rhs: ColumnId) -> Ordering {
    match (range_of(relaxation, lhs), range_of(relaxation, rhs)) {
        (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn distance_to_integer(value: &InfRational) -> BigRational {
    let fraction = value.rational() - value.rational().floor();
    let complement = BigRational::one() - &fraction;
    fraction.min(complement)
}
