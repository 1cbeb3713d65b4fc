//! Computes how far a non-basic column can move without any column of the relaxation leaving its
//! bounds, and uses this to repair (patch) or perturb (shift) non-basic values cheaply.
mod patcher;
mod shift;

use std::fmt::Display;

use log::trace;
use num::BigRational;
use num::One;
use num::Signed;

pub use patcher::patch_nonbasic_columns;
pub use shift::shift_column;

use crate::math::lcm_with_denominator;
use crate::math::InfRational;
use crate::math::RationalExt;
use crate::relaxation::ColumnId;
use crate::relaxation::Relaxation;
use crate::relaxation::RowEntry;

/// The values a non-basic column can take while every bound of the relaxation stays satisfied.
///
/// For an integer column, only the values `v` in `[lower, upper]` for which `v - value` is a
/// multiple of [`FreedomInterval::granularity`] keep the integer basic columns integral. A side
/// which is [`None`] is unbounded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FreedomInterval {
    pub lower: Option<InfRational>,
    pub upper: Option<InfRational>,
    pub granularity: BigRational,
}

impl Default for FreedomInterval {
    fn default() -> Self {
        FreedomInterval {
            lower: None,
            upper: None,
            granularity: BigRational::one(),
        }
    }
}

impl FreedomInterval {
    /// Raises the lower side to `candidate` if it is tighter than the current one.
    pub fn tighten_lower(&mut self, candidate: InfRational) {
        if self.lower.as_ref().is_none_or(|lower| candidate > *lower) {
            self.lower = Some(candidate);
        }
    }

    /// Lowers the upper side to `candidate` if it is tighter than the current one.
    pub fn tighten_upper(&mut self, candidate: InfRational) {
        if self.upper.as_ref().is_none_or(|upper| candidate < *upper) {
            self.upper = Some(candidate);
        }
    }

    /// Whether the interval contains at least one value.
    pub fn is_feasible(&self) -> bool {
        match (&self.lower, &self.upper) {
            (Some(lower), Some(upper)) => lower <= upper,
            _ => true,
        }
    }

    pub fn contains(&self, value: &InfRational) -> bool {
        self.lower.as_ref().is_none_or(|lower| lower <= value)
            && self.upper.as_ref().is_none_or(|upper| value <= upper)
    }

    /// Translates both finite sides by `offset`.
    pub fn shift_by(self, offset: &InfRational) -> FreedomInterval {
        FreedomInterval {
            lower: self.lower.map(|lower| &lower + offset),
            upper: self.upper.map(|upper| &upper + offset),
            granularity: self.granularity,
        }
    }

    /// Whether both sides are finite and no room is left between them.
    fn is_pinched(&self) -> bool {
        matches!((&self.lower, &self.upper), (Some(lower), Some(upper)) if lower >= upper)
    }
}

impl Display for FreedomInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.lower {
            Some(lower) => write!(f, "[{lower}; ")?,
            None => write!(f, "(-oo; ")?,
        }
        match &self.upper {
            Some(upper) => write!(f, "{upper}]")?,
            None => write!(f, "oo)")?,
        }
        write!(f, ", m = {}", self.granularity)
    }
}

/// How the change of a non-basic column which moves a basic column exactly onto one of its bounds
/// is derived from `basic = coefficient · column + rest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeltaBound {
    UnitCoefficient,
    NegatedUnitCoefficient,
    /// The basic column already sits on the bound.
    AtBound,
    General,
}

impl DeltaBound {
    fn classify(coefficient: &BigRational, value: &InfRational, bound: &InfRational) -> DeltaBound {
        if coefficient.is_one() {
            DeltaBound::UnitCoefficient
        } else if coefficient.is_minus_one() {
            DeltaBound::NegatedUnitCoefficient
        } else if value == bound {
            DeltaBound::AtBound
        } else {
            DeltaBound::General
        }
    }

    fn delta(coefficient: &BigRational, value: &InfRational, bound: &InfRational) -> InfRational {
        match DeltaBound::classify(coefficient, value, bound) {
            DeltaBound::UnitCoefficient => unit_coefficient_delta(value, bound),
            DeltaBound::NegatedUnitCoefficient => negated_unit_coefficient_delta(value, bound),
            DeltaBound::AtBound => InfRational::zero(),
            DeltaBound::General => general_delta(coefficient, value, bound),
        }
    }
}

fn unit_coefficient_delta(value: &InfRational, bound: &InfRational) -> InfRational {
    bound - value
}

fn negated_unit_coefficient_delta(value: &InfRational, bound: &InfRational) -> InfRational {
    value - bound
}

fn general_delta(
    coefficient: &BigRational,
    value: &InfRational,
    bound: &InfRational,
) -> InfRational {
    &(bound - value) / coefficient
}

/// Computes the [`FreedomInterval`] of `column` in absolute values, or [`None`] if the column is
/// basic.
///
/// The interval starts out as the bounds of the column itself; every row in which the column
/// occurs then tightens it such that the basic column of that row stays within its own bounds.
/// The caller should check [`FreedomInterval::is_feasible`] before using the interval.
pub fn freedom_interval(relaxation: &dyn Relaxation, column: ColumnId) -> Option<FreedomInterval> {
    if relaxation.is_basic(column) {
        return None;
    }

    let value = relaxation.value(column);
    let mut interval = FreedomInterval::default();

    if let Some(lower) = relaxation.lower_bound(column) {
        interval.tighten_lower(lower - value);
    }
    if let Some(upper) = relaxation.upper_bound(column) {
        interval.tighten_upper(upper - value);
    }

    let participation = relaxation.row_participation(column);

    for RowEntry {
        basic_column,
        coefficient,
    } in &participation
    {
        if relaxation.column_is_int(*basic_column) && !coefficient.is_integer() {
            interval.granularity = lcm_with_denominator(&interval.granularity, coefficient);
        }
    }

    for RowEntry {
        basic_column,
        coefficient,
    } in &participation
    {
        if interval.is_pinched() {
            break;
        }

        let basic_value = relaxation.value(*basic_column);
        let lower_delta = relaxation
            .lower_bound(*basic_column)
            .map(|bound| DeltaBound::delta(coefficient, basic_value, bound));
        let upper_delta = relaxation
            .upper_bound(*basic_column)
            .map(|bound| DeltaBound::delta(coefficient, basic_value, bound));

        trace!("{basic_column} = {coefficient} * {column} + ...");

        // A negative coefficient moves the basic column against the non-basic one, so its lower
        // bound limits how far the non-basic column can increase.
        let (lower_side, upper_side) = if coefficient.is_negative() {
            (upper_delta, lower_delta)
        } else {
            (lower_delta, upper_delta)
        };
        if let Some(delta) = lower_side {
            interval.tighten_lower(delta);
        }
        if let Some(delta) = upper_side {
            interval.tighten_upper(delta);
        }
    }

    let interval = interval.shift_by(value);
    trace!(
        "freedom interval of {column} = {value}: {interval}, feasible: {}",
        interval.is_feasible()
    );

    Some(interval)
}
