use log::debug;
use log::trace;
use num::One;

use super::freedom_interval;
use crate::basic_types::LiaMove;
use crate::lia_assert_moderate;
use crate::math::InfRational;
use crate::relaxation::ColumnId;
use crate::relaxation::Relaxation;

/// Moves every non-basic column onto an integral point of its freedom interval, where one exists.
///
/// Every column is only ever moved within its own freedom interval, so a relaxation in which all
/// columns are within their bounds stays that way. Returns [`LiaMove::Sat`] if afterwards every
/// integer column is integral, and [`LiaMove::Undefined`] otherwise.
pub fn patch_nonbasic_columns(relaxation: &mut dyn Relaxation) -> LiaMove {
    lia_assert_moderate!(
        relaxation.is_feasible(),
        "patching requires a relaxation which satisfies all bounds"
    );

    let mut num_patched = 0;
    for column in relaxation.nonbasic_columns() {
        if patch_nonbasic_column(relaxation, column) {
            num_patched += 1;
        }
    }

    lia_assert_moderate!(
        relaxation.is_feasible(),
        "patching moved a column outside of its bounds"
    );

    let has_inf_int = relaxation.has_inf_int();
    debug!("patched {num_patched} non-basic columns, integer infeasible: {has_inf_int}");

    if has_inf_int {
        LiaMove::Undefined
    } else {
        LiaMove::Sat
    }
}

/// Returns whether the value of `column` was changed.
fn patch_nonbasic_column(relaxation: &mut dyn Relaxation, column: ColumnId) -> bool {
    let Some(interval) = freedom_interval(relaxation, column) else {
        return false;
    };
    if !interval.is_feasible() {
        return false;
    }

    let granularity = &interval.granularity;
    let granularity_is_one = granularity.is_one();
    let value = relaxation.value(column);
    if value.is_int() && (granularity_is_one || value.is_multiple_of(granularity)) {
        return false;
    }

    trace!(
        "target {column} -> {interval}, value: {value}, is_int: {}",
        relaxation.column_is_int(column)
    );

    let new_value = if let Some(lower) = &interval.lower {
        let candidate = if granularity_is_one {
            lower.ceil()
        } else {
            &(lower / granularity).ceil() * granularity
        };
        if interval
            .upper
            .as_ref()
            .is_some_and(|upper| candidate > *upper)
        {
            trace!("not patching {column} with {candidate}");
            return false;
        }
        candidate
    } else if let Some(upper) = &interval.upper {
        if granularity_is_one {
            upper.floor()
        } else {
            &(upper / granularity).floor() * granularity
        }
    } else {
        InfRational::zero()
    };

    trace!("patching {column} with {new_value}");
    relaxation.set_nonbasic_value(column, new_value);
    true
}

#[cfg(test)]
mod tests {
    use num::BigInt;
    use num::BigRational;

    use super::patch_nonbasic_column;
    use super::patch_nonbasic_columns;
    use crate::basic_types::ConstraintIndex;
    use crate::basic_types::LiaMove;
    use crate::math::InfRational;
    use crate::relaxation::ColumnId;
    use crate::relaxation::Relaxation;
    use crate::relaxation::Tableau;

    fn rational(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    fn int(value: i64) -> InfRational {
        InfRational::from_integer(value)
    }

    fn boxed(tableau: &mut Tableau, value: InfRational, lower: i64, upper: i64) -> ColumnId {
        let column = tableau.new_column(true, value);
        tableau.set_lower_bound(column, int(lower), ConstraintIndex::new(0));
        tableau.set_upper_bound(column, int(upper), ConstraintIndex::new(1));
        column
    }

    #[test]
    fn fractional_boxed_column_is_rounded_up() {
        let mut tableau = Tableau::default();
        let x = boxed(&mut tableau, InfRational::from_fraction(5, 2), 0, 5);
        // The lower bound is tight after the row, so patching moves x onto ceil(lower).
        let s = tableau.new_column(true, int(0));
        tableau.set_lower_bound(s, InfRational::from_fraction(5, 2), ConstraintIndex::new(2));
        let _ = tableau.add_row(s, [(x, rational(1, 1))]).expect("valid row");

        assert!(patch_nonbasic_column(&mut tableau, x));
        assert_eq!(tableau.value(x), &int(3));
        assert_eq!(tableau.value(s), &int(3));
    }

    #[test]
    fn unconstrained_lower_side_is_used_before_upper_side() {
        let mut tableau = Tableau::default();
        let x = boxed(&mut tableau, InfRational::from_fraction(5, 2), 0, 5);

        let result = patch_nonbasic_columns(&mut tableau);

        assert_eq!(tableau.value(x), &int(0));
        assert_eq!(result, LiaMove::Sat);
    }

    #[test]
    fn only_upper_side_rounds_down() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, InfRational::from_fraction(7, 2));
        tableau.set_upper_bound(x, InfRational::from_fraction(9, 2), ConstraintIndex::new(0));

        assert!(patch_nonbasic_column(&mut tableau, x));
        assert_eq!(tableau.value(x), &int(4));
    }

    #[test]
    fn unbounded_column_is_moved_to_zero() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, InfRational::from_fraction(7, 2));

        assert!(patch_nonbasic_column(&mut tableau, x));
        assert_eq!(tableau.value(x), &int(0));
    }

    #[test]
    fn integral_column_on_the_grid_is_left_alone() {
        let mut tableau = Tableau::default();
        let x = boxed(&mut tableau, int(4), 0, 10);
        let s = tableau.new_column(true, int(0));
        let _ = tableau.add_row(s, [(x, rational(1, 2))]).expect("valid row");

        assert!(!patch_nonbasic_column(&mut tableau, x));
        assert_eq!(tableau.value(x), &int(4));
    }

    #[test]
    fn integral_column_off_the_grid_is_moved_onto_it() {
        let mut tableau = Tableau::default();
        let x = boxed(&mut tableau, int(3), 1, 10);
        let s = tableau.new_column(true, int(0));
        let _ = tableau.add_row(s, [(x, rational(1, 2))]).expect("valid row");
        assert_eq!(tableau.value(s), &InfRational::from_fraction(3, 2));

        assert!(patch_nonbasic_column(&mut tableau, x));
        assert_eq!(tableau.value(x), &int(2));
        assert_eq!(tableau.value(s), &int(1));
    }

    #[test]
    fn candidate_beyond_the_upper_side_is_declined() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, InfRational::from_fraction(5, 2));
        tableau.set_lower_bound(x, InfRational::from_fraction(9, 4), ConstraintIndex::new(0));
        tableau.set_upper_bound(x, InfRational::from_fraction(11, 4), ConstraintIndex::new(1));

        assert!(!patch_nonbasic_column(&mut tableau, x));
        assert_eq!(tableau.value(x), &InfRational::from_fraction(5, 2));
    }

    #[test]
    fn basic_columns_are_not_patched() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(false, InfRational::from_fraction(1, 3));
        let s = tableau.new_column(true, int(0));
        let _ = tableau.add_row(s, [(x, rational(3, 2))]).expect("valid row");

        assert!(!patch_nonbasic_column(&mut tableau, s));
    }

    #[test]
    fn moving_a_real_column_can_repair_an_integer_basic_column() {
        let mut tableau = Tableau::default();
        let y = tableau.new_column(false, InfRational::from_fraction(1, 6));
        tableau.set_lower_bound(y, int(0), ConstraintIndex::new(0));
        tableau.set_upper_bound(y, int(1), ConstraintIndex::new(1));
        let s = tableau.new_column(true, int(0));
        let _ = tableau.add_row(s, [(y, rational(3, 1))]).expect("valid row");
        assert!(tableau.has_inf_int());

        let result = patch_nonbasic_columns(&mut tableau);

        assert_eq!(result, LiaMove::Sat);
        assert_eq!(tableau.value(y), &int(0));
        assert_eq!(tableau.value(s), &int(0));
    }

    #[test]
    fn patching_keeps_bounds_and_is_idempotent_once_integral() {
        let mut tableau = Tableau::default();
        let x = boxed(&mut tableau, InfRational::from_fraction(3, 2), 0, 8);
        let y = boxed(&mut tableau, InfRational::from_fraction(1, 2), -3, 3);
        let s = tableau.new_column(true, int(0));
        tableau.set_upper_bound(s, int(12), ConstraintIndex::new(2));
        tableau.set_lower_bound(s, int(-2), ConstraintIndex::new(3));
        let _ = tableau
            .add_row(s, [(x, rational(2, 1)), (y, rational(-1, 1))])
            .expect("valid row");
        assert!(tableau.is_feasible());

        let result = patch_nonbasic_columns(&mut tableau);
        assert!(tableau.is_feasible());
        assert_eq!(result, LiaMove::Sat);

        let values = tableau
            .columns()
            .map(|column| tableau.value(column).clone())
            .collect::<Vec<_>>();
        let _ = patch_nonbasic_columns(&mut tableau);
        let values_after = tableau
            .columns()
            .map(|column| tableau.value(column).clone())
            .collect::<Vec<_>>();

        assert_eq!(values, values_after);
    }
}
