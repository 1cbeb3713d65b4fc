use log::trace;
use num::BigInt;
use num::BigRational;
use num::ToPrimitive;

use super::freedom_interval;
use crate::basic_types::Random;
use crate::lia_assert_simple;
use crate::math::InfRational;
use crate::relaxation::ColumnId;
use crate::relaxation::ColumnType;
use crate::relaxation::Relaxation;

/// Randomly moves the non-basic `column` by at most `range` steps of its granularity, staying
/// within its freedom interval.
///
/// Fixed and basic columns are never moved. Returns whether the value of the column was changed,
/// which is not the case if no grid point besides (possibly) the current value is admissible.
pub fn shift_column(
    relaxation: &mut dyn Relaxation,
    column: ColumnId,
    range: usize,
    random: &mut dyn Random,
) -> bool {
    if relaxation.is_basic(column) || relaxation.column_type(column) == ColumnType::Fixed {
        return false;
    }
    let Some(interval) = freedom_interval(relaxation, column) else {
        return false;
    };

    let value = relaxation.value(column).clone();
    let granularity = interval.granularity;
    let (mut lower, mut upper) = (interval.lower, interval.upper);
    if relaxation.column_is_int(column) {
        lower = lower.map(|lower| lower.ceil());
        upper = upper.map(|upper| upper.floor());
    }

    match (lower, upper) {
        (_, None) => {
            let steps = random.generate_usize_in_range(0..range.saturating_add(1));
            move_column(relaxation, column, grid_point(&value, &granularity, steps))
        }
        (None, Some(_)) => {
            let steps = random.generate_usize_in_range(0..range.saturating_add(1));
            let offset = grid_point(&InfRational::zero(), &granularity, steps);
            move_column(relaxation, column, &value - &offset)
        }
        (Some(lower), Some(upper)) => {
            if lower >= upper {
                return false;
            }

            // The lowest point of the grid through the current value which is not below `lower`.
            let steps_to_lower = (&(&lower - &value) / &granularity).ceil().to_integer();
            let offset = &granularity * BigRational::from_integer(steps_to_lower);
            let base = &value + &InfRational::from_rational(offset);
            if base > upper {
                return false;
            }

            let available = (&(&upper - &base) / &granularity)
                .floor()
                .to_integer()
                .to_usize()
                .unwrap_or(usize::MAX);
            let steps = random.generate_usize_in_range(0..range.min(available).saturating_add(1));
            let new_value = grid_point(&base, &granularity, steps);

            lia_assert_simple!(lower <= new_value && new_value <= upper);
            move_column(relaxation, column, new_value)
        }
    }
}

/// The point `steps` grid steps above `anchor`.
fn grid_point(anchor: &InfRational, granularity: &BigRational, steps: usize) -> InfRational {
    let offset = granularity * BigRational::from_integer(BigInt::from(steps));
    anchor + &InfRational::from_rational(offset)
}

fn move_column(relaxation: &mut dyn Relaxation, column: ColumnId, new_value: InfRational) -> bool {
    trace!(
        "shifting {column} from {} to {new_value}",
        relaxation.value(column)
    );
    let changed = *relaxation.value(column) != new_value;
    relaxation.set_nonbasic_value(column, new_value);
    changed
}

#[cfg(test)]
mod tests {
    use num::BigInt;
    use num::BigRational;

    use super::shift_column;
    use crate::basic_types::tests::TestRandom;
    use crate::basic_types::ConstraintIndex;
    use crate::math::InfRational;
    use crate::relaxation::Relaxation;
    use crate::relaxation::Tableau;

    fn rational(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    fn int(value: i64) -> InfRational {
        InfRational::from_integer(value)
    }

    #[test]
    fn unbounded_column_moves_up_by_the_sampled_steps() {
        for steps in 0..=4 {
            let mut tableau = Tableau::default();
            let x = tableau.new_column(true, int(7));
            let mut random = TestRandom {
                usizes: vec![steps],
            };

            let changed = shift_column(&mut tableau, x, 4, &mut random);

            assert_eq!(tableau.value(x), &int(7 + steps as i64));
            assert_eq!(changed, steps != 0);
        }
    }

    #[test]
    fn unbounded_column_moves_in_multiples_of_the_granularity() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, int(1));
        let s = tableau.new_column(true, int(0));
        let _ = tableau.add_row(s, [(x, rational(1, 3))]).expect("valid row");
        let mut random = TestRandom { usizes: vec![2] };

        assert!(shift_column(&mut tableau, x, 4, &mut random));
        assert_eq!(tableau.value(x), &int(7));
    }

    #[test]
    fn only_lower_bound_moves_upwards() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, int(3));
        tableau.set_lower_bound(x, int(0), ConstraintIndex::new(0));
        let mut random = TestRandom { usizes: vec![3] };

        assert!(shift_column(&mut tableau, x, 5, &mut random));
        assert_eq!(tableau.value(x), &int(6));
    }

    #[test]
    fn only_upper_bound_moves_downwards() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, int(3));
        tableau.set_upper_bound(x, int(3), ConstraintIndex::new(0));
        let mut random = TestRandom { usizes: vec![5] };

        assert!(shift_column(&mut tableau, x, 5, &mut random));
        assert_eq!(tableau.value(x), &int(-2));
    }

    #[test]
    fn boxed_column_samples_within_its_bounds() {
        // x in [2, 6] at 4; the grid through 4 starts at 2 and holds 5 points.
        for steps in 0..=4 {
            let mut tableau = Tableau::default();
            let x = tableau.new_column(true, int(4));
            tableau.set_lower_bound(x, int(2), ConstraintIndex::new(0));
            tableau.set_upper_bound(x, int(6), ConstraintIndex::new(1));
            let mut random = TestRandom {
                usizes: vec![steps],
            };

            let _ = shift_column(&mut tableau, x, 10, &mut random);

            assert_eq!(tableau.value(x), &int(2 + steps as i64));
            assert!(tableau.is_feasible());
        }
    }

    #[test]
    #[should_panic]
    fn range_is_capped_by_the_available_grid_points() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, int(4));
        tableau.set_lower_bound(x, int(2), ConstraintIndex::new(0));
        tableau.set_upper_bound(x, int(6), ConstraintIndex::new(1));
        // Sampling 7 would fall outside of the capped range 0..=4.
        let mut random = TestRandom { usizes: vec![7] };

        let _ = shift_column(&mut tableau, x, 10, &mut random);
    }

    #[test]
    fn integer_column_with_fractional_bounds_is_rounded_inwards() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, int(3));
        tableau.set_lower_bound(x, InfRational::from_fraction(5, 2), ConstraintIndex::new(0));
        tableau.set_upper_bound(x, InfRational::from_fraction(7, 2), ConstraintIndex::new(1));
        let mut random = TestRandom::default();

        // Only 3 remains admissible, which leaves nothing to shift to.
        assert!(!shift_column(&mut tableau, x, 4, &mut random));
        assert_eq!(tableau.value(x), &int(3));
    }

    #[test]
    fn fixed_and_basic_columns_are_not_shifted() {
        let mut tableau = Tableau::default();
        let fixed = tableau.new_column(true, int(3));
        tableau.set_lower_bound(fixed, int(3), ConstraintIndex::new(0));
        tableau.set_upper_bound(fixed, int(3), ConstraintIndex::new(1));
        let x = tableau.new_column(true, int(0));
        let s = tableau.new_column(true, int(0));
        let _ = tableau.add_row(s, [(x, rational(1, 1))]).expect("valid row");
        let mut random = TestRandom::default();

        assert!(!shift_column(&mut tableau, fixed, 4, &mut random));
        assert!(!shift_column(&mut tableau, s, 4, &mut random));
    }

    #[test]
    fn shifting_respects_rows() {
        let mut tableau = Tableau::default();
        let x = tableau.new_column(true, int(0));
        tableau.set_lower_bound(x, int(-10), ConstraintIndex::new(0));
        let s = tableau.new_column(true, int(0));
        tableau.set_upper_bound(s, int(2), ConstraintIndex::new(1));
        let _ = tableau.add_row(s, [(x, rational(1, 2))]).expect("valid row");
        // x lies in [-10, 4] with granularity 2, giving the grid -10, -8, ..., 4.
        let mut random = TestRandom { usizes: vec![7] };

        assert!(shift_column(&mut tableau, x, 100, &mut random));
        assert_eq!(tableau.value(x), &int(4));
        assert_eq!(tableau.value(s), &int(2));
        assert!(tableau.is_feasible());
    }
}
