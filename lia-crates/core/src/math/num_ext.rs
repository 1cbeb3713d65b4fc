//! Extensions for exact rationals which `num` does not offer directly.

use num::BigInt;
use num::BigRational;
use num::Integer;
use num::One;
use num::Signed;

pub trait RationalExt {
    /// Whether the value is exactly `-1`.
    fn is_minus_one(&self) -> bool;

    /// The largest integer not greater than `self`.
    fn floor_to_integer(&self) -> BigInt;

    /// The smallest integer not less than `self`.
    fn ceil_to_integer(&self) -> BigInt;
}

impl RationalExt for BigRational {
    fn is_minus_one(&self) -> bool {
        self.is_negative() && self.numer().abs().is_one() && self.denom().is_one()
    }

    fn floor_to_integer(&self) -> BigInt {
        self.floor().to_integer()
    }

    fn ceil_to_integer(&self) -> BigInt {
        self.ceil().to_integer()
    }
}

/// The least common multiple of `current` and the denominator of `coefficient`.
pub(crate) fn lcm_with_denominator(
    current: &BigRational,
    coefficient: &BigRational,
) -> BigRational {
    // The granularity is always integral, so only its numerator takes part.
    BigRational::from_integer(current.numer().lcm(coefficient.denom()))
}

#[cfg(test)]
mod tests {
    use num::BigInt;
    use num::BigRational;
    use num::One;

    use super::lcm_with_denominator;
    use super::RationalExt;

    fn rational(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn minus_one_is_recognised() {
        assert!(rational(-1, 1).is_minus_one());
        assert!(rational(-3, 3).is_minus_one());
        assert!(!rational(1, 1).is_minus_one());
        assert!(!rational(-1, 2).is_minus_one());
    }

    #[test]
    fn floor_and_ceil_round_towards_the_correct_side_for_negatives() {
        assert_eq!(rational(-5, 2).floor_to_integer(), BigInt::from(-3));
        assert_eq!(rational(-5, 2).ceil_to_integer(), BigInt::from(-2));
        assert_eq!(rational(7, 3).floor_to_integer(), BigInt::from(2));
        assert_eq!(rational(7, 3).ceil_to_integer(), BigInt::from(3));
        assert_eq!(rational(4, 1).ceil_to_integer(), BigInt::from(4));
    }

    #[test]
    fn lcm_accumulates_denominators() {
        let m = lcm_with_denominator(&BigRational::one(), &rational(1, 4));
        let m = lcm_with_denominator(&m, &rational(5, 6));

        assert_eq!(m, rational(12, 1));
    }
}
