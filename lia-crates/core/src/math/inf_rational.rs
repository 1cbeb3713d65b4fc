use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Div;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use num::BigInt;
use num::BigRational;
use num::One;
use num::Signed;
use num::Zero;

use super::RationalExt;

/// A rational number extended with an infinitesimal component, representing `x + y·δ` for some
/// arbitrarily small `δ > 0`.
///
/// Strict bounds of the relaxation are encoded through the infinitesimal (e.g. `v < 3` becomes
/// `v <= 3 - δ`), which is why values and bounds are compared as [`InfRational`]s everywhere.
/// The order is lexicographic: first on the rational part, then on the infinitesimal part.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct InfRational {
    x: BigRational,
    y: BigRational,
}

impl InfRational {
    pub fn new(x: BigRational, y: BigRational) -> Self {
        InfRational { x, y }
    }

    pub fn zero() -> Self {
        InfRational::default()
    }

    pub fn from_rational(x: BigRational) -> Self {
        InfRational {
            x,
            y: BigRational::zero(),
        }
    }

    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        InfRational::from_rational(BigRational::from_integer(value.into()))
    }

    /// Creates `numer / denom`, panics if `denom` is zero.
    pub fn from_fraction(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
        InfRational::from_rational(BigRational::new(numer.into(), denom.into()))
    }

    /// The rational part `x`.
    pub fn rational(&self) -> &BigRational {
        &self.x
    }

    /// The coefficient `y` of the infinitesimal.
    pub fn infinitesimal(&self) -> &BigRational {
        &self.y
    }

    /// Whether the value is an integer, i.e. it has no infinitesimal part and an integral
    /// rational part.
    pub fn is_int(&self) -> bool {
        self.y.is_zero() && self.x.is_integer()
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// The largest integer which is at most `self`.
    ///
    /// An integral rational part with a negative infinitesimal lies just below that integer, so
    /// the result is one less.
    pub fn floor(&self) -> InfRational {
        if self.x.is_integer() {
            if self.y.is_negative() {
                InfRational::from_rational(&self.x - BigRational::one())
            } else {
                InfRational::from_rational(self.x.clone())
            }
        } else {
            InfRational::from_rational(self.x.floor())
        }
    }

    /// The smallest integer which is at least `self`.
    pub fn ceil(&self) -> InfRational {
        if self.x.is_integer() {
            if self.y.is_positive() {
                InfRational::from_rational(&self.x + BigRational::one())
            } else {
                InfRational::from_rational(self.x.clone())
            }
        } else {
            InfRational::from_rational(self.x.ceil())
        }
    }

    /// Whether the rational part is an integral multiple of `m`.
    pub(crate) fn is_multiple_of(&self, m: &BigRational) -> bool {
        self.y.is_zero() && (&self.x / m).is_integer()
    }

    /// Converts an integral value into a [`BigInt`]; the infinitesimal part is ignored.
    pub(crate) fn to_integer(&self) -> BigInt {
        self.x.floor_to_integer()
    }
}

impl Ord for InfRational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x.cmp(&other.x).then_with(|| self.y.cmp(&other.y))
    }
}

impl PartialOrd for InfRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<BigRational> for InfRational {
    fn from(value: BigRational) -> Self {
        InfRational::from_rational(value)
    }
}

impl Add<&InfRational> for &InfRational {
    type Output = InfRational;

    fn add(self, rhs: &InfRational) -> InfRational {
        InfRational {
            x: &self.x + &rhs.x,
            y: &self.y + &rhs.y,
        }
    }
}

impl Add for InfRational {
    type Output = InfRational;

    fn add(self, rhs: InfRational) -> InfRational {
        &self + &rhs
    }
}

impl AddAssign<&InfRational> for InfRational {
    fn add_assign(&mut self, rhs: &InfRational) {
        self.x += &rhs.x;
        self.y += &rhs.y;
    }
}

impl Sub<&InfRational> for &InfRational {
    type Output = InfRational;

    fn sub(self, rhs: &InfRational) -> InfRational {
        InfRational {
            x: &self.x - &rhs.x,
            y: &self.y - &rhs.y,
        }
    }
}

impl Sub for InfRational {
    type Output = InfRational;

    fn sub(self, rhs: InfRational) -> InfRational {
        &self - &rhs
    }
}

impl Neg for &InfRational {
    type Output = InfRational;

    fn neg(self) -> InfRational {
        InfRational {
            x: -&self.x,
            y: -&self.y,
        }
    }
}

impl Mul<&BigRational> for &InfRational {
    type Output = InfRational;

    fn mul(self, rhs: &BigRational) -> InfRational {
        InfRational {
            x: &self.x * rhs,
            y: &self.y * rhs,
        }
    }
}

impl Div<&BigRational> for &InfRational {
    type Output = InfRational;

    fn div(self, rhs: &BigRational) -> InfRational {
        InfRational {
            x: &self.x / rhs,
            y: &self.y / rhs,
        }
    }
}

impl Display for InfRational {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.y.is_zero() {
            write!(f, "{}", self.x)
        } else {
            write!(f, "{} + {}δ", self.x, self.y)
        }
    }
}

#[cfg(test)]
mod tests {
    use num::BigInt;
    use num::BigRational;

    use super::InfRational;

    fn with_delta(x: i64, y: i64) -> InfRational {
        InfRational::new(
            BigRational::from_integer(BigInt::from(x)),
            BigRational::from_integer(BigInt::from(y)),
        )
    }

    #[test]
    fn order_is_lexicographic() {
        assert!(with_delta(2, 5) < with_delta(3, -5));
        assert!(with_delta(3, -1) < with_delta(3, 0));
        assert!(with_delta(3, 0) < with_delta(3, 1));
        assert_eq!(with_delta(3, 1), with_delta(3, 1));
    }

    #[test]
    fn floor_accounts_for_negative_infinitesimal() {
        assert_eq!(with_delta(3, -1).floor(), InfRational::from_integer(2));
        assert_eq!(with_delta(3, 1).floor(), InfRational::from_integer(3));
        assert_eq!(
            InfRational::from_fraction(-5, 2).floor(),
            InfRational::from_integer(-3)
        );
    }

    #[test]
    fn ceil_accounts_for_positive_infinitesimal() {
        assert_eq!(with_delta(3, 1).ceil(), InfRational::from_integer(4));
        assert_eq!(with_delta(3, -1).ceil(), InfRational::from_integer(3));
        assert_eq!(
            InfRational::from_fraction(5, 2).ceil(),
            InfRational::from_integer(3)
        );
    }

    #[test]
    fn integrality_requires_zero_infinitesimal() {
        assert!(InfRational::from_integer(7).is_int());
        assert!(!with_delta(7, 1).is_int());
        assert!(!InfRational::from_fraction(7, 2).is_int());
    }

    #[test]
    fn scalar_operations_apply_to_both_components() {
        let value = with_delta(4, 2);
        let half = BigRational::new(BigInt::from(1), BigInt::from(2));

        assert_eq!(&value * &half, with_delta(2, 1));
        assert_eq!(&value / &half, with_delta(8, 4));
        assert_eq!(-&value, with_delta(-4, -2));
        assert_eq!(&value - &with_delta(1, 2), InfRational::from_integer(3));
    }

    #[test]
    fn display_shows_infinitesimal_only_when_present() {
        assert_eq!(InfRational::from_fraction(5, 2).to_string(), "5/2");
        assert_eq!(with_delta(1, -1).to_string(), "1 + -1δ");
    }
}
