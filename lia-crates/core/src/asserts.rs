//! Leveled assertions for the integer solver.
//!
//! Checks at the simple level are always performed. The more expensive levels (re-evaluating
//! every bound of the relaxation, verifying that a cut is violated) are only enabled in tests or
//! when the `debug-checks` feature is turned on.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const LIA_ASSERT_LEVEL_DEFINITION: u8 = LIA_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const LIA_ASSERT_LEVEL_DEFINITION: u8 = LIA_ASSERT_ADVANCED;

pub const LIA_ASSERT_SIMPLE: u8 = 1;
pub const LIA_ASSERT_MODERATE: u8 = 2;
pub const LIA_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! lia_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::LIA_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LIA_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! lia_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::LIA_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LIA_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! lia_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::LIA_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LIA_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
