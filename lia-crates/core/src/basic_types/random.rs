use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

/// Abstraction for randomness, in order to swap out different source of randomness.
///
/// This is especially useful when testing, to control which values are generated when the
/// diversification step or the branching strategy asks for a random choice.
///
/// # Testing
/// There is an implementation of this trait which takes as input a list of `usize`s and returns
/// them in that order. This allows defining deterministic test-cases while the implementation
/// makes use of an implementation of the [`Random`] trait.
pub trait Random: Debug {
    /// Generates a random usize in the provided range with equal probability; this can be seen as
    /// sampling from a uniform distribution in the range `[range.start, range.end)`
    ///
    /// # Example
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use lia_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// // Pick one of five grid steps
    /// let steps = rng.generate_usize_in_range(0..5);
    /// assert!(steps < 5);
    /// ```
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;
}

// We provide a blanket implementation of the trait for any type which implements `SeedableRng`,
// `Rng` and `Debug` to ensure that we can use any "regular" random generator where we expect an
// implementation of Random.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::ops::Range;

    use super::Random;
    use crate::lia_assert_simple;

    /// A test "random" generator which takes as input a list of [`usize`]s and returns them in
    /// order. If more values are attempted to be generated than are provided then this will
    /// result in panicking.
    #[derive(Debug, Default)]
    pub(crate) struct TestRandom {
        pub(crate) usizes: Vec<usize>,
    }

    impl Random for TestRandom {
        fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
            let selected = self.usizes.remove(0);
            lia_assert_simple!(
                range.contains(&selected),
                "The selected element by `TestRandom` ({selected}) is not in the provided range ({range:?}) and thus should not be returned, please ensure that your test cases are correctly defined"
            );
            selected
        }
    }

    #[test]
    fn test_random_returns_values_in_order() {
        let mut random = TestRandom {
            usizes: vec![2, 0, 4],
        };

        assert_eq!(random.generate_usize_in_range(0..5), 2);
        assert_eq!(random.generate_usize_in_range(0..1), 0);
        assert_eq!(random.generate_usize_in_range(3..5), 4);
    }

    #[test]
    #[should_panic]
    fn test_random_rejects_values_outside_of_range() {
        let mut random = TestRandom { usizes: vec![7] };
        let _ = random.generate_usize_in_range(0..5);
    }
}
