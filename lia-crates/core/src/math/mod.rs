//! Exact arithmetic used throughout the integer solver.
mod inf_rational;
mod num_ext;

pub use inf_rational::InfRational;
pub(crate) use num_ext::lcm_with_denominator;
pub use num_ext::RationalExt;
