//! # LIA core
//! Restores integer feasibility on top of an LP relaxation which is already feasible over the
//! rationals.
//!
//! The entry point is [`IntSolver::check`], which is called whenever the relaxation has been
//! solved. It either repairs the assignment cheaply (by moving non-basic columns within their
//! [freedom interval](freedom::freedom_interval)), or reports a cut, a branch or a conflict which
//! the caller adds to the relaxation before solving it again.
//!
//! The relaxation itself is accessed through the [`Relaxation`] trait; the crate ships with a
//! dictionary-form [`Tableau`] which implements it.
//!
//! # Example
//! ```rust
//! # use lia_core::ConstraintIndex;
//! # use lia_core::Explanation;
//! # use lia_core::InfRational;
//! # use lia_core::IntSolver;
//! # use lia_core::LiaMove;
//! # use lia_core::Relaxation;
//! # use lia_core::Tableau;
//! let mut tableau = Tableau::default();
//! // x in [0, 5] with the value 5/2
//! let x = tableau.new_column(true, InfRational::from_fraction(5, 2));
//! tableau.set_lower_bound(x, InfRational::zero(), ConstraintIndex::new(0));
//! tableau.set_upper_bound(x, InfRational::from_integer(5), ConstraintIndex::new(1));
//!
//! let mut solver = IntSolver::default();
//! let mut explanation = Explanation::default();
//!
//! assert_eq!(solver.check(&mut tableau, &mut explanation), LiaMove::Sat);
//! assert!(tableau.value(x).is_int());
//! ```
#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub mod freedom;
mod int_solver;
pub(crate) mod math;
pub mod options;
pub mod relaxation;
pub mod statistics;
pub mod strategies;

pub use convert_case;
pub use num;
pub use rand;

pub use crate::basic_types::ConstraintIndex;
pub use crate::basic_types::Cut;
pub use crate::basic_types::Explanation;
pub use crate::basic_types::LiaMove;
pub use crate::basic_types::LinearTerm;
pub use crate::basic_types::Random;
pub use crate::int_solver::IntSolver;
pub use crate::int_solver::IntSolverStatistics;
pub use crate::math::InfRational;
pub use crate::math::RationalExt;
pub use crate::options::IntSolverOptions;
pub use crate::relaxation::ColumnId;
pub use crate::relaxation::Relaxation;
pub use crate::relaxation::Tableau;
