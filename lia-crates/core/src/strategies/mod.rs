//! The strategies which the [`IntSolver`] tries, in order of increasing cost, to restore
//! integrality.
//!
//! Apart from [`Branch`], the actual cut generation (GCD test, cube search, lattice cuts, Gomory
//! cuts) is provided by the user of this crate through the [`IntegralityStrategy`] trait; the
//! solver only decides when each of them is invoked and checks what they produce.
mod branch;

use std::fmt::Debug;

pub use branch::Branch;
pub use branch::BranchColumnSelection;

use crate::basic_types::Cut;
use crate::basic_types::Explanation;
use crate::basic_types::LiaMove;
use crate::basic_types::Random;
use crate::freedom;
use crate::freedom::FreedomInterval;
use crate::relaxation::ColumnId;
use crate::relaxation::Relaxation;
#[cfg(doc)]
use crate::IntSolver;

/// A technique for restoring integrality, invoked by the [`IntSolver`].
///
/// A strategy returns [`LiaMove::Undefined`] if it made no progress. When it returns
/// [`LiaMove::Cut`], [`LiaMove::Branch`] or [`LiaMove::Conflict`], the cut buffer and explanation
/// of the [`StrategyContext`] should describe the result; both are cleared before every attempt.
pub trait IntegralityStrategy: Debug {
    /// The name of the strategy, used when logging.
    fn name(&self) -> &str;

    fn attempt(&mut self, context: &mut StrategyContext<'_>) -> LiaMove;
}

/// The state which a strategy can read and modify during an attempt.
#[derive(Debug)]
pub struct StrategyContext<'a> {
    relaxation: &'a mut dyn Relaxation,
    cut: &'a mut Cut,
    explanation: &'a mut Explanation,
    random: &'a mut dyn Random,
}

impl<'a> StrategyContext<'a> {
    pub(crate) fn new(
        relaxation: &'a mut dyn Relaxation,
        cut: &'a mut Cut,
        explanation: &'a mut Explanation,
        random: &'a mut dyn Random,
    ) -> Self {
        StrategyContext {
            relaxation,
            cut,
            explanation,
            random,
        }
    }

    pub fn relaxation(&self) -> &dyn Relaxation {
        &*self.relaxation
    }

    /// Mutable access to the relaxation; values should only be changed through
    /// [`Relaxation::set_nonbasic_value`] so basic columns stay consistent with their rows.
    pub fn relaxation_mut(&mut self) -> &mut dyn Relaxation {
        &mut *self.relaxation
    }

    pub fn cut(&self) -> &Cut {
        &*self.cut
    }

    pub fn cut_mut(&mut self) -> &mut Cut {
        &mut *self.cut
    }

    pub fn explanation(&self) -> &Explanation {
        &*self.explanation
    }

    pub fn explanation_mut(&mut self) -> &mut Explanation {
        &mut *self.explanation
    }

    pub fn random(&mut self) -> &mut dyn Random {
        &mut *self.random
    }

    /// See [`freedom::freedom_interval`].
    pub fn freedom_interval(&self, column: ColumnId) -> Option<FreedomInterval> {
        freedom::freedom_interval(&*self.relaxation, column)
    }

    /// See [`freedom::shift_column`].
    pub fn shift_column(&mut self, column: ColumnId, range: usize) -> bool {
        freedom::shift_column(&mut *self.relaxation, column, range, &mut *self.random)
    }

    /// Adds the witnesses of the bounds of `column` to the explanation.
    pub fn explain_bounds_of(&mut self, column: ColumnId) {
        self.explanation
            .push_bound_witnesses(&*self.relaxation, column);
    }
}

/// The strategies used by an [`IntSolver`].
///
/// The optional strategies are skipped when absent; branching always happens as the last resort
/// and must produce a definitive result.
#[derive(Debug)]
pub struct Strategies {
    pub gcd_test: Option<Box<dyn IntegralityStrategy>>,
    pub cube: Option<Box<dyn IntegralityStrategy>>,
    pub lattice_cut: Option<Box<dyn IntegralityStrategy>>,
    pub gomory_cut: Option<Box<dyn IntegralityStrategy>>,
    pub branch: Box<dyn IntegralityStrategy>,
}

impl Default for Strategies {
    fn default() -> Self {
        Strategies::new(Branch::default())
    }
}

impl Strategies {
    pub fn new(branch: impl IntegralityStrategy + 'static) -> Self {
        Strategies {
            gcd_test: None,
            cube: None,
            lattice_cut: None,
            gomory_cut: None,
            branch: Box::new(branch),
        }
    }

    pub fn with_gcd_test(mut self, strategy: impl IntegralityStrategy + 'static) -> Self {
        self.gcd_test = Some(Box::new(strategy));
        self
    }

    pub fn with_cube(mut self, strategy: impl IntegralityStrategy + 'static) -> Self {
        self.cube = Some(Box::new(strategy));
        self
    }

    pub fn with_lattice_cut(mut self, strategy: impl IntegralityStrategy + 'static) -> Self {
        self.lattice_cut = Some(Box::new(strategy));
        self
    }

    pub fn with_gomory_cut(mut self, strategy: impl IntegralityStrategy + 'static) -> Self {
        self.gomory_cut = Some(Box::new(strategy));
        self
    }
}
