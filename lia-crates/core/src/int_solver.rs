use log::debug;
use log::trace;
use log::warn;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::basic_types::Cut;
use crate::basic_types::Explanation;
use crate::basic_types::LiaMove;
use crate::basic_types::Random;
use crate::create_statistics_struct;
use crate::freedom::patch_nonbasic_columns;
use crate::lia_assert_advanced;
use crate::lia_assert_moderate;
use crate::lia_assert_simple;
use crate::options::IntSolverOptions;
use crate::relaxation::InfeasibleColumnsDisplay;
use crate::relaxation::Relaxation;
use crate::relaxation::TrackPivotedRowsGuard;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::strategies::Branch;
use crate::strategies::IntegralityStrategy;
use crate::strategies::Strategies;
use crate::strategies::StrategyContext;

create_statistics_struct!(
    /// Counters of the [`IntSolver`]; they are purely observational.
    IntSolverStatistics {
    /// The number of checks which went beyond the initial integrality test.
    num_calls: u64,
    num_patches: u64,
    /// The number of patching passes after which every integer column was integral.
    num_patch_successes: u64,
    num_gcd_conflicts: u64,
    /// The number of times the cube search reached a definitive result.
    num_cubes: u64,
    num_lattice_cut_calls: u64,
    num_lattice_cuts: u64,
    num_gomory_cuts: u64,
    num_branches: u64,
    /// The number of cuts which were not violated by the current assignment and were therefore
    /// not reported.
    num_discarded_cuts: u64,
});

/// Drives an LP relaxation which is feasible over the rationals towards an assignment in which
/// every integer column is integral.
///
/// Every [`IntSolver::check`] tries the strategies in order of increasing cost: the GCD test,
/// patching of non-basic columns, the cube search, lattice cuts, Gomory cuts and finally
/// branching. The cube search, lattice cuts and Gomory cuts only run on every `n`-th check, where
/// the period of the lattice cuts backs off exponentially while they fail.
#[derive(Debug)]
pub struct IntSolver {
    options: IntSolverOptions,
    strategies: Strategies,
    statistics: IntSolverStatistics,
    /// The number of checks which went beyond the initial integrality test.
    number_of_calls: u64,
    /// The current period of the lattice cuts.
    lattice_cut_period: u64,
    /// The cut (or branch) produced by the last check.
    cut: Cut,
    random_generator: SmallRng,
}

impl Default for IntSolver {
    fn default() -> Self {
        IntSolver::new(IntSolverOptions::default())
    }
}

impl IntSolver {
    /// Creates a solver which only has the default branching strategy; the other strategies can be
    /// provided through [`IntSolver::with_strategies`].
    pub fn new(options: IntSolverOptions) -> Self {
        let strategies = Strategies::new(Branch::new(options.branch_column_selection));
        IntSolver::with_strategies(options, strategies)
    }

    pub fn with_strategies(options: IntSolverOptions, strategies: Strategies) -> Self {
        IntSolver {
            options,
            strategies,
            statistics: IntSolverStatistics::default(),
            number_of_calls: 0,
            lattice_cut_period: options.lattice_cut_period,
            cut: Cut::default(),
            random_generator: SmallRng::seed_from_u64(options.random_seed),
        }
    }

    /// Tries to restore integrality of `relaxation`.
    ///
    /// The result is never [`LiaMove::Undefined`]:
    /// - [`LiaMove::Sat`] if every integer column is integral (possibly after patching),
    /// - [`LiaMove::Cut`] if [`IntSolver::cut`] holds a cut which is violated by the current
    ///   assignment, justified by `explanation`,
    /// - [`LiaMove::Branch`] if [`IntSolver::cut`] holds the split to branch on,
    /// - [`LiaMove::Conflict`] if `explanation` proves that no integral assignment exists.
    ///
    /// The tracking of pivoted rows is disabled during the check and restored afterwards.
    pub fn check(
        &mut self,
        relaxation: &mut dyn Relaxation,
        explanation: &mut Explanation,
    ) -> LiaMove {
        if !relaxation.has_inf_int() {
            return LiaMove::Sat;
        }

        self.cut.clear();
        explanation.clear();
        let mut relaxation = TrackPivotedRowsGuard::new(relaxation);
        trace!(
            "{}",
            InfeasibleColumnsDisplay {
                relaxation: &*relaxation
            }
        );

        let mut result = LiaMove::Undefined;

        if self.options.run_gcd_test {
            if let Some(gcd_test) = self.strategies.gcd_test.as_deref_mut() {
                result = run_strategy(
                    gcd_test,
                    &mut *relaxation,
                    &mut self.cut,
                    explanation,
                    &mut self.random_generator,
                    &mut self.statistics,
                );
                if result == LiaMove::Conflict {
                    self.statistics.num_gcd_conflicts += 1;
                }
            }
        }

        if self.options.pivot_fixed_vars_from_basis {
            relaxation.pivot_fixed_vars_from_basis();
        }

        if result == LiaMove::Undefined {
            self.statistics.num_patches += 1;
            result = patch_nonbasic_columns(&mut *relaxation);
            if result == LiaMove::Sat {
                self.statistics.num_patch_successes += 1;
            }
        }

        self.number_of_calls += 1;
        self.statistics.num_calls += 1;

        if result == LiaMove::Undefined && self.is_due(self.options.find_cube_period) {
            if let Some(cube) = self.strategies.cube.as_deref_mut() {
                result = run_strategy(
                    cube,
                    &mut *relaxation,
                    &mut self.cut,
                    explanation,
                    &mut self.random_generator,
                    &mut self.statistics,
                );
                if result.is_definitive() {
                    self.statistics.num_cubes += 1;
                }
            }
        }

        if result == LiaMove::Undefined
            && self.options.enable_lattice_cuts
            && self.is_due(self.lattice_cut_period)
        {
            if let Some(lattice_cut) = self.strategies.lattice_cut.as_deref_mut() {
                self.statistics.num_lattice_cut_calls += 1;
                result = run_strategy(
                    lattice_cut,
                    &mut *relaxation,
                    &mut self.cut,
                    explanation,
                    &mut self.random_generator,
                    &mut self.statistics,
                );

                if result == LiaMove::Undefined {
                    self.lattice_cut_period = self.lattice_cut_period.saturating_mul(2);
                } else {
                    self.lattice_cut_period = self.options.lattice_cut_period;
                }
                if result == LiaMove::Cut {
                    lia_assert_simple!(
                        !explanation.is_empty(),
                        "a lattice cut requires the constraints it was derived from"
                    );
                    self.statistics.num_lattice_cuts += 1;
                }
                trace!("lattice cut period is now {}", self.lattice_cut_period);
            }
        }

        if result == LiaMove::Undefined && self.is_due(self.options.gomory_cut_period) {
            if let Some(gomory_cut) = self.strategies.gomory_cut.as_deref_mut() {
                result = run_strategy(
                    gomory_cut,
                    &mut *relaxation,
                    &mut self.cut,
                    explanation,
                    &mut self.random_generator,
                    &mut self.statistics,
                );
                if result == LiaMove::Cut {
                    self.statistics.num_gomory_cuts += 1;
                }
            }
        }

        if result == LiaMove::Undefined {
            result = run_strategy(
                self.strategies.branch.as_mut(),
                &mut *relaxation,
                &mut self.cut,
                explanation,
                &mut self.random_generator,
                &mut self.statistics,
            );
            lia_assert_simple!(
                result.is_definitive(),
                "branching must reach a definitive result"
            );
            if result == LiaMove::Branch {
                self.statistics.num_branches += 1;
            }
        }

        lia_assert_advanced!(
            result != LiaMove::Sat || !relaxation.has_inf_int(),
            "a check can only be satisfied if every integer column is integral"
        );
        debug!("check {} resulted in {result}", self.number_of_calls);
        result
    }

    /// The cut or branch produced by the last [`IntSolver::check`].
    pub fn cut(&self) -> &Cut {
        &self.cut
    }

    pub fn options(&self) -> &IntSolverOptions {
        &self.options
    }

    pub fn statistics(&self) -> &IntSolverStatistics {
        &self.statistics
    }

    /// The number of checks which went beyond the initial integrality test.
    pub fn number_of_calls(&self) -> u64 {
        self.number_of_calls
    }

    /// The current period of the lattice cuts.
    pub fn lattice_cut_period(&self) -> u64 {
        self.lattice_cut_period
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }

    /// Whether a strategy with the given period runs during the current check.
    fn is_due(&self, period: u64) -> bool {
        period != 0 && self.number_of_calls % period == 0
    }
}

/// Runs a single strategy on freshly cleared buffers.
///
/// A cut which the current assignment does not violate is a fault of the strategy; it is caught by
/// an assertion when those are enabled, and otherwise dropped so that the next strategy is tried.
fn run_strategy(
    strategy: &mut dyn IntegralityStrategy,
    relaxation: &mut dyn Relaxation,
    cut: &mut Cut,
    explanation: &mut Explanation,
    random: &mut dyn Random,
    statistics: &mut IntSolverStatistics,
) -> LiaMove {
    cut.clear();
    explanation.clear();

    let result = {
        let mut context = StrategyContext::new(relaxation, cut, explanation, random);
        strategy.attempt(&mut context)
    };
    debug!("{} resulted in {result}", strategy.name());

    if result == LiaMove::Cut {
        let is_violated = cut.is_violated_by(relaxation);
        lia_assert_moderate!(
            is_violated,
            "the cut {cut} of {} is not violated by the current assignment",
            strategy.name()
        );
        if !is_violated {
            warn!(
                "discarding the cut {cut} of {} since the current assignment satisfies it",
                strategy.name()
            );
            statistics.num_discarded_cuts += 1;
            cut.clear();
            explanation.clear();
            return LiaMove::Undefined;
        }
        debug!("cut: {cut}, explanation: {explanation}");
    }

    result
}
