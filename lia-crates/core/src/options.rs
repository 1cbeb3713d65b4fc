use crate::strategies::BranchColumnSelection;
#[cfg(doc)]
use crate::IntSolver;

/// Options for the [`IntSolver`] which determine which strategies run and how often.
///
/// A period of `0` disables the corresponding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntSolverOptions {
    /// Whether the GCD test is run at the start of every check.
    pub run_gcd_test: bool,
    /// Whether basic columns with a fixed value are pivoted out of the basis before patching.
    pub pivot_fixed_vars_from_basis: bool,
    /// The cube search runs on every check whose number is a multiple of this period.
    pub find_cube_period: u64,
    /// Whether lattice cuts are generated at all.
    pub enable_lattice_cuts: bool,
    /// The initial period of the lattice cuts; the period doubles every time the lattice cutter
    /// fails, and is reset to this value when it succeeds.
    pub lattice_cut_period: u64,
    /// Gomory cuts are generated on every check whose number is a multiple of this period.
    pub gomory_cut_period: u64,
    /// The seed of the random generator used for diversification and branching.
    pub random_seed: u64,
    /// How the default branching strategy selects its column.
    pub branch_column_selection: BranchColumnSelection,
}

impl Default for IntSolverOptions {
    fn default() -> Self {
        IntSolverOptions {
            run_gcd_test: true,
            pivot_fixed_vars_from_basis: false,
            find_cube_period: 4,
            enable_lattice_cuts: true,
            lattice_cut_period: 4,
            gomory_cut_period: 4,
            random_seed: 42,
            branch_column_selection: BranchColumnSelection::default(),
        }
    }
}
