mod constraint_index;
mod cut;
mod explanation;
mod lia_move;
mod random;

pub use constraint_index::ConstraintIndex;
pub use cut::Cut;
pub use cut::LinearTerm;
pub use explanation::Explanation;
pub use lia_move::LiaMove;
pub use random::Random;
#[cfg(test)]
pub(crate) use random::tests;
