pub mod assignment;
pub mod frontier;
pub mod oracle;
pub mod problem;
pub mod solver;

#[cfg(test)]
mod brute_force;

/// Terminal outcome of a run: a solution, a proof of unsatisfiability, or a
/// search aborted because its tree outgrew memory. The last two must never be
/// confused, so exhaustion is an outcome rather than an error.
#[derive(PartialEq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
    OutOfMemory,
}

pub use assignment::{Assignment, Truth};
pub use frontier::Frontier;
pub use oracle::{Oracle, OracleUnavailable, ParallelOracle, SequentialOracle, WorkerStats};
pub use problem::{Clause, Literal, Problem, Variable};
pub use solver::Solver;
