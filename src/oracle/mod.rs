mod parallel;
mod sequential;

pub use parallel::ParallelOracle;
pub use sequential::SequentialOracle;

use crate::assignment::{Assignment, Truth};
use crate::problem::{Clause, Literal};
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

/// The validity check the search controller prunes with. Implementations
/// never mutate the assignment or the problem, and every call is synchronous
/// from the caller's point of view no matter what runs behind it.
pub trait Oracle {
    /// Counts the clauses not yet falsified by `assignment`. The assignment
    /// is still viable iff the count equals the problem's clause count.
    fn evaluate(&self, assignment: &Assignment) -> Result<usize, OracleUnavailable>;

    /// Cumulative worker-side timing, for backends that have workers.
    fn worker_stats(&self) -> Option<WorkerStats> {
        None
    }
}

/// The backend cannot complete evaluations any more. Fatal to the run; the
/// caller must not retry or fall back to another backend.
#[derive(Debug)]
pub struct OracleUnavailable {
    reason: String,
}

impl OracleUnavailable {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Display for OracleUnavailable {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(&self.reason)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct WorkerStats {
    /// Total time workers spent scanning clauses.
    pub busy: Duration,
    /// Total time lost to shipping assignments and joining workers.
    pub overhead: Duration,
}

// An undecided slot can still swing either way, so a literal only stops
// supporting its clause once the variable is decided against it.
pub(crate) fn clause_satisfiable(clause: &Clause, values: &[Truth]) -> bool {
    clause.literals().any(|literal| match literal {
        Literal::Positive(v) => values[v.0] != Truth::False,
        Literal::Negative(v) => values[v.0] != Truth::True,
    })
}

pub(crate) fn satisfiable_in(clauses: &[Clause], values: &[Truth]) -> usize {
    clauses
        .iter()
        .filter(|clause| clause_satisfiable(clause, values))
        .count()
}
