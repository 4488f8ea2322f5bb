use crate::assignment::{Assignment, Truth};
use crate::frontier::Frontier;
use crate::oracle::{Oracle, OracleUnavailable};
use crate::problem::Problem;
use crate::SatResult;
use log::trace;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Children are pushed false-first, so the stack hands the true child back
// first and the whole true subtree is explored before its false sibling.
// Either order is complete; this one is the fixed traversal policy.
const BRANCH_PUSH_ORDER: [Truth; 2] = [Truth::False, Truth::True];

/// Drives the depth-first search: pops a node, asks the oracle whether it can
/// still be completed, expands survivors. Strictly single-threaded; the only
/// parallelism lives inside an oracle call.
pub struct Solver<O> {
    problem: Arc<Problem>,
    oracle: O,
    frontier: Frontier,
    search_time: Duration,
}

impl<O: Oracle> Solver<O> {
    pub fn new(problem: Arc<Problem>, oracle: O) -> Self {
        Self {
            problem,
            oracle,
            frontier: Frontier::new(),
            search_time: Duration::from_nanos(0),
        }
    }

    pub fn solve(&mut self) -> Result<SatResult, OracleUnavailable> {
        let started = Instant::now();
        let result = self.search();
        self.search_time = started.elapsed();
        result
    }

    /// Wall-clock time spent inside the most recent `solve` call.
    pub fn search_time(&self) -> Duration {
        self.search_time
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    fn search(&mut self) -> Result<SatResult, OracleUnavailable> {
        let root = match Assignment::undecided(self.problem.num_variables()) {
            Ok(root) => root,
            Err(_) => return Ok(SatResult::OutOfMemory),
        };
        if self.frontier.push(root).is_err() {
            return Ok(SatResult::OutOfMemory);
        }

        while let Some(current) = self.frontier.pop() {
            match current.first_undecided() {
                None => {
                    // Complete assignment: the oracle has the final word.
                    if self.valid(&current)? {
                        trace!("solution at frontier size {}", self.frontier.len());
                        return Ok(SatResult::Satisfiable(current));
                    }
                }
                Some(index) => {
                    for &value in BRANCH_PUSH_ORDER.iter() {
                        let candidate = match current.child(index, value) {
                            Ok(candidate) => candidate,
                            Err(_) => return Ok(SatResult::OutOfMemory),
                        };
                        if self.valid(&candidate)? {
                            if self.frontier.push(candidate).is_err() {
                                return Ok(SatResult::OutOfMemory);
                            }
                        } else {
                            trace!("pruned {:?} at depth {}", value, index);
                        }
                    }
                }
            }
            // current is dropped here; each child owns its own copy
        }

        Ok(SatResult::Unsatisfiable)
    }

    // A partial assignment is still viable iff no clause is falsified yet,
    // i.e. every one of the K clauses still counts as satisfiable.
    fn valid(&self, assignment: &Assignment) -> Result<bool, OracleUnavailable> {
        let satisfiable = self.oracle.evaluate(assignment)?;
        Ok(satisfiable == self.problem.num_clauses())
    }
}
