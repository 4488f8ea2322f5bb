use crate::assignment::Assignment;
use crate::oracle::{satisfiable_in, Oracle, OracleUnavailable};
use crate::problem::Problem;
use std::sync::Arc;

/// Scans every clause on the calling thread.
pub struct SequentialOracle {
    problem: Arc<Problem>,
}

impl SequentialOracle {
    pub fn new(problem: Arc<Problem>) -> Self {
        Self { problem }
    }
}

impl Oracle for SequentialOracle {
    fn evaluate(&self, assignment: &Assignment) -> Result<usize, OracleUnavailable> {
        Ok(satisfiable_in(self.problem.clauses(), assignment.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Truth;
    use crate::problem::{n, p, Clause};

    fn example() -> Arc<Problem> {
        let clauses = vec![Clause::new(vec![p(0), p(1)]), Clause::new(vec![n(0), n(1)])];
        Arc::new(Problem::new(2, 2, clauses).unwrap())
    }

    #[test]
    fn counts_match_hand_computation() {
        let problem = example();
        let oracle = SequentialOracle::new(Arc::clone(&problem));

        let root = Assignment::undecided(2).unwrap();
        assert_eq!(oracle.evaluate(&root).unwrap(), 2);

        let both_true = Assignment::from_values(vec![Truth::True, Truth::True]);
        assert_eq!(oracle.evaluate(&both_true).unwrap(), 1);

        let mixed = Assignment::from_values(vec![Truth::True, Truth::False]);
        assert_eq!(oracle.evaluate(&mixed).unwrap(), 2);
    }

    #[test]
    fn evaluating_a_copy_matches_and_leaves_the_source_alone() {
        let problem = example();
        let oracle = SequentialOracle::new(Arc::clone(&problem));

        let original = Assignment::from_values(vec![Truth::True, Truth::Undecided]);
        let snapshot = original.clone();
        let copy = original.clone();

        assert_eq!(
            oracle.evaluate(&original).unwrap(),
            oracle.evaluate(&copy).unwrap()
        );
        assert_eq!(original, snapshot);
    }
}
