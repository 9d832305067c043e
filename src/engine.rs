//! SAT solver trait and implementations

pub mod rustsat_adapter;

pub use rustsat_adapter::RustSatAdapter;

use crate::{DungeonError, Result};

/// Core SAT solver trait
///
/// This trait defines the interface that all SAT solver backends must implement.
/// Variables are 1-indexed, and literals are represented as signed integers
/// (positive for true, negative for false). Backends must accept new clauses
/// after a `solve` call; enumeration depends on it.
pub trait SATSolver {
    /// Adds the given number of variables to the solver
    fn add_variables(&mut self, num_vars: u32) -> Result<()>;

    /// Adds a clause to the solver
    ///
    /// # Arguments
    /// * `lits` - Slice of literals (1-indexed, negated by sign)
    fn add_clause(&mut self, lits: &[i32]) -> Result<()>;

    /// Solves the current formula
    ///
    /// Returns `Ok(true)` if satisfiable, `Ok(false)` if unsatisfiable, and an
    /// error if the backend failed or gave up.
    fn solve(&mut self) -> Result<bool>;

    /// Returns the assignment of a variable in the solution
    ///
    /// Only valid after solve() returns true.
    /// Variables are 1-indexed.
    fn value_of(&self, var: u32) -> bool;

    /// Returns the number of variables in the solver
    fn num_variables(&self) -> u32;

    /// Returns the number of clauses added
    fn num_clauses(&self) -> u32;
}

/// A mock SAT solver for testing
///
/// This solver doesn't actually solve anything - it records variables and
/// clauses and answers with a scripted sequence of results. Useful for
/// testing the pipeline around the backend.
pub struct MockSolver {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
    results: Vec<Result<bool>>,
    solution: Vec<bool>,
}

impl MockSolver {
    /// Creates a mock solver answering UNSAT to every query
    pub fn new() -> Self {
        Self {
            num_vars: 0,
            clauses: Vec::new(),
            results: Vec::new(),
            solution: Vec::new(),
        }
    }

    /// Creates a mock solver whose `solve` calls fail with a backend error
    pub fn failing(message: &str) -> Self {
        let mut solver = Self::new();
        solver.results = vec![Err(DungeonError::Backend(message.to_string()))];
        solver
    }

    /// Creates a mock solver that answers `results` in order, then UNSAT
    pub fn scripted(results: Vec<bool>) -> Self {
        let mut solver = Self::new();
        solver.results = results.into_iter().rev().map(Ok).collect();
        solver
    }

    /// Clauses received so far
    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }
}

impl Default for MockSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SATSolver for MockSolver {
    fn add_variables(&mut self, num_vars: u32) -> Result<()> {
        self.num_vars += num_vars;
        self.solution.resize(self.num_vars as usize, false);
        Ok(())
    }

    fn add_clause(&mut self, lits: &[i32]) -> Result<()> {
        self.clauses.push(lits.to_vec());
        Ok(())
    }

    fn solve(&mut self) -> Result<bool> {
        match self.results.pop() {
            Some(Err(DungeonError::Backend(message))) => {
                // failures are sticky
                self.results.push(Err(DungeonError::Backend(message.clone())));
                Err(DungeonError::Backend(message))
            }
            Some(result) => result,
            None => Ok(false),
        }
    }

    fn value_of(&self, var: u32) -> bool {
        if var == 0 || var > self.num_vars {
            false
        } else {
            self.solution[(var - 1) as usize]
        }
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.clauses.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_solver_basic() {
        let mut solver = MockSolver::scripted(vec![true]);

        solver.add_variables(3).unwrap();
        assert_eq!(solver.num_variables(), 3);

        solver.add_clause(&[1, 2]).unwrap();
        solver.add_clause(&[-1, 3]).unwrap();
        assert_eq!(solver.num_clauses(), 2);
        assert_eq!(solver.clauses()[1], vec![-1, 3]);

        assert!(solver.solve().unwrap());
        assert!(!solver.solve().unwrap());
    }

    #[test]
    fn mock_solver_value() {
        let mut solver = MockSolver::new();
        solver.add_variables(2).unwrap();

        // Default values are false
        assert!(!solver.value_of(1));
        assert!(!solver.value_of(2));

        // Out of bounds returns false
        assert!(!solver.value_of(0));
        assert!(!solver.value_of(3));
    }

    #[test]
    fn mock_solver_failure_is_sticky() {
        let mut solver = MockSolver::failing("disk on fire");
        assert!(matches!(solver.solve(), Err(DungeonError::Backend(_))));
        assert!(matches!(solver.solve(), Err(DungeonError::Backend(_))));
    }
}
