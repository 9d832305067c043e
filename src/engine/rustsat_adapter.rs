//! Adapters for rustsat solver backends
//!
//! Provides adapters to use rustsat-compatible SAT solvers as the solving
//! backend.

use super::SATSolver;
use crate::{DungeonError, Result};
use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::{Assignment, Clause, Lit, TernaryVal, Var};
use std::fmt::Display;

/// Adapter that wraps rustsat solvers to implement our SATSolver trait
///
/// This allows any rustsat-compatible solver to be used as the backend.
///
/// # Example
///
/// ```ignore
/// use rustsat_batsat::BasicSolver;
/// let solver = RustSatAdapter::new(BasicSolver::default());
/// ```
pub struct RustSatAdapter<S> {
    solver: S,
    num_vars: u32,
    num_clauses: u32,
    /// Highest variable mentioned by a clause so far
    max_var: u32,
    /// Assignment from the last satisfiable `solve`, cleared by any change
    model: Option<Assignment>,
}

impl<S> RustSatAdapter<S> {
    /// Creates a new adapter wrapping the given solver
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            num_vars: 0,
            num_clauses: 0,
            max_var: 0,
            model: None,
        }
    }
}

fn backend(err: impl Display) -> DungeonError {
    DungeonError::Backend(err.to_string())
}

fn to_lit(lit: i32) -> Result<Lit> {
    if lit == 0 || lit.unsigned_abs() - 1 > Var::MAX_IDX {
        return Err(DungeonError::Backend(format!("literal {lit} out of range")));
    }
    let var = Var::new(lit.unsigned_abs() - 1);
    Ok(if lit > 0 { var.pos_lit() } else { var.neg_lit() })
}

impl<S: Solve> SATSolver for RustSatAdapter<S> {
    fn add_variables(&mut self, num_vars: u32) -> Result<()> {
        // RustSat creates variables as clauses mention them; only track the count
        self.num_vars += num_vars;
        Ok(())
    }

    fn add_clause(&mut self, lits: &[i32]) -> Result<()> {
        let clause: Clause = lits.iter().map(|&lit| to_lit(lit)).collect::<Result<_>>()?;

        for &lit in lits {
            self.max_var = self.max_var.max(lit.unsigned_abs());
        }
        self.model = None;
        self.num_clauses += 1;
        self.solver.add_clause(clause).map_err(backend)
    }

    fn solve(&mut self) -> Result<bool> {
        self.model = None;
        match self.solver.solve().map_err(backend)? {
            SolverResult::Sat => {
                if self.max_var > 0 {
                    let model = self
                        .solver
                        .solution(Var::new(self.max_var - 1))
                        .map_err(backend)?;
                    self.model = Some(model);
                }
                Ok(true)
            }
            SolverResult::Unsat => Ok(false),
            SolverResult::Interrupted => Err(DungeonError::Backend(
                "solver interrupted without a result".to_string(),
            )),
        }
    }

    fn value_of(&self, var: u32) -> bool {
        if var == 0 || var > self.max_var {
            return false;
        }
        self.model
            .as_ref()
            .is_some_and(|model| model.var_value(Var::new(var - 1)) == TernaryVal::True)
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.num_clauses
    }
}
