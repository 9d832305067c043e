//! Boolean circuit to CNF translation
//!
//! Converts boolean gates to CNF clauses using Tseitin transformation. The
//! translator is incremental: a gate defined by an earlier assertion is not
//! defined again, so a session can keep asserting constraints (blocking
//! clauses, for instance) against the same solver.

use crate::bool::{BoolValue, BooleanFormula, FormulaKind};
use rustc_hash::FxHashSet;

/// CNF representation
#[derive(Debug, Clone, Default)]
pub struct CNF {
    /// Highest variable mentioned by any clause
    pub num_variables: u32,
    /// CNF clauses (each clause is a vec of literals, negative = negated)
    pub clauses: Vec<Vec<i32>>,
}

impl CNF {
    /// Creates a new empty CNF
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause to the CNF
    pub fn add_clause(&mut self, clause: Vec<i32>) {
        for &lit in &clause {
            self.num_variables = self.num_variables.max(lit.unsigned_abs());
        }
        self.clauses.push(clause);
    }

    /// Number of clauses
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// True if some clause is empty (the CNF is trivially unsatisfiable)
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Vec::is_empty)
    }
}

/// Translates boolean circuits to CNF
#[derive(Debug, Default)]
pub struct CNFTranslator {
    /// Gates whose defining clauses have already been emitted (by label)
    defined: FxHashSet<i32>,
}

impl CNFTranslator {
    /// Creates a new CNF translator
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates an assertion `value == TRUE` into clauses
    ///
    /// Top-level conjunctions are split into separate assertions and
    /// top-level disjunctions become a single clause, so the common shapes
    /// need no auxiliary variable. Returns only the clauses not emitted by
    /// earlier calls.
    pub fn assert(&mut self, value: &BoolValue<'_>) -> CNF {
        let mut cnf = CNF::new();
        self.assert_into(value, &mut cnf);
        cnf
    }

    fn assert_into(&mut self, value: &BoolValue<'_>, cnf: &mut CNF) {
        match value {
            BoolValue::Constant(c) => {
                // FALSE: add empty clause to make the formula UNSAT
                if !c.boolean_value() {
                    cnf.add_clause(Vec::new());
                }
            }
            BoolValue::Variable(v) => cnf.add_clause(vec![v.label()]),
            BoolValue::Formula(f) => match f.kind() {
                FormulaKind::And(inputs) => {
                    for input in inputs.iter() {
                        self.assert_into(input, cnf);
                    }
                }
                FormulaKind::Or(inputs) => {
                    let clause = inputs.iter().map(|v| self.literal(v, cnf)).collect();
                    cnf.add_clause(clause);
                }
                _ => {
                    let lit = self.literal(value, cnf);
                    cnf.add_clause(vec![lit]);
                }
            },
        }
    }

    /// Returns the literal standing for `value`, defining its gates first
    fn literal(&mut self, value: &BoolValue<'_>, cnf: &mut CNF) -> i32 {
        match value {
            BoolValue::Constant(c) => c.label(),
            BoolValue::Variable(v) => v.label(),
            BoolValue::Formula(f) => match f.kind() {
                // NOT needs no clauses: its literal is the negated input
                FormulaKind::Not(input) => -self.literal(input, cnf),
                _ => self.define(f, cnf),
            },
        }
    }

    fn define(&mut self, formula: &BooleanFormula<'_>, cnf: &mut CNF) -> i32 {
        let output = formula.label();
        if !self.defined.insert(output) {
            return output;
        }

        match formula.kind() {
            FormulaKind::And(inputs) => self.translate_and(output, inputs, cnf),
            FormulaKind::Or(inputs) => self.translate_or(output, inputs, cnf),
            FormulaKind::Not(input) => {
                let input = self.literal(input, cnf);
                cnf.add_clause(vec![input, output]);
                cnf.add_clause(vec![-input, -output]);
            }
            FormulaKind::Ite { condition, then_val, else_val } => {
                self.translate_ite(output, condition, then_val, else_val, cnf)
            }
        }

        output
    }

    /// Translates AND gate: output = a1 ∧ a2 ∧ ... ∧ an
    ///
    /// CNF encoding:
    /// - (¬a1 ∨ ¬a2 ∨ ... ∨ ¬an ∨ output) - if all inputs true, output true
    /// - (ai ∨ ¬output) - if output true, each input must be true
    fn translate_and(&mut self, output: i32, inputs: &[BoolValue<'_>], cnf: &mut CNF) {
        let input_labels: Vec<i32> = inputs.iter().map(|v| self.literal(v, cnf)).collect();

        let mut clause: Vec<i32> = input_labels.iter().map(|&l| -l).collect();
        clause.push(output);
        cnf.add_clause(clause);

        for &input in &input_labels {
            cnf.add_clause(vec![input, -output]);
        }
    }

    /// Translates OR gate: output = a1 ∨ a2 ∨ ... ∨ an
    ///
    /// CNF encoding:
    /// - (a1 ∨ a2 ∨ ... ∨ an ∨ ¬output) - if output true, some input is true
    /// - (¬ai ∨ output) - if any input is true, output is true
    fn translate_or(&mut self, output: i32, inputs: &[BoolValue<'_>], cnf: &mut CNF) {
        let input_labels: Vec<i32> = inputs.iter().map(|v| self.literal(v, cnf)).collect();

        let mut clause = input_labels.clone();
        clause.push(-output);
        cnf.add_clause(clause);

        for &input in &input_labels {
            cnf.add_clause(vec![-input, output]);
        }
    }

    /// Translates ITE gate: output = if cond then then_val else else_val
    fn translate_ite(
        &mut self,
        output: i32,
        condition: &BoolValue<'_>,
        then_val: &BoolValue<'_>,
        else_val: &BoolValue<'_>,
        cnf: &mut CNF,
    ) {
        let cond = self.literal(condition, cnf);
        let then_label = self.literal(then_val, cnf);
        let else_label = self.literal(else_val, cnf);

        // cond → (then ↔ output)
        cnf.add_clause(vec![-cond, -then_label, output]);
        cnf.add_clause(vec![-cond, then_label, -output]);
        // ¬cond → (else ↔ output)
        cnf.add_clause(vec![cond, -else_label, output]);
        cnf.add_clause(vec![cond, else_label, -output]);
    }
}
