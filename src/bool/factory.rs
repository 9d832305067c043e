//! Boolean factory with gate caching
//!
//! The factory creates boolean values and formulas, with automatic deduplication.
//! Uses interior mutability (Cell/RefCell) to avoid &mut self everywhere.

use super::{BoolValue, BooleanConstant, BooleanFormula, BooleanVariable, FormulaKind, GateArena};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};

/// Options for boolean factory
#[derive(Debug, Clone)]
pub struct Options {
    /// Enable sharing of boolean formulas (default: true)
    pub sharing: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { sharing: true }
    }
}

/// Boolean circuit factory with caching
///
/// Creates boolean values and formulas, with automatic deduplication of gates.
/// Gate labels start right after the primary variables, so every label the
/// factory hands out can double as a SAT variable.
pub struct BooleanFactory<'arena> {
    num_variables: u32,
    next_label: Cell<i32>,
    options: Options,
    // Key: (kind, input labels) -> cached formula
    cache: RefCell<FxHashMap<CacheKey, BooleanFormula<'arena>>>,
    arena: &'arena GateArena,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    And(Vec<i32>),
    Or(Vec<i32>),
    Not(i32),
    Ite(i32, i32, i32),
}

impl<'arena> BooleanFactory<'arena> {
    /// Creates a new boolean factory
    ///
    /// # Arguments
    /// * `arena` - Arena that will hold gate inputs
    /// * `num_variables` - Number of primary variables (labels `1..=num_variables`)
    /// * `options` - Factory options
    pub fn new(arena: &'arena GateArena, num_variables: u32, options: Options) -> Self {
        Self {
            num_variables,
            next_label: Cell::new(num_variables as i32 + 1),
            options,
            cache: RefCell::new(FxHashMap::default()),
            arena,
        }
    }

    /// Returns the number of primary variables
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Returns the highest label handed out so far (variables and gates)
    pub fn max_label(&self) -> u32 {
        (self.next_label.get() - 1) as u32
    }

    /// Returns the number of gates created so far
    pub fn num_gates(&self) -> u32 {
        self.max_label() - self.num_variables
    }

    /// Creates a boolean variable
    pub fn variable(&self, label: i32) -> BoolValue<'arena> {
        assert!(
            label > 0 && label <= self.num_variables as i32,
            "Variable label must be in range 1..={}",
            self.num_variables
        );
        BoolValue::Variable(BooleanVariable::new(label))
    }

    /// Creates a constant
    pub fn constant(&self, value: bool) -> BoolValue<'arena> {
        BoolValue::Constant(if value {
            BooleanConstant::TRUE
        } else {
            BooleanConstant::FALSE
        })
    }

    /// Creates an AND gate
    pub fn and(&self, left: BoolValue<'arena>, right: BoolValue<'arena>) -> BoolValue<'arena> {
        self.and_multi(vec![left, right])
    }

    /// Creates a multi-input AND gate
    pub fn and_multi(&self, mut inputs: Vec<BoolValue<'arena>>) -> BoolValue<'arena> {
        if inputs.iter().any(|v| v.is_false()) {
            return self.constant(false);
        }
        inputs.retain(|v| !v.is_true());

        match inputs.as_slice() {
            [] => self.constant(true),
            [single] => *single,
            _ => self.gate(CacheKey::And(labels(&inputs)), || {
                FormulaKind::And(self.arena.alloc_slice(&inputs))
            }),
        }
    }

    /// Creates an OR gate
    pub fn or(&self, left: BoolValue<'arena>, right: BoolValue<'arena>) -> BoolValue<'arena> {
        self.or_multi(vec![left, right])
    }

    /// Creates a multi-input OR gate
    pub fn or_multi(&self, mut inputs: Vec<BoolValue<'arena>>) -> BoolValue<'arena> {
        if inputs.iter().any(|v| v.is_true()) {
            return self.constant(true);
        }
        inputs.retain(|v| !v.is_false());

        match inputs.as_slice() {
            [] => self.constant(false),
            [single] => *single,
            _ => self.gate(CacheKey::Or(labels(&inputs)), || {
                FormulaKind::Or(self.arena.alloc_slice(&inputs))
            }),
        }
    }

    /// Creates a NOT gate
    pub fn not(&self, input: BoolValue<'arena>) -> BoolValue<'arena> {
        match input {
            BoolValue::Constant(c) => self.constant(!c.boolean_value()),
            BoolValue::Formula(f) => match f.kind() {
                FormulaKind::Not(inner) => **inner,
                _ => self.gate(CacheKey::Not(f.label()), || {
                    FormulaKind::Not(self.arena.alloc(input))
                }),
            },
            BoolValue::Variable(_) => self.gate(CacheKey::Not(input.label()), || {
                FormulaKind::Not(self.arena.alloc(input))
            }),
        }
    }

    /// Creates an if-then-else gate
    pub fn ite(
        &self,
        condition: BoolValue<'arena>,
        then_val: BoolValue<'arena>,
        else_val: BoolValue<'arena>,
    ) -> BoolValue<'arena> {
        if let BoolValue::Constant(c) = condition {
            return if c.boolean_value() { then_val } else { else_val };
        }
        if then_val == else_val {
            return then_val;
        }

        // Constant branches reduce to plain AND/OR so no gate input is ever a constant
        match (then_val, else_val) {
            (BoolValue::Constant(t), _) if t.boolean_value() => self.or(condition, else_val),
            (BoolValue::Constant(_), _) => self.and(self.not(condition), else_val),
            (_, BoolValue::Constant(e)) if e.boolean_value() => self.or(self.not(condition), then_val),
            (_, BoolValue::Constant(_)) => self.and(condition, then_val),
            _ => self.gate(
                CacheKey::Ite(condition.label(), then_val.label(), else_val.label()),
                || FormulaKind::Ite {
                    condition: self.arena.alloc(condition),
                    then_val: self.arena.alloc(then_val),
                    else_val: self.arena.alloc(else_val),
                },
            ),
        }
    }

    /// IFF (if and only if): a IFF b = (a AND b) OR (NOT a AND NOT b)
    pub fn iff(&self, a: BoolValue<'arena>, b: BoolValue<'arena>) -> BoolValue<'arena> {
        let a_and_b = self.and(a, b);
        let not_a_and_not_b = self.and(self.not(a), self.not(b));
        self.or(a_and_b, not_a_and_not_b)
    }

    /// IMPLIES: a IMPLIES b = NOT a OR b
    pub fn implies(&self, a: BoolValue<'arena>, b: BoolValue<'arena>) -> BoolValue<'arena> {
        self.or(self.not(a), b)
    }

    /// Looks up a cached gate or builds a fresh one
    fn gate(&self, key: CacheKey, kind: impl FnOnce() -> FormulaKind<'arena>) -> BoolValue<'arena> {
        if self.options.sharing {
            if let Some(cached) = self.cache.borrow().get(&key) {
                return BoolValue::Formula(*cached);
            }
        }

        let formula = BooleanFormula::new(self.allocate_label(), kind());
        if self.options.sharing {
            self.cache.borrow_mut().insert(key, formula);
        }
        BoolValue::Formula(formula)
    }

    fn allocate_label(&self) -> i32 {
        let label = self.next_label.get();
        self.next_label.set(label + 1);
        label
    }
}

fn labels(inputs: &[BoolValue<'_>]) -> Vec<i32> {
    inputs.iter().map(|v| v.label()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_creates_variables() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 10, Options::default());
        assert_eq!(factory.num_variables(), 10);
        assert_eq!(factory.max_label(), 10);
        assert_eq!(factory.num_gates(), 0);
    }

    #[test]
    #[should_panic(expected = "Variable label must be in range")]
    fn variable_out_of_range() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 2, Options::default());
        factory.variable(3);
    }

    #[test]
    fn gate_deduplication() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 5, Options::default());
        let v1 = factory.variable(1);
        let v2 = factory.variable(2);

        let and1 = factory.and(v1, v2);
        let and2 = factory.and(v1, v2);

        assert_eq!(and1.label(), and2.label());
        assert_eq!(factory.num_gates(), 1);
    }

    #[test]
    fn sharing_disabled() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 5, Options { sharing: false });
        let v1 = factory.variable(1);
        let v2 = factory.variable(2);

        let and1 = factory.and(v1, v2);
        let and2 = factory.and(v1, v2);

        assert_ne!(and1.label(), and2.label());
    }

    #[test]
    fn and_simplification() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 5, Options::default());

        let result = factory.and(factory.constant(true), factory.constant(false));
        assert!(result.is_false());

        let v1 = factory.variable(1);
        let result = factory.and(factory.constant(true), v1);
        assert_eq!(result.label(), 1);

        assert!(factory.and_multi(Vec::new()).is_true());
    }

    #[test]
    fn or_simplification() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 5, Options::default());

        let result = factory.or(factory.constant(true), factory.constant(false));
        assert!(result.is_true());

        let v1 = factory.variable(1);
        let result = factory.or(factory.constant(false), v1);
        assert_eq!(result.label(), 1);

        assert!(factory.or_multi(Vec::new()).is_false());
    }

    #[test]
    fn not_simplification() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 5, Options::default());

        assert!(factory.not(factory.constant(true)).is_false());
        assert!(factory.not(factory.constant(false)).is_true());

        let v1 = factory.variable(1);
        let not_v1 = factory.not(v1);
        assert!(not_v1.is_formula());
        assert_eq!(factory.not(not_v1), v1);
    }

    #[test]
    fn ite_simplification() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 5, Options::default());
        let v1 = factory.variable(1);
        let v2 = factory.variable(2);

        assert_eq!(factory.ite(factory.constant(true), v1, v2).label(), 1);
        assert_eq!(factory.ite(factory.constant(false), v1, v2).label(), 2);
        assert_eq!(factory.ite(v1, v2, v2).label(), 2);

        // ite(c, TRUE, e) = c OR e
        let ite = factory.ite(v1, factory.constant(true), v2);
        assert_eq!(ite, factory.or(v1, v2));

        // ite(c, t, FALSE) = c AND t
        let ite = factory.ite(v1, v2, factory.constant(false));
        assert_eq!(ite, factory.and(v1, v2));
    }

    #[test]
    fn gate_inputs_are_never_constants() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 3, Options::default());
        let v1 = factory.variable(1);
        let v2 = factory.variable(2);

        let gate = factory.and_multi(vec![v1, factory.constant(true), v2]);
        match gate {
            BoolValue::Formula(f) => match f.kind() {
                FormulaKind::And(inputs) => assert!(inputs.iter().all(|v| !v.is_constant())),
                other => panic!("expected AND gate, got {:?}", other),
            },
            other => panic!("expected formula, got {:?}", other),
        }
    }

    #[test]
    fn iff_simplification() {
        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, 2, Options::default());
        let v1 = factory.variable(1);
        let v2 = factory.variable(2);

        assert_eq!(factory.iff(v1, factory.constant(true)), v1);
        assert_eq!(factory.iff(v1, factory.constant(false)), factory.not(v1));

        let both = factory.iff(v1, v2);
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let value = both.evaluate(&|label: i32| if label == 1 { a } else { b });
            assert_eq!(value, a == b);
        }
    }
}
