//! Boolean circuit representation
//!
//! The boolean layer is the intermediate representation between the puzzle
//! rules and the CNF handed to the SAT backend.
//!
//! Key types:
//! - `BooleanConstant`: TRUE (label 0) or FALSE (label -1)
//! - `BooleanVariable`: Variables with positive integer labels
//! - `BooleanFormula`: Boolean gates (AND, OR, NOT, ITE) living in a `GateArena`
//! - `BoolValue<'arena>`: Enum encompassing all boolean value types
//! - `BooleanFactory`: Factory for creating and caching boolean circuits
//! - `UnaryCount`: Cardinality circuit ("how many of these are true")

mod factory;
pub mod arena;
pub mod count;
pub mod var_allocator;

pub use arena::GateArena;
pub use count::UnaryCount;
pub use factory::{BooleanFactory, Options};
pub use var_allocator::VariableAllocator;

use std::hash::{Hash, Hasher};

/// Boolean constant (TRUE or FALSE)
///
/// Constants have special labels:
/// - TRUE has label 0
/// - FALSE has label -1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanConstant {
    /// TRUE constant (label 0)
    TRUE,
    /// FALSE constant (label -1)
    FALSE,
}

impl BooleanConstant {
    /// Returns the label for this constant
    pub fn label(&self) -> i32 {
        match self {
            BooleanConstant::TRUE => 0,
            BooleanConstant::FALSE => -1,
        }
    }

    /// Returns the boolean value of this constant
    pub fn boolean_value(&self) -> bool {
        *self == BooleanConstant::TRUE
    }
}

/// Boolean variable with a positive integer label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BooleanVariable {
    label: i32,
}

impl BooleanVariable {
    /// Creates a new boolean variable with the given label.
    ///
    /// # Panics
    /// Panics if label is not positive (must be > 0).
    pub fn new(label: i32) -> Self {
        assert!(label > 0, "Variable labels must be positive");
        Self { label }
    }

    /// Returns the label for this variable
    pub fn label(&self) -> i32 {
        self.label
    }
}

/// Boolean formula (gate)
///
/// Formulas have identity-based equality using their unique labels; the
/// factory never hands out two gates with the same label.
#[derive(Debug, Clone, Copy)]
pub struct BooleanFormula<'arena> {
    label: i32,
    kind: FormulaKind<'arena>,
}

impl<'arena> BooleanFormula<'arena> {
    pub(crate) fn new(label: i32, kind: FormulaKind<'arena>) -> Self {
        Self { label, kind }
    }

    /// Returns the label for this formula
    pub fn label(&self) -> i32 {
        self.label
    }

    /// Returns the kind of this formula
    pub fn kind(&self) -> &FormulaKind<'arena> {
        &self.kind
    }
}

impl PartialEq for BooleanFormula<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for BooleanFormula<'_> {}

impl Hash for BooleanFormula<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

/// Formula kind (gate type). Inputs live in the arena that owns the circuit.
#[derive(Debug, Clone, Copy)]
pub enum FormulaKind<'arena> {
    /// Multi-input AND gate
    And(&'arena [BoolValue<'arena>]),
    /// Multi-input OR gate
    Or(&'arena [BoolValue<'arena>]),
    /// NOT gate
    Not(&'arena BoolValue<'arena>),
    /// If-then-else gate
    Ite {
        /// Condition
        condition: &'arena BoolValue<'arena>,
        /// Then branch
        then_val: &'arena BoolValue<'arena>,
        /// Else branch
        else_val: &'arena BoolValue<'arena>,
    },
}

/// Unified boolean value type
///
/// Encompasses constants, variables, and formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolValue<'arena> {
    /// Constant (TRUE or FALSE)
    Constant(BooleanConstant),
    /// Variable
    Variable(BooleanVariable),
    /// Formula (gate)
    Formula(BooleanFormula<'arena>),
}

impl<'arena> BoolValue<'arena> {
    /// The TRUE constant
    pub const TRUE: BoolValue<'static> = BoolValue::Constant(BooleanConstant::TRUE);
    /// The FALSE constant
    pub const FALSE: BoolValue<'static> = BoolValue::Constant(BooleanConstant::FALSE);

    /// Returns the label for this value
    pub fn label(&self) -> i32 {
        match self {
            BoolValue::Constant(c) => c.label(),
            BoolValue::Variable(v) => v.label(),
            BoolValue::Formula(f) => f.label(),
        }
    }

    /// Returns true if this is a constant
    pub fn is_constant(&self) -> bool {
        matches!(self, BoolValue::Constant(_))
    }

    /// Returns true if this is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, BoolValue::Variable(_))
    }

    /// Returns true if this is a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, BoolValue::Formula(_))
    }

    /// Returns true if this is the TRUE constant
    pub fn is_true(&self) -> bool {
        matches!(self, BoolValue::Constant(BooleanConstant::TRUE))
    }

    /// Returns true if this is the FALSE constant
    pub fn is_false(&self) -> bool {
        matches!(self, BoolValue::Constant(BooleanConstant::FALSE))
    }

    /// Evaluates the circuit under an assignment of its variables
    pub fn evaluate(&self, assignment: &impl Fn(i32) -> bool) -> bool {
        match self {
            BoolValue::Constant(c) => c.boolean_value(),
            BoolValue::Variable(v) => assignment(v.label()),
            BoolValue::Formula(f) => match f.kind() {
                FormulaKind::And(inputs) => inputs.iter().all(|v| v.evaluate(assignment)),
                FormulaKind::Or(inputs) => inputs.iter().any(|v| v.evaluate(assignment)),
                FormulaKind::Not(input) => !input.evaluate(assignment),
                FormulaKind::Ite { condition, then_val, else_val } => {
                    if condition.evaluate(assignment) {
                        then_val.evaluate(assignment)
                    } else {
                        else_val.evaluate(assignment)
                    }
                }
            },
        }
    }
}

impl From<BooleanConstant> for BoolValue<'_> {
    fn from(c: BooleanConstant) -> Self {
        BoolValue::Constant(c)
    }
}

impl From<BooleanVariable> for BoolValue<'_> {
    fn from(v: BooleanVariable) -> Self {
        BoolValue::Variable(v)
    }
}

impl<'arena> From<BooleanFormula<'arena>> for BoolValue<'arena> {
    fn from(f: BooleanFormula<'arena>) -> Self {
        BoolValue::Formula(f)
    }
}
