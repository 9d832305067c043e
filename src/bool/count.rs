//! Cardinality circuits
//!
//! A `UnaryCount` is the unary (thermometer) encoding of how many of a
//! sequence of boolean values are true: bit `k` is true iff at least `k + 1`
//! inputs are true. Built as a sequential counter out of factory gates, so
//! constant inputs fold away and shared prefixes are cached.

use crate::bool::{BoolValue, BooleanFactory};

/// Number of true values among a sequence, as a unary bit-vector
#[derive(Clone, Debug)]
pub struct UnaryCount<'arena> {
    at_least: Vec<BoolValue<'arena>>,
}

impl<'arena> UnaryCount<'arena> {
    /// Builds the counter for `inputs`
    ///
    /// After processing input `x`, "at least k" becomes
    /// `at_least[k] OR (at_least[k - 1] AND x)`.
    pub fn of(inputs: &[BoolValue<'arena>], factory: &BooleanFactory<'arena>) -> Self {
        let mut at_least: Vec<BoolValue<'arena>> = Vec::with_capacity(inputs.len());

        for &input in inputs {
            let mut next = Vec::with_capacity(at_least.len() + 1);
            for k in 0..=at_least.len() {
                let previous = if k == 0 { factory.constant(true) } else { at_least[k - 1] };
                let carried = factory.and(previous, input);
                let kept = at_least.get(k).copied().unwrap_or(factory.constant(false));
                next.push(factory.or(kept, carried));
            }
            at_least = next;
        }

        Self { at_least }
    }

    /// Number of inputs the counter was built over
    pub fn width(&self) -> usize {
        self.at_least.len()
    }

    /// Circuit for "at least `n` inputs are true"
    pub fn at_least(&self, n: usize, factory: &BooleanFactory<'arena>) -> BoolValue<'arena> {
        match n {
            0 => factory.constant(true),
            n => self.at_least.get(n - 1).copied().unwrap_or(factory.constant(false)),
        }
    }

    /// Circuit for "exactly `n` inputs are true"
    pub fn eq(&self, n: usize, factory: &BooleanFactory<'arena>) -> BoolValue<'arena> {
        if n > self.width() {
            return factory.constant(false);
        }
        let reached = self.at_least(n, factory);
        let exceeded = self.at_least(n + 1, factory);
        factory.and(reached, factory.not(exceeded))
    }

    /// Returns the count if every input was a constant
    pub fn value(&self) -> Option<usize> {
        if !self.at_least.iter().all(|b| b.is_constant()) {
            return None;
        }
        Some(self.at_least.iter().filter(|b| b.is_true()).count())
    }
}
