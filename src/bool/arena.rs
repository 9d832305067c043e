//! Arena allocator for gate inputs
//!
//! Wraps `bumpalo::Bump` so that gate input slices share one allocation region
//! for the lifetime of a solve. All allocations are freed when the arena is
//! dropped.

use bumpalo::Bump;

/// Arena allocator for boolean gate storage
///
/// Every `BoolValue<'arena>` produced by a `BooleanFactory` borrows from the
/// arena the factory was created with, so circuits cannot outlive it.
pub struct GateArena {
    bump: Bump,
}

impl GateArena {
    /// Creates a new arena allocator
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Allocates a value in the arena and returns a reference to it
    pub fn alloc<T: Copy>(&self, value: T) -> &T {
        self.bump.alloc(value)
    }

    /// Copies a slice into the arena
    pub fn alloc_slice<T: Copy>(&self, values: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(values)
    }

    /// Bytes currently allocated by the arena
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for GateArena {
    fn default() -> Self {
        Self::new()
    }
}
