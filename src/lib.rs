//! # dungeon-sat
//!
//! A SAT-based solver for Dungeons & Diagrams puzzles.
//!
//! A puzzle is a grid with a wall count along every column and row, some
//! monsters (each sitting in a dead end) and some treasure chests (each
//! sitting in a walled 3x3 room). The solver compiles these rules into
//! boolean circuits, translates them to CNF, and enumerates every layout
//! through a SAT backend, blocking each layout once it is found.
//!
//! ## Example
//!
//! ```rust
//! use dungeon_sat::puzzle::Dungeon;
//! use dungeon_sat::solver::{Options, Report, Solver};
//!
//! // A 2x2 grid with one wall in every row and column
//! let dungeon = Dungeon::new(vec![1, 1], vec![1, 1], [], []).unwrap();
//!
//! let solver = Solver::new(Options::default());
//! let enumeration = solver.solve(&dungeon).unwrap();
//!
//! // Walls on either diagonal
//! assert_eq!(enumeration.report(), Report::Many(2));
//! ```

#![warn(missing_docs)]
#![warn(rust_2024_compatibility)]

/// Boolean circuit representation for translation
pub mod bool;

/// Boolean circuit to CNF translation
pub mod cnf;

/// SAT solver backends
pub mod engine;

/// Puzzle instances
pub mod puzzle;

/// Puzzle to boolean circuit translator
pub mod translator;

/// Main solver API
pub mod solver;

/// Text rendering of layouts
pub mod render;

/// Error types
pub mod error {
    //! Error types for dungeon-sat

    use crate::puzzle::{Axis, Occupant};
    use thiserror::Error;

    /// Errors that can occur while reading or solving a puzzle
    ///
    /// An impossible puzzle is not an error; it is reported as
    /// [`Report::Impossible`](crate::solver::Report::Impossible).
    #[derive(Error, Debug)]
    pub enum DungeonError {
        /// Number of hints does not match the grid size
        #[error("expected {expected} {axis} hints, found {found}")]
        HintLength {
            /// Which hints disagree
            axis: Axis,
            /// Grid size along that axis
            expected: usize,
            /// Number of hints given
            found: usize,
        },

        /// Grid without tiles
        #[error("grid must have at least one tile, got {width}x{height}")]
        EmptyGrid {
            /// Declared width
            width: usize,
            /// Declared height
            height: usize,
        },

        /// Monster or treasure placed off the grid
        #[error("{kind} at ({x}, {y}) lies outside the {width}x{height} grid")]
        OutOfBounds {
            /// What was placed
            kind: Occupant,
            /// Column
            x: usize,
            /// Row
            y: usize,
            /// Grid width
            width: usize,
            /// Grid height
            height: usize,
        },

        /// Monster and treasure on the same tile
        #[error("monster and treasure share tile ({x}, {y})")]
        Overlap {
            /// Column
            x: usize,
            /// Row
            y: usize,
        },

        /// Same tile listed twice
        #[error("{kind} at ({x}, {y}) listed twice")]
        Duplicate {
            /// What was listed
            kind: Occupant,
            /// Column
            x: usize,
            /// Row
            y: usize,
        },

        /// SAT backend failed or gave up
        #[error("solver backend failed: {0}")]
        Backend(String),

        /// Malformed rendered grid
        #[error("parse error: {0}")]
        Parse(String),

        /// Puzzle file could not be read
        #[error(transparent)]
        Io(#[from] std::io::Error),

        /// Puzzle file is not valid JSON
        #[error("invalid puzzle file: {0}")]
        Json(#[from] serde_json::Error),
    }

    /// Result type for dungeon-sat operations
    pub type Result<T> = std::result::Result<T, DungeonError>;
}

// Re-export commonly used types
pub use error::{DungeonError, Result};
