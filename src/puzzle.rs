//! Puzzle instances
//!
//! A `Dungeon` is the grid of a Dungeons & Diagrams puzzle: wall-count hints
//! along the top (one per column) and the left side (one per row), plus the
//! tiles holding monsters and treasure chests. The origin is the top-left
//! tile; `x` is the column and `y` the row.

use crate::{DungeonError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    /// Column, counted from the left
    pub x: usize,
    /// Row, counted from the top
    pub y: usize,
}

impl Tile {
    /// Creates a tile coordinate
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Tile {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What occupies a tile given in the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    /// A monster; always sits in a dead end
    Monster,
    /// A treasure chest; always sits in a treasure room
    Treasure,
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Monster => f.write_str("monster"),
            Occupant::Treasure => f.write_str("treasure"),
        }
    }
}

/// Grid axis, used when reporting hint mismatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Column hints (one per unit of width)
    Columns,
    /// Row hints (one per unit of height)
    Rows,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Columns => f.write_str("column"),
            Axis::Rows => f.write_str("row"),
        }
    }
}

/// A validated puzzle instance
///
/// Construction rejects malformed input (hint counts that disagree with the
/// grid size, coordinates off the grid, duplicate or overlapping occupants),
/// so every `Dungeon` can be compiled without further checks. Hints larger
/// than the grid are accepted: such a puzzle is simply impossible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    col_hints: Vec<usize>,
    row_hints: Vec<usize>,
    monsters: Vec<Tile>,
    treasures: Vec<Tile>,
    monster_set: FxHashSet<Tile>,
    treasure_set: FxHashSet<Tile>,
}

impl Dungeon {
    /// Creates a dungeon whose size is given by the hint counts
    pub fn new(
        col_hints: Vec<usize>,
        row_hints: Vec<usize>,
        monsters: impl IntoIterator<Item = (usize, usize)>,
        treasures: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        let (width, height) = (col_hints.len(), row_hints.len());
        Self::with_size(width, height, col_hints, row_hints, monsters, treasures)
    }

    /// Creates a dungeon of a declared size, checking the hints against it
    pub fn with_size(
        width: usize,
        height: usize,
        col_hints: Vec<usize>,
        row_hints: Vec<usize>,
        monsters: impl IntoIterator<Item = (usize, usize)>,
        treasures: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DungeonError::EmptyGrid { width, height });
        }
        if col_hints.len() != width {
            return Err(DungeonError::HintLength {
                axis: Axis::Columns,
                expected: width,
                found: col_hints.len(),
            });
        }
        if row_hints.len() != height {
            return Err(DungeonError::HintLength {
                axis: Axis::Rows,
                expected: height,
                found: row_hints.len(),
            });
        }

        let monsters: Vec<Tile> = monsters.into_iter().map(Into::into).collect();
        let treasures: Vec<Tile> = treasures.into_iter().map(Into::into).collect();
        let monster_set = occupant_set(&monsters, Occupant::Monster, width, height)?;
        let treasure_set = occupant_set(&treasures, Occupant::Treasure, width, height)?;

        if let Some(tile) = treasures.iter().find(|t| monster_set.contains(*t)) {
            return Err(DungeonError::Overlap { x: tile.x, y: tile.y });
        }

        Ok(Self {
            col_hints,
            row_hints,
            monsters,
            treasures,
            monster_set,
            treasure_set,
        })
    }

    /// Grid width (number of columns)
    pub fn width(&self) -> usize {
        self.col_hints.len()
    }

    /// Grid height (number of rows)
    pub fn height(&self) -> usize {
        self.row_hints.len()
    }

    /// Wall count required in each column
    pub fn col_hints(&self) -> &[usize] {
        &self.col_hints
    }

    /// Wall count required in each row
    pub fn row_hints(&self) -> &[usize] {
        &self.row_hints
    }

    /// Monster tiles, in input order
    pub fn monsters(&self) -> &[Tile] {
        &self.monsters
    }

    /// Treasure tiles, in input order
    pub fn treasures(&self) -> &[Tile] {
        &self.treasures
    }

    /// True if a monster sits on `tile`
    pub fn is_monster(&self, tile: Tile) -> bool {
        self.monster_set.contains(&tile)
    }

    /// True if a treasure sits on `tile`
    pub fn is_treasure(&self, tile: Tile) -> bool {
        self.treasure_set.contains(&tile)
    }

    /// What sits on `tile`, if anything
    pub fn occupant(&self, tile: Tile) -> Option<Occupant> {
        if self.is_monster(tile) {
            Some(Occupant::Monster)
        } else if self.is_treasure(tile) {
            Some(Occupant::Treasure)
        } else {
            None
        }
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.height()).flat_map(move |y| (0..self.width()).map(move |x| Tile::new(x, y)))
    }
}

fn occupant_set(tiles: &[Tile], kind: Occupant, width: usize, height: usize) -> Result<FxHashSet<Tile>> {
    let mut set = FxHashSet::default();
    for &tile in tiles {
        if tile.x >= width || tile.y >= height {
            return Err(DungeonError::OutOfBounds {
                kind,
                x: tile.x,
                y: tile.y,
                width,
                height,
            });
        }
        if !set.insert(tile) {
            return Err(DungeonError::Duplicate { kind, x: tile.x, y: tile.y });
        }
    }
    Ok(set)
}

/// Serializable description of a puzzle, as read from a puzzle file
///
/// `width` and `height` are optional; when present they are checked against
/// the hint counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonDescription {
    /// Declared width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    /// Declared height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    /// Numbers along the top
    pub col_hints: Vec<usize>,
    /// Numbers along the left side
    pub row_hints: Vec<usize>,
    /// Monster tiles as `[x, y]`
    #[serde(default)]
    pub monsters: Vec<(usize, usize)>,
    /// Treasure tiles as `[x, y]`
    #[serde(default)]
    pub treasures: Vec<(usize, usize)>,
}

impl TryFrom<DungeonDescription> for Dungeon {
    type Error = DungeonError;

    fn try_from(description: DungeonDescription) -> Result<Self> {
        let width = description.width.unwrap_or(description.col_hints.len());
        let height = description.height.unwrap_or(description.row_hints.len());
        Dungeon::with_size(
            width,
            height,
            description.col_hints,
            description.row_hints,
            description.monsters,
            description.treasures,
        )
    }
}

impl From<&Dungeon> for DungeonDescription {
    fn from(dungeon: &Dungeon) -> Self {
        Self {
            width: Some(dungeon.width()),
            height: Some(dungeon.height()),
            col_hints: dungeon.col_hints.clone(),
            row_hints: dungeon.row_hints.clone(),
            monsters: dungeon.monsters.iter().map(|t| (t.x, t.y)).collect(),
            treasures: dungeon.treasures.iter().map(|t| (t.x, t.y)).collect(),
        }
    }
}
