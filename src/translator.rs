//! Puzzle to Boolean circuit translation
//!
//! Compiles the rules of a dungeon into boolean circuits over the tile
//! variables. Every rule becomes one conjunction; the CNF layer splits
//! top-level conjunctions, so per-tile constraints still reach the solver as
//! separate clauses.

pub mod rooms;
mod tiles;

pub use rooms::Placements;
pub use tiles::{Purpose, TileVariables};

use crate::bool::{BoolValue, BooleanFactory, UnaryCount};
use crate::puzzle::{Dungeon, Tile};
use rustc_hash::FxHashSet;
use std::fmt;
use tracing::debug;

/// Wall neighbours that make a tile a dead end
const DEAD_END_WALLS: usize = 3;

/// The puzzle rules, in the order they are compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Everything outside the grid is wall
    Boundary,
    /// Monster and treasure tiles are never walls
    Occupancy,
    /// Without treasures there are no treasure rooms
    RoomGating,
    /// Wall count of every column matches its hint
    ColumnHints,
    /// Wall count of every row matches its hint
    RowHints,
    /// Every monster sits in a dead end
    MonsterDeadEnds,
    /// Dead ends only occur under monsters
    UnmarkedDeadEnds,
    /// No 2x2 block of floor outside treasure rooms
    OpenSpace,
    /// Treasures sit in walled 3x3 rooms
    TreasureRooms,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Boundary => "boundary",
            Rule::Occupancy => "occupancy",
            Rule::RoomGating => "room gating",
            Rule::ColumnHints => "column hints",
            Rule::RowHints => "row hints",
            Rule::MonsterDeadEnds => "monster dead ends",
            Rule::UnmarkedDeadEnds => "unmarked dead ends",
            Rule::OpenSpace => "open space",
            Rule::TreasureRooms => "treasure rooms",
        };
        f.write_str(name)
    }
}

/// Result of compiling a dungeon
#[derive(Debug, Clone)]
pub struct Translation<'arena> {
    /// One circuit per rule; the dungeon's layouts are the models of their conjunction
    pub constraints: Vec<(Rule, BoolValue<'arena>)>,
    /// Number of non-conflicting room placements in the treasure-room disjunction
    pub placements: usize,
}

/// Compiles a dungeon into boolean circuits
pub struct Translator<'a, 'arena> {
    dungeon: &'a Dungeon,
    tiles: &'a TileVariables,
    factory: &'a BooleanFactory<'arena>,
}

impl<'a, 'arena> Translator<'a, 'arena> {
    /// Creates a translator over `tiles`, building gates with `factory`
    pub fn new(dungeon: &'a Dungeon, tiles: &'a TileVariables, factory: &'a BooleanFactory<'arena>) -> Self {
        debug_assert_eq!(tiles.width(), dungeon.width());
        debug_assert_eq!(tiles.height(), dungeon.height());
        Self {
            dungeon,
            tiles,
            factory,
        }
    }

    /// Compiles every rule
    pub fn translate(&self) -> Translation<'arena> {
        let (rooms, placements) = self.treasure_rooms();
        let constraints = vec![
            (Rule::Boundary, self.tiles.boundary()),
            (Rule::Occupancy, self.occupancy()),
            (Rule::RoomGating, self.room_gating()),
            (Rule::ColumnHints, self.column_hints()),
            (Rule::RowHints, self.row_hints()),
            (Rule::MonsterDeadEnds, self.monster_dead_ends()),
            (Rule::UnmarkedDeadEnds, self.unmarked_dead_ends()),
            (Rule::OpenSpace, self.open_space()),
            (Rule::TreasureRooms, rooms),
        ];

        for (rule, value) in &constraints {
            if value.is_false() {
                debug!(%rule, "rule is unsatisfiable by construction");
            }
        }
        debug!(
            gates = self.factory.num_gates(),
            placements,
            "translated dungeon"
        );

        Translation {
            constraints,
            placements,
        }
    }

    fn occupancy(&self) -> BoolValue<'arena> {
        let f = self.factory;
        let occupied = self.dungeon.monsters().iter().chain(self.dungeon.treasures());
        f.and_multi(occupied.map(|&tile| f.not(self.tiles.wall(tile))).collect())
    }

    fn room_gating(&self) -> BoolValue<'arena> {
        let f = self.factory;
        if !self.dungeon.treasures().is_empty() {
            return f.constant(true);
        }
        f.and_multi(
            self.dungeon
                .tiles()
                .map(|tile| f.not(self.tiles.treasure_room(tile)))
                .collect(),
        )
    }

    fn column_hints(&self) -> BoolValue<'arena> {
        let f = self.factory;
        let columns = self.dungeon.col_hints().iter().enumerate();
        f.and_multi(
            columns
                .map(|(x, &hint)| UnaryCount::of(&self.tiles.column(x), f).eq(hint, f))
                .collect(),
        )
    }

    fn row_hints(&self) -> BoolValue<'arena> {
        let f = self.factory;
        let rows = self.dungeon.row_hints().iter().enumerate();
        f.and_multi(
            rows.map(|(y, &hint)| UnaryCount::of(&self.tiles.row(y), f).eq(hint, f))
                .collect(),
        )
    }

    /// "Exactly three of `tile`'s neighbours are walls"
    fn dead_end(&self, tile: Tile) -> BoolValue<'arena> {
        let neighbours = self.tiles.neighbours(tile);
        UnaryCount::of(&neighbours, self.factory).eq(DEAD_END_WALLS, self.factory)
    }

    fn monster_dead_ends(&self) -> BoolValue<'arena> {
        let monsters = self.dungeon.monsters().iter();
        self.factory
            .and_multi(monsters.map(|&tile| self.dead_end(tile)).collect())
    }

    fn unmarked_dead_ends(&self) -> BoolValue<'arena> {
        let f = self.factory;
        let unmarked = self.dungeon.tiles().filter(|&tile| !self.dungeon.is_monster(tile));
        f.and_multi(
            unmarked
                .map(|tile| f.implies(self.dead_end(tile), self.tiles.wall(tile)))
                .collect(),
        )
    }

    fn open_space(&self) -> BoolValue<'arena> {
        let f = self.factory;
        let tiles = self.tiles;
        let blocks = self.dungeon.tiles().map(|tile| {
            let (x, y) = (tile.x as isize, tile.y as isize);
            // floor outside a room implies a wall right, below or diagonally
            f.or_multi(vec![
                tiles.wall(tile),
                tiles.treasure_room(tile),
                tiles.tile_or_boundary(x + 1, y),
                tiles.tile_or_boundary(x, y + 1),
                tiles.tile_or_boundary(x + 1, y + 1),
            ])
        });
        f.and_multi(blocks.collect())
    }

    /// Disjunction over every non-conflicting room placement
    fn treasure_rooms(&self) -> (BoolValue<'arena>, usize) {
        let layouts: Vec<_> = Placements::new(self.dungeon)
            .map(|centers| self.room_layout(&centers))
            .collect();
        let placements = layouts.len();
        debug!(
            treasures = self.dungeon.treasures().len(),
            placements, "enumerated treasure room placements"
        );
        (self.factory.or_multi(layouts), placements)
    }

    /// One global room layout: the rooms centred at `centers` and nothing else
    fn room_layout(&self, centers: &[Tile]) -> BoolValue<'arena> {
        let f = self.factory;
        let mut marked = FxHashSet::default();
        let mut parts = Vec::new();

        for &center in centers {
            let ring: Vec<_> = rooms::perimeter(center)
                .map(|(x, y)| self.tiles.tile_or_boundary(x, y))
                .collect();
            parts.push(UnaryCount::of(&ring, f).eq(rooms::PERIMETER_WALLS, f));

            for tile in rooms::interior(center) {
                parts.push(f.not(self.tiles.wall(tile)));
                marked.insert(tile);
            }
        }

        for tile in self.dungeon.tiles() {
            let marking = f.constant(marked.contains(&tile));
            parts.push(f.iff(self.tiles.treasure_room(tile), marking));
        }

        f.and_multi(parts)
    }
}
