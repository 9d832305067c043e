//! Tile variables
//!
//! Maps every tile of the grid to the SAT variables describing it: one for
//! "is a wall" and one for "is part of a treasure room". A single extra
//! variable stands for everything outside the grid; it is asserted true, so
//! neighbour lookups that fall off the edge see a wall.

use crate::bool::{BoolValue, BooleanVariable, VariableAllocator};
use crate::puzzle::Tile;
use std::ops::Range;

/// What a block of variables describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// `wall(x, y)` for every tile
    Wall,
    /// `treasure_room(x, y)` for every tile
    TreasureRoom,
    /// The out-of-bounds wall
    Boundary,
}

/// Variables for every tile of a `width` × `height` grid
#[derive(Debug, Clone)]
pub struct TileVariables {
    width: usize,
    height: usize,
    walls: Range<u32>,
    rooms: Range<u32>,
    boundary: u32,
}

impl TileVariables {
    /// Allocates wall, treasure-room and boundary variables
    pub fn allocate(allocator: &mut VariableAllocator<Purpose>, width: usize, height: usize) -> Self {
        let tiles = width * height;
        let walls = allocator.allocate(Purpose::Wall, tiles);
        let rooms = allocator.allocate(Purpose::TreasureRoom, tiles);
        let boundary = allocator.allocate(Purpose::Boundary, 1).start;
        Self {
            width,
            height,
            walls,
            rooms,
            boundary,
        }
    }

    /// Grid width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resolves signed coordinates to an in-bounds tile
    pub fn in_bounds(&self, x: isize, y: isize) -> Option<Tile> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then_some(Tile::new(x, y))
    }

    fn index(&self, tile: Tile) -> u32 {
        assert!(
            tile.x < self.width && tile.y < self.height,
            "tile {tile} outside {}x{} grid",
            self.width,
            self.height
        );
        (tile.y * self.width + tile.x) as u32
    }

    /// SAT variable for "`tile` is a wall"
    pub fn wall_var(&self, tile: Tile) -> u32 {
        self.walls.start + self.index(tile)
    }

    /// SAT variable for "`tile` is part of a treasure room"
    pub fn room_var(&self, tile: Tile) -> u32 {
        self.rooms.start + self.index(tile)
    }

    /// SAT variable standing for everything outside the grid
    pub fn boundary_var(&self) -> u32 {
        self.boundary
    }

    /// "`tile` is a wall"
    pub fn wall<'arena>(&self, tile: Tile) -> BoolValue<'arena> {
        variable(self.wall_var(tile))
    }

    /// "`tile` is part of a treasure room"
    pub fn treasure_room<'arena>(&self, tile: Tile) -> BoolValue<'arena> {
        variable(self.room_var(tile))
    }

    /// The out-of-bounds wall
    pub fn boundary<'arena>(&self) -> BoolValue<'arena> {
        variable(self.boundary)
    }

    /// "(x, y) is a wall", where anything off the grid is the boundary wall
    pub fn tile_or_boundary<'arena>(&self, x: isize, y: isize) -> BoolValue<'arena> {
        match self.in_bounds(x, y) {
            Some(tile) => self.wall(tile),
            None => self.boundary(),
        }
    }

    /// Wall values of the four orthogonal neighbours (up, right, down, left)
    pub fn neighbours<'arena>(&self, tile: Tile) -> [BoolValue<'arena>; 4] {
        let (x, y) = (tile.x as isize, tile.y as isize);
        [
            self.tile_or_boundary(x, y - 1),
            self.tile_or_boundary(x + 1, y),
            self.tile_or_boundary(x, y + 1),
            self.tile_or_boundary(x - 1, y),
        ]
    }

    /// Wall values of column `x`, top to bottom
    pub fn column<'arena>(&self, x: usize) -> Vec<BoolValue<'arena>> {
        (0..self.height).map(|y| self.wall(Tile::new(x, y))).collect()
    }

    /// Wall values of row `y`, left to right
    pub fn row<'arena>(&self, y: usize) -> Vec<BoolValue<'arena>> {
        (0..self.width).map(|x| self.wall(Tile::new(x, y))).collect()
    }
}

fn variable<'arena>(label: u32) -> BoolValue<'arena> {
    BoolValue::Variable(BooleanVariable::new(label as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(width: usize, height: usize) -> TileVariables {
        let mut allocator = VariableAllocator::new();
        TileVariables::allocate(&mut allocator, width, height)
    }

    #[test]
    fn allocation_layout() {
        let mut allocator = VariableAllocator::new();
        let vars = TileVariables::allocate(&mut allocator, 3, 2);

        assert_eq!(allocator.total_variables(), 13);
        assert_eq!(vars.wall_var(Tile::new(0, 0)), 1);
        assert_eq!(vars.wall_var(Tile::new(2, 1)), 6);
        assert_eq!(vars.room_var(Tile::new(0, 0)), 7);
        assert_eq!(vars.boundary_var(), 13);
    }

    #[test]
    fn out_of_bounds_is_boundary() {
        let vars = tiles(2, 2);
        let boundary = vars.boundary();

        assert_eq!(vars.tile_or_boundary(-1, 0), boundary);
        assert_eq!(vars.tile_or_boundary(0, -1), boundary);
        assert_eq!(vars.tile_or_boundary(2, 0), boundary);
        assert_eq!(vars.tile_or_boundary(0, 2), boundary);
        assert_eq!(vars.tile_or_boundary(1, 1), vars.wall(Tile::new(1, 1)));
    }

    #[test]
    fn corner_neighbours() {
        let vars = tiles(2, 2);
        let boundary = vars.boundary();
        let [up, right, down, left] = vars.neighbours(Tile::new(0, 0));

        assert_eq!(up, boundary);
        assert_eq!(right, vars.wall(Tile::new(1, 0)));
        assert_eq!(down, vars.wall(Tile::new(0, 1)));
        assert_eq!(left, boundary);
    }

    #[test]
    fn columns_and_rows() {
        let vars = tiles(3, 2);
        assert_eq!(vars.column(1), vec![vars.wall(Tile::new(1, 0)), vars.wall(Tile::new(1, 1))]);
        assert_eq!(vars.row(1).len(), 3);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn wall_requires_in_bounds_tile() {
        tiles(2, 2).wall_var(Tile::new(2, 0));
    }
}
