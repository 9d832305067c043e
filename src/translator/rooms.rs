//! Treasure room placement
//!
//! Every treasure sits in a 3x3 room of floor tiles. The room's centre lies
//! within one step of the chest (diagonals included) and far enough from the
//! edge that the room itself stays inside the grid. Rooms are walled in on
//! all sides except for one entrance, and two rooms must be separated by at
//! least one tile.

use crate::puzzle::{Dungeon, Tile};

/// Offsets of the 12 tiles walling in a room, relative to its centre
pub const PERIMETER: [(isize, isize); 12] = [
    (-2, -1), (-2, 0), (-2, 1),
    (2, -1), (2, 0), (2, 1),
    (-1, -2), (0, -2), (1, -2),
    (-1, 2), (0, 2), (1, 2),
];

/// Number of perimeter tiles that must be walls (the remaining one is the entrance)
pub const PERIMETER_WALLS: usize = 11;

/// Possible room centres for the treasure at `treasure`
pub fn candidate_centers(dungeon: &Dungeon, treasure: Tile) -> Vec<Tile> {
    let (width, height) = (dungeon.width(), dungeon.height());
    let mut centers = Vec::new();

    for cx in treasure.x.saturating_sub(1)..=treasure.x + 1 {
        for cy in treasure.y.saturating_sub(1)..=treasure.y + 1 {
            if cx == 0 || cy == 0 || cx + 1 >= width || cy + 1 >= height {
                continue;
            }
            centers.push(Tile::new(cx, cy));
        }
    }

    centers
}

/// True if rooms centred at `a` and `b` would overlap or touch
///
/// One room is inflated to 5x5 (its walls) and tested against the other's
/// 3x3 interior.
pub fn too_close(a: Tile, b: Tile) -> bool {
    a.x.abs_diff(b.x) <= 3 && a.y.abs_diff(b.y) <= 3
}

/// The 3x3 interior of the room centred at `center`
///
/// # Panics
/// Panics if `center` lies in row or column 0; room centres never do.
pub fn interior(center: Tile) -> impl Iterator<Item = Tile> {
    assert!(center.x > 0 && center.y > 0, "room centre {center:?} touches the border");
    (center.y - 1..=center.y + 1)
        .flat_map(move |y| (center.x - 1..=center.x + 1).map(move |x| Tile::new(x, y)))
}

/// Signed coordinates of the perimeter of the room centred at `center`
pub fn perimeter(center: Tile) -> impl Iterator<Item = (isize, isize)> {
    let (cx, cy) = (center.x as isize, center.y as isize);
    PERIMETER.iter().map(move |&(dx, dy)| (cx + dx, cy + dy))
}

/// Lazy enumeration of room placements, one centre per treasure
///
/// Walks the cross product of the candidate lists depth first, abandoning a
/// partial placement as soon as its newest room is too close to an earlier
/// one, so conflicting combinations are never materialized.
#[derive(Debug, Clone)]
pub struct Placements {
    candidates: Vec<Vec<Tile>>,
    /// Chosen candidate index per treasure, for the treasures placed so far
    chosen: Vec<usize>,
    /// Next candidate index to try for treasure `chosen.len()`
    next: usize,
    exhausted: bool,
}

impl Placements {
    /// Placements for every treasure of `dungeon`
    pub fn new(dungeon: &Dungeon) -> Self {
        let candidates = dungeon
            .treasures()
            .iter()
            .map(|&treasure| candidate_centers(dungeon, treasure))
            .collect();
        Self::from_candidates(candidates)
    }

    /// Placements over explicit candidate lists
    pub fn from_candidates(candidates: Vec<Vec<Tile>>) -> Self {
        Self {
            candidates,
            chosen: Vec::new(),
            next: 0,
            exhausted: false,
        }
    }

    /// True if `center` keeps its distance from every room placed so far
    fn fits(&self, center: Tile) -> bool {
        self.chosen
            .iter()
            .enumerate()
            .all(|(earlier, &index)| !too_close(self.candidates[earlier][index], center))
    }

    /// Drops the newest choice; returns false once nothing is left to revisit
    fn backtrack(&mut self) -> bool {
        match self.chosen.pop() {
            Some(index) => {
                self.next = index + 1;
                true
            }
            None => {
                self.exhausted = true;
                false
            }
        }
    }
}

impl Iterator for Placements {
    type Item = Vec<Tile>;

    fn next(&mut self) -> Option<Vec<Tile>> {
        if self.exhausted {
            return None;
        }

        loop {
            let level = self.chosen.len();
            if level == self.candidates.len() {
                let centers = self
                    .chosen
                    .iter()
                    .enumerate()
                    .map(|(treasure, &index)| self.candidates[treasure][index])
                    .collect();
                self.backtrack();
                return Some(centers);
            }

            let found = (self.next..self.candidates[level].len())
                .find(|&index| self.fits(self.candidates[level][index]));
            match found {
                Some(index) => {
                    self.chosen.push(index);
                    self.next = 0;
                }
                None => {
                    if !self.backtrack() {
                        return None;
                    }
                }
            }
        }
    }
}
