//! Shared helpers for integration tests

#![allow(dead_code)]

use dungeon_sat::puzzle::{Dungeon, Tile};
use dungeon_sat::solver::Layout;
use dungeon_sat::translator::rooms;
use rand::Rng;

/// Number of walls among the four orthogonal neighbours of `tile`
pub fn wall_neighbours(layout: &Layout, tile: Tile) -> usize {
    let (x, y) = (tile.x as isize, tile.y as isize);
    [(x, y - 1), (x + 1, y), (x, y + 1), (x - 1, y)]
        .iter()
        .filter(|&&(nx, ny)| layout.is_wall_at(nx, ny))
        .count()
}

/// Checks every puzzle rule against `layout`, describing the first violation
pub fn check_layout(dungeon: &Dungeon, layout: &Layout) -> Result<(), String> {
    for (x, &hint) in dungeon.col_hints().iter().enumerate() {
        let walls = (0..dungeon.height()).filter(|&y| layout.is_wall(Tile::new(x, y))).count();
        if walls != hint {
            return Err(format!("column {x} has {walls} walls, hint {hint}"));
        }
    }
    for (y, &hint) in dungeon.row_hints().iter().enumerate() {
        let walls = (0..dungeon.width()).filter(|&x| layout.is_wall(Tile::new(x, y))).count();
        if walls != hint {
            return Err(format!("row {y} has {walls} walls, hint {hint}"));
        }
    }

    for &tile in dungeon.monsters() {
        if layout.is_wall(tile) {
            return Err(format!("monster {tile} is a wall"));
        }
        if wall_neighbours(layout, tile) != 3 {
            return Err(format!("monster {tile} is not in a dead end"));
        }
    }

    for tile in dungeon.tiles() {
        let occupied = dungeon.is_monster(tile) || dungeon.is_treasure(tile);
        if !occupied && !layout.is_wall(tile) && wall_neighbours(layout, tile) == 3 {
            return Err(format!("unmarked dead end at {tile}"));
        }

        if !layout.is_wall(tile) && !layout.is_treasure_room(tile) {
            let (x, y) = (tile.x as isize, tile.y as isize);
            let open = !layout.is_wall_at(x + 1, y)
                && !layout.is_wall_at(x, y + 1)
                && !layout.is_wall_at(x + 1, y + 1);
            if open {
                return Err(format!("open 2x2 space at {tile}"));
            }
        }
    }

    check_rooms(dungeon, layout)
}

fn check_rooms(dungeon: &Dungeon, layout: &Layout) -> Result<(), String> {
    let mut centers: Vec<Tile> = Vec::new();

    for &treasure in dungeon.treasures() {
        let center = rooms::candidate_centers(dungeon, treasure)
            .into_iter()
            .find(|&c| rooms::interior(c).all(|t| layout.is_treasure_room(t)))
            .ok_or_else(|| format!("treasure {treasure} has no room"))?;

        if rooms::interior(center).any(|t| layout.is_wall(t)) {
            return Err(format!("room at {center} contains a wall"));
        }
        let walls = rooms::perimeter(center)
            .filter(|&(x, y)| layout.is_wall_at(x, y))
            .count();
        if walls != rooms::PERIMETER_WALLS {
            return Err(format!("room at {center} has {walls} perimeter walls"));
        }
        if let Some(other) = centers.iter().find(|&&other| rooms::too_close(other, center)) {
            return Err(format!("rooms at {other} and {center} are too close"));
        }
        centers.push(center);
    }

    let marked = dungeon.tiles().filter(|&t| layout.is_treasure_room(t)).count();
    if marked != centers.len() * 9 {
        return Err(format!("{marked} room tiles for {} rooms", centers.len()));
    }
    Ok(())
}

/// Wall flags of a random grid that satisfies the rules once its dead ends
/// are taken as monsters; `None` if the draw has an open 2x2 block
pub fn random_walls(rng: &mut impl Rng, width: usize, height: usize) -> Option<Vec<bool>> {
    let walls: Vec<bool> = (0..width * height).map(|_| rng.gen_bool(0.45)).collect();
    let layout = Layout::new(width, height, walls.clone(), vec![false; width * height]);

    for y in 0..height {
        for x in 0..width {
            let (x, y) = (x as isize, y as isize);
            let open = !layout.is_wall_at(x, y)
                && !layout.is_wall_at(x + 1, y)
                && !layout.is_wall_at(x, y + 1)
                && !layout.is_wall_at(x + 1, y + 1);
            if open {
                return None;
            }
        }
    }
    Some(walls)
}

/// The puzzle whose hints and monsters come from `walls`
pub fn puzzle_from_walls(width: usize, height: usize, walls: &[bool]) -> Dungeon {
    let layout = Layout::new(width, height, walls.to_vec(), vec![false; width * height]);
    let col_hints = (0..width)
        .map(|x| (0..height).filter(|&y| layout.is_wall(Tile::new(x, y))).count())
        .collect();
    let row_hints = (0..height)
        .map(|y| (0..width).filter(|&x| layout.is_wall(Tile::new(x, y))).count())
        .collect();
    let monsters: Vec<(usize, usize)> = layout
        .tiles()
        .filter(|&t| !layout.is_wall(t) && wall_neighbours(&layout, t) == 3)
        .map(|t| (t.x, t.y))
        .collect();

    Dungeon::new(col_hints, row_hints, monsters, []).unwrap()
}
