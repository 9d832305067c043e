//! Text rendering of layouts
//!
//! A layout is drawn as one line per row, one glyph per tile. Monsters and
//! treasures take precedence over the wall/floor state of their tile.

use crate::puzzle::{Dungeon, Tile};
use crate::solver::{Enumeration, Layout, Report};
use crate::{DungeonError, Result};

/// Glyph for a wall tile
pub const WALL: char = '█';
/// Glyph for a floor tile
pub const FLOOR: char = '░';
/// Glyph for a monster
pub const MONSTER: char = 'M';
/// Glyph for a treasure chest
pub const TREASURE: char = 'T';

/// Renders `layout` as `height` lines of `width` glyphs, each ending in a newline
pub fn render(layout: &Layout, dungeon: &Dungeon) -> String {
    let mut out = String::with_capacity((layout.width() + 1) * layout.height() * 3);
    for y in 0..layout.height() {
        for x in 0..layout.width() {
            let tile = Tile::new(x, y);
            let glyph = if dungeon.is_monster(tile) {
                MONSTER
            } else if dungeon.is_treasure(tile) {
                TREASURE
            } else if layout.is_wall(tile) {
                WALL
            } else {
                FLOOR
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Header line summarizing a report
pub fn headline(report: Report) -> String {
    match report {
        Report::Impossible => "Impossible. Did you mistype something?".to_string(),
        Report::Unique => "A unique solution was found!".to_string(),
        Report::Many(count) => format!("{count} solutions were found!"),
        Report::Truncated(1) => "Stopped after 1 solution; more exist.".to_string(),
        Report::Truncated(count) => format!("Stopped after {count} solutions; more exist."),
    }
}

/// Full report: the header, then every layout followed by a blank line
pub fn render_report(enumeration: &Enumeration, dungeon: &Dungeon) -> String {
    let mut out = headline(enumeration.report());
    out.push('\n');
    for layout in enumeration.layouts() {
        out.push_str(&render(layout, dungeon));
        out.push('\n');
    }
    out
}

/// Reads wall positions back from a rendered grid
///
/// Monster and treasure glyphs read as floor, since occupied tiles are never
/// walls. Returns the row-major wall flags.
pub fn parse_walls(text: &str, width: usize, height: usize) -> Result<Vec<bool>> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    if lines.len() != height {
        return Err(DungeonError::Parse(format!(
            "expected {height} rows, found {}",
            lines.len()
        )));
    }

    let mut walls = Vec::with_capacity(width * height);
    for (y, line) in lines.iter().enumerate() {
        let glyphs: Vec<char> = line.chars().collect();
        if glyphs.len() != width {
            return Err(DungeonError::Parse(format!(
                "row {y}: expected {width} tiles, found {}",
                glyphs.len()
            )));
        }
        for (x, glyph) in glyphs.into_iter().enumerate() {
            match glyph {
                WALL => walls.push(true),
                FLOOR | MONSTER | TREASURE => walls.push(false),
                other => {
                    return Err(DungeonError::Parse(format!(
                        "unknown glyph {other:?} at ({x}, {y})"
                    )))
                }
            }
        }
    }
    Ok(walls)
}
