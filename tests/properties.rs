//! Randomized checks against puzzles derived from known layouts

mod common;

use common::{check_layout, puzzle_from_walls, random_walls};
use dungeon_sat::puzzle::Dungeon;
use dungeon_sat::solver::{Layout, Options, Solver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Draws random grids until one satisfies the rules
fn random_puzzle(rng: &mut StdRng, max_size: usize) -> (Dungeon, Vec<bool>) {
    loop {
        let width = rng.gen_range(1..=max_size);
        let height = rng.gen_range(1..=max_size);
        if let Some(walls) = random_walls(rng, width, height) {
            return (puzzle_from_walls(width, height, &walls), walls);
        }
    }
}

/// Every wall assignment that passes the rule checker (grids without treasures)
fn brute_force(dungeon: &Dungeon) -> HashSet<Vec<bool>> {
    let (width, height) = (dungeon.width(), dungeon.height());
    let tiles = width * height;
    (0u32..1 << tiles)
        .map(|bits| (0..tiles).map(|i| bits & (1 << i) != 0).collect::<Vec<bool>>())
        .filter(|walls| {
            let layout = Layout::new(width, height, walls.clone(), vec![false; tiles]);
            check_layout(dungeon, &layout).is_ok()
        })
        .collect()
}

#[test]
fn source_layout_is_found() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let solver = Solver::new(Options::default());

    for _ in 0..25 {
        let (dungeon, walls) = random_puzzle(&mut rng, 5);
        let enumeration = solver.solve(&dungeon).unwrap();

        let mut seen = HashSet::new();
        for layout in enumeration.layouts() {
            check_layout(&dungeon, layout).unwrap();
            assert!(seen.insert(layout.walls().to_vec()), "layout reported twice");
        }
        assert!(seen.contains(&walls), "source layout missing");
    }
}

#[test]
fn matches_brute_force_on_small_grids() {
    let mut rng = StdRng::seed_from_u64(42);
    let solver = Solver::new(Options::default());

    for _ in 0..20 {
        let (dungeon, _) = random_puzzle(&mut rng, 3);
        let found: HashSet<Vec<bool>> = solver
            .solve(&dungeon)
            .unwrap()
            .layouts()
            .iter()
            .map(|layout| layout.walls().to_vec())
            .collect();

        assert_eq!(found, brute_force(&dungeon));
    }
}

#[test]
fn limit_caps_enumeration() {
    let mut rng = StdRng::seed_from_u64(7);
    let unlimited = Solver::new(Options::default());

    for _ in 0..10 {
        let (dungeon, _) = random_puzzle(&mut rng, 4);
        let total = unlimited.solve(&dungeon).unwrap().layouts().len();

        let limited = Solver::new(Options {
            max_solutions: Some(1),
            ..Options::default()
        });
        let capped = limited.solve(&dungeon).unwrap();
        assert_eq!(capped.layouts().len(), total.min(1));
        assert_eq!(capped.is_truncated(), total > 1);
    }
}
