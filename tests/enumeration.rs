//! Enumeration against scripted and real backends

use dungeon_sat::engine::{MockSolver, RustSatAdapter};
use dungeon_sat::puzzle::Dungeon;
use dungeon_sat::solver::{Options, Report, Solver};
use dungeon_sat::DungeonError;
use rustsat_batsat::BasicSolver;
use std::collections::HashSet;

#[test]
fn backend_failure_is_distinct_from_impossible() {
    let solver = Solver::new(Options::default());

    let impossible = Dungeon::new(vec![5], vec![0, 0, 0], [], []).unwrap();
    let enumeration = solver.solve(&impossible).unwrap();
    assert_eq!(enumeration.report(), Report::Impossible);

    let solvable = Dungeon::new(vec![1, 1], vec![1, 1], [], []).unwrap();
    let result = solver.solve_with(MockSolver::failing("backend crashed"), &solvable);
    assert!(matches!(result, Err(DungeonError::Backend(_))));
}

#[test]
fn report_counts_backend_models() {
    let dungeon = Dungeon::new(vec![0], vec![0], [], []).unwrap();
    let solver = Solver::new(Options::default());

    // The mock reports two models; its all-false assignment is the floor tile
    let enumeration = solver
        .solve_with(MockSolver::scripted(vec![true, true]), &dungeon)
        .unwrap();
    assert_eq!(enumeration.report(), Report::Many(2));
    assert_eq!(enumeration.layouts()[0], enumeration.layouts()[1]);
}

#[test]
fn explicit_batsat_backend() {
    let dungeon = Dungeon::new(vec![1, 1, 0], vec![1, 1], [], []).unwrap();
    let solver = Solver::new(Options::default());

    let enumeration = solver
        .solve_with(RustSatAdapter::new(BasicSolver::default()), &dungeon)
        .unwrap();
    let default = solver.solve(&dungeon).unwrap();

    let walls = |e: &dungeon_sat::solver::Enumeration| -> HashSet<Vec<bool>> {
        e.layouts().iter().map(|l| l.walls().to_vec()).collect()
    };
    assert_eq!(walls(&enumeration), walls(&default));
    assert_eq!(enumeration.layouts().len(), walls(&enumeration).len());
}

#[test]
fn unshared_gates_give_the_same_layouts() {
    let dungeon = Dungeon::new(
        vec![3, 2, 1, 2, 3],
        vec![2, 2, 2, 2, 3],
        [(2, 0)],
        [(2, 2)],
    )
    .unwrap();

    let shared = Solver::new(Options::default()).solve(&dungeon).unwrap();
    let mut options = Options::default();
    options.bool_options.sharing = false;
    let unshared = Solver::new(options).solve(&dungeon).unwrap();

    assert_eq!(shared.report(), unshared.report());
    assert_eq!(shared.layouts(), unshared.layouts());
    assert!(unshared.statistics().num_variables() >= shared.statistics().num_variables());
}
