//! Dungeon CLI - solves a Dungeons & Diagrams puzzle and prints every layout.

use clap::Parser;
use dungeon_sat::puzzle::{Dungeon, DungeonDescription};
use dungeon_sat::render::render_report;
use dungeon_sat::solver::{Options, Solver};
use dungeon_sat::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dungeon")]
#[command(author, version, about = "Dungeons & Diagrams solver", long_about = None)]
struct Cli {
    /// Puzzle file (JSON with col_hints, row_hints, monsters, treasures);
    /// the built-in example puzzle is solved when omitted
    puzzle: Option<PathBuf>,

    /// Stop after this many solutions
    #[arg(short, long)]
    limit: Option<usize>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// The example puzzle solved when no file is given
fn example() -> Result<Dungeon> {
    Dungeon::new(
        vec![2, 4, 2, 5, 2, 5, 3, 5],
        vec![3, 4, 3, 6, 3, 1, 3, 5],
        [(0, 2), (5, 0), (6, 3), (7, 4), (7, 6)],
        [(2, 5)],
    )
}

fn load(path: &Path) -> Result<Dungeon> {
    let text = fs::read_to_string(path)?;
    let description: DungeonDescription = serde_json::from_str(&text)?;
    Dungeon::try_from(description)
}

fn run(cli: Cli) -> Result<()> {
    let dungeon = match &cli.puzzle {
        Some(path) => load(path)?,
        None => example()?,
    };
    info!(
        width = dungeon.width(),
        height = dungeon.height(),
        monsters = dungeon.monsters().len(),
        treasures = dungeon.treasures().len(),
        "loaded puzzle"
    );

    let options = Options {
        max_solutions: cli.limit,
        ..Options::default()
    };
    let enumeration = Solver::new(options).solve(&dungeon)?;

    let stats = enumeration.statistics();
    info!(
        primary_variables = stats.primary_variables(),
        variables = stats.num_variables(),
        clauses = stats.num_clauses(),
        placements = stats.placements(),
        total_ms = stats.total_time(),
        "solve statistics"
    );

    print!("{}", render_report(&enumeration, &dungeon));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
