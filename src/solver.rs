//! Main solver API
//!
//! The solver compiles a dungeon to SAT and enumerates every layout that
//! satisfies it. Each solve owns a `Session`: the gate factory, the
//! incremental CNF translator and the backend, shared with nothing else.

use crate::bool::{BoolValue, BooleanFactory, GateArena, Options as BoolOptions, VariableAllocator};
use crate::cnf::CNFTranslator;
use crate::engine::{RustSatAdapter, SATSolver};
use crate::puzzle::{Dungeon, Tile};
use crate::translator::{TileVariables, Translator};
use crate::Result;
use rustsat_batsat::BasicSolver;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Solver options
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Boolean circuit options
    pub bool_options: BoolOptions,
    /// Stop after this many solutions (None = enumerate all)
    pub max_solutions: Option<usize>,
}

/// Exclusive solving state for one dungeon
///
/// Constraints asserted here are translated to clauses and handed to the
/// backend at once; asserting after a `check` is how blocking clauses get in.
pub struct Session<'arena, S> {
    factory: BooleanFactory<'arena>,
    cnf: CNFTranslator,
    backend: S,
    /// Variables declared to the backend so far
    declared: u32,
    /// Set once an assertion folded to FALSE
    trivially_unsat: bool,
}

impl<'arena, S: SATSolver> Session<'arena, S> {
    /// Creates a session building circuits with `factory` and solving with `backend`
    pub fn new(factory: BooleanFactory<'arena>, backend: S) -> Self {
        Self {
            factory,
            cnf: CNFTranslator::new(),
            backend,
            declared: 0,
            trivially_unsat: false,
        }
    }

    /// The gate factory constraints are built with
    pub fn factory(&self) -> &BooleanFactory<'arena> {
        &self.factory
    }

    /// Asserts that `value` holds in every model from now on
    pub fn assert(&mut self, value: BoolValue<'arena>) -> Result<()> {
        let cnf = self.cnf.assert(&value);

        let labels = self.factory.max_label();
        if labels > self.declared {
            self.backend.add_variables(labels - self.declared)?;
            self.declared = labels;
        }

        for clause in &cnf.clauses {
            if clause.is_empty() {
                self.trivially_unsat = true;
                continue;
            }
            self.backend.add_clause(clause)?;
        }
        Ok(())
    }

    /// Checks whether the assertions so far are satisfiable
    pub fn check(&mut self) -> Result<bool> {
        if self.trivially_unsat {
            return Ok(false);
        }
        self.backend.solve()
    }

    /// Value of primary variable `var` in the last model
    pub fn value_of(&self, var: u32) -> bool {
        self.backend.value_of(var)
    }

    /// Number of clauses handed to the backend
    pub fn num_clauses(&self) -> u32 {
        self.backend.num_clauses()
    }

    /// Number of variables declared to the backend
    pub fn num_variables(&self) -> u32 {
        self.backend.num_variables()
    }
}

/// Where the enumeration stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing checked yet
    Unchecked,
    /// A check is underway
    Solving,
    /// The last check produced a model that has not been blocked yet
    SolutionFound,
    /// The backend reported unsatisfiable, the limit was reached, or it failed
    Exhausted,
}

/// Iterator over the layouts of a dungeon
///
/// Each step checks the session; a model is recorded as a `Layout`, and the
/// next step first asserts a blocking clause requiring some wall to differ
/// from it. Iteration ends on the first unsatisfiable check. When a limit
/// stops it early, one more check records whether further layouts remain.
pub struct Solutions<'arena, S> {
    session: Session<'arena, S>,
    tiles: TileVariables,
    state: SearchState,
    /// Blocking clause for the last model, asserted before the next check
    pending: Option<BoolValue<'arena>>,
    found: usize,
    limit: Option<usize>,
    /// Set when the limit stopped enumeration with layouts left unreported
    truncated: bool,
}

impl<'arena, S: SATSolver> Solutions<'arena, S> {
    /// Enumerates the layouts of `session`, reading tiles through `tiles`
    pub fn new(session: Session<'arena, S>, tiles: TileVariables, limit: Option<usize>) -> Self {
        Self {
            session,
            tiles,
            state: SearchState::Unchecked,
            pending: None,
            found: 0,
            limit,
            truncated: false,
        }
    }

    /// Current state of the enumeration
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of layouts produced so far
    pub fn found(&self) -> usize {
        self.found
    }

    /// True if the limit stopped enumeration while more layouts exist
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// The underlying session
    pub fn session(&self) -> &Session<'arena, S> {
        &self.session
    }

    /// Blocks the last model and checks for another
    fn check_next(&mut self) -> Result<bool> {
        if let Some(blocking) = self.pending.take() {
            self.session.assert(blocking)?;
        }
        self.state = SearchState::Solving;
        self.session.check()
    }

    fn step(&mut self) -> Result<Option<Layout>> {
        if !self.check_next()? {
            self.state = SearchState::Exhausted;
            return Ok(None);
        }

        let layout = self.read_layout();
        self.pending = Some(self.blocking_clause(&layout));
        self.state = SearchState::SolutionFound;
        self.found += 1;
        trace!(solution = self.found, "found layout");
        Ok(Some(layout))
    }

    fn read_layout(&self) -> Layout {
        let (width, height) = (self.tiles.width(), self.tiles.height());
        let tiles = (0..height).flat_map(|y| (0..width).map(move |x| Tile::new(x, y)));
        let (walls, rooms): (Vec<bool>, Vec<bool>) = tiles
            .map(|tile| {
                (
                    self.session.value_of(self.tiles.wall_var(tile)),
                    self.session.value_of(self.tiles.room_var(tile)),
                )
            })
            .unzip();
        Layout {
            width,
            height,
            walls,
            rooms,
        }
    }

    /// "Some wall differs from `layout`"
    fn blocking_clause(&self, layout: &Layout) -> BoolValue<'arena> {
        let f = self.session.factory();
        let differs = layout.tiles().map(|tile| {
            let wall = self.tiles.wall(tile);
            if layout.is_wall(tile) {
                f.not(wall)
            } else {
                wall
            }
        });
        f.or_multi(differs.collect())
    }
}

impl<S: SATSolver> Iterator for Solutions<'_, S> {
    type Item = Result<Layout>;

    fn next(&mut self) -> Option<Result<Layout>> {
        if self.state == SearchState::Exhausted {
            return None;
        }
        if self.limit.is_some_and(|limit| self.found >= limit) {
            let more = self.check_next();
            self.state = SearchState::Exhausted;
            return match more {
                Ok(more) => {
                    debug!(limit = self.found, more, "solution limit reached");
                    self.truncated = more;
                    None
                }
                Err(err) => Some(Err(err)),
            };
        }

        match self.step() {
            Ok(Some(layout)) => Some(Ok(layout)),
            Ok(None) => None,
            Err(err) => {
                self.state = SearchState::Exhausted;
                Some(Err(err))
            }
        }
    }
}

/// A recorded model: which tiles are walls and which belong to treasure rooms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Layout {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    rooms: Vec<bool>,
}

impl Layout {
    /// Creates a layout from row-major wall and room flags
    ///
    /// # Panics
    /// Panics if either vector does not hold `width * height` flags.
    pub fn new(width: usize, height: usize, walls: Vec<bool>, rooms: Vec<bool>) -> Self {
        assert_eq!(walls.len(), width * height, "wall flags must cover the grid");
        assert_eq!(rooms.len(), width * height, "room flags must cover the grid");
        Self {
            width,
            height,
            walls,
            rooms,
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

    /// Row-major wall flags
    pub fn walls(&self) -> &[bool] {
        &self.walls
    }

    /// True if `tile` is a wall
    pub fn is_wall(&self, tile: Tile) -> bool {
        self.walls[tile.y * self.width + tile.x]
    }

    /// True if `tile` belongs to a treasure room
    pub fn is_treasure_room(&self, tile: Tile) -> bool {
        self.rooms[tile.y * self.width + tile.x]
    }

    /// Wall state at signed coordinates; everything off the grid is wall
    pub fn is_wall_at(&self, x: isize, y: isize) -> bool {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) if x < self.width && y < self.height => self.is_wall(Tile::new(x, y)),
            _ => true,
        }
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Tile::new(x, y)))
    }
}

/// Outcome of an enumeration, as reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// No layout satisfies the puzzle
    Impossible,
    /// Exactly one layout
    Unique,
    /// This many layouts (at least two)
    Many(usize),
    /// The limit stopped enumeration after this many layouts; more exist
    Truncated(usize),
}

/// Every layout found for a dungeon
#[derive(Debug, Clone)]
pub struct Enumeration {
    layouts: Vec<Layout>,
    truncated: bool,
    stats: Statistics,
}

impl Enumeration {
    /// Layouts in the order the backend produced them
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// True if `max_solutions` cut the enumeration short
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Summary of the outcome
    pub fn report(&self) -> Report {
        if self.truncated {
            return Report::Truncated(self.layouts.len());
        }
        match self.layouts.len() {
            0 => Report::Impossible,
            1 => Report::Unique,
            n => Report::Many(n),
        }
    }

    /// Returns the statistics
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }
}

/// Statistics collected during solving
#[derive(Debug, Clone)]
pub struct Statistics {
    translation_time: Duration,
    solving_time: Duration,
    primary_variables: u32,
    num_variables: u32,
    num_clauses: u32,
    placements: usize,
    solutions: usize,
}

impl Statistics {
    /// Returns translation time in milliseconds
    pub fn translation_time(&self) -> u64 {
        self.translation_time.as_millis() as u64
    }

    /// Returns solving time in milliseconds
    pub fn solving_time(&self) -> u64 {
        self.solving_time.as_millis() as u64
    }

    /// Returns total time in milliseconds
    pub fn total_time(&self) -> u64 {
        self.translation_time() + self.solving_time()
    }

    /// Returns number of tile variables (walls, rooms, boundary)
    pub fn primary_variables(&self) -> u32 {
        self.primary_variables
    }

    /// Returns number of variables, gates included
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Returns number of clauses, blocking clauses included
    pub fn num_clauses(&self) -> u32 {
        self.num_clauses
    }

    /// Returns number of room placements considered
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Returns number of layouts found
    pub fn solutions(&self) -> usize {
        self.solutions
    }
}

/// Dungeon solver (uses batsat by default)
pub struct Solver {
    options: Options,
}

impl Solver {
    /// Creates a new solver with the given options (uses batsat backend)
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Returns the options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Enumerates the layouts of `dungeon` using the batsat backend
    pub fn solve(&self, dungeon: &Dungeon) -> Result<Enumeration> {
        self.solve_with(RustSatAdapter::new(BasicSolver::default()), dungeon)
    }

    /// Enumerates the layouts of `dungeon` with a custom SAT solver
    ///
    /// Backend failures surface as errors, never as an impossible puzzle.
    pub fn solve_with<S: SATSolver>(&self, backend: S, dungeon: &Dungeon) -> Result<Enumeration> {
        // Step 1: Allocate tile variables and compile the rules to circuits
        let translation_start = Instant::now();
        let mut allocator = VariableAllocator::new();
        let tiles = TileVariables::allocate(&mut allocator, dungeon.width(), dungeon.height());
        let primary_variables = allocator.total_variables();

        let arena = GateArena::new();
        let factory = BooleanFactory::new(&arena, primary_variables, self.options.bool_options.clone());
        let translation = Translator::new(dungeon, &tiles, &factory).translate();

        // Step 2: Convert to CNF and hand the clauses to the backend
        let mut session = Session::new(factory, backend);
        for (rule, value) in translation.constraints {
            let before = session.num_clauses();
            session.assert(value)?;
            debug!(%rule, clauses = session.num_clauses() - before, "asserted rule");
        }
        let translation_time = translation_start.elapsed();
        debug!(
            gate_bytes = arena.allocated_bytes(),
            variables = session.num_variables(),
            clauses = session.num_clauses(),
            "compiled dungeon"
        );

        // Step 3: Enumerate layouts, blocking each one found
        let solving_start = Instant::now();
        let mut solutions = Solutions::new(session, tiles, self.options.max_solutions);
        let mut layouts = Vec::new();
        for layout in solutions.by_ref() {
            layouts.push(layout?);
        }
        let solving_time = solving_start.elapsed();

        let stats = Statistics {
            translation_time,
            solving_time,
            primary_variables,
            num_variables: solutions.session().num_variables(),
            num_clauses: solutions.session().num_clauses(),
            placements: translation.placements,
            solutions: layouts.len(),
        };
        info!(
            solutions = stats.solutions,
            truncated = solutions.truncated(),
            translation_ms = stats.translation_time(),
            solving_ms = stats.solving_time(),
            "enumeration finished"
        );

        Ok(Enumeration {
            layouts,
            truncated: solutions.truncated(),
            stats,
        })
    }
}
