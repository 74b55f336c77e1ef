//! Local-search drivers iterating the neighborhood over a [`Solution`].
//!
//! Both [`sa::SimulatedAnnealing`] and [`lahc::Lahc`] share the same move
//! registry and selection rule; the only difference between them is the
//! acceptance criterion (temperature-based vs. a circular history of recent
//! costs).

pub mod lahc;
pub mod sa;

pub use lahc::Lahc;
pub use sa::SimulatedAnnealing;

use oreplan_core::{OrePlanResult, Rng, Solution};

use crate::constructive::Constructive;
use crate::neighborhood::Move;

/// Pick a uniformly random registered move that currently `has_move` on
/// `solution`, retrying indefinitely as the source does. `moves` is never
/// empty in a correctly configured driver.
pub fn select_move(moves: &[Move], solution: &Solution, rng: &mut Rng) -> usize {
    loop {
        let idx = rng.below(moves.len());
        if moves[idx].has_move(solution) {
            return idx;
        }
    }
}

/// State shared by every heuristic driver: its registered moves, the best
/// solution found so far, and an iteration counter exposed for diagnostics.
pub struct HeuristicCore {
    pub name: &'static str,
    pub moves: Vec<Move>,
    pub best_solution: Option<Solution>,
    pub iters: u64,
}

impl HeuristicCore {
    pub fn new(name: &'static str, moves: Vec<Move>) -> Self {
        Self {
            name,
            moves,
            best_solution: None,
            iters: 0,
        }
    }

    pub fn add_move(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Apply a move and update the incumbent if `solution` improved past
    /// `best_solution`. Shared by SA's and LAHC's accept paths.
    fn maybe_update_best(&mut self, solution: &Solution) {
        let better = self
            .best_solution
            .as_ref()
            .map_or(true, |best| solution.cost < best.cost);
        if better {
            self.best_solution = Some(solution.clone());
        }
    }
}

/// The configured local-search algorithm, chosen at CLI/config time. A
/// tagged union rather than `dyn Heuristic` since the driver runs once per
/// program invocation (or once per feedback pass) and there is no hot-loop
/// dispatch cost to avoid — matches the enum approach used for `Move`.
pub enum HeuristicDriver {
    Sa(SimulatedAnnealing),
    Lahc(Lahc),
}

impl HeuristicDriver {
    pub fn run(
        &mut self,
        initial_solution: &Solution,
        constructive: &mut Constructive,
        rng: &mut Rng,
        max_iters: u32,
        best_known: bool,
    ) -> OrePlanResult<Solution> {
        match self {
            HeuristicDriver::Sa(d) => d.run(initial_solution, constructive, rng, max_iters, best_known),
            HeuristicDriver::Lahc(d) => d.run(initial_solution, constructive, rng, max_iters, best_known),
        }
    }

    pub fn best_solution(&self) -> Option<&Solution> {
        match self {
            HeuristicDriver::Sa(d) => d.core.best_solution.as_ref(),
            HeuristicDriver::Lahc(d) => d.core.best_solution.as_ref(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HeuristicDriver::Sa(d) => d.core.name,
            HeuristicDriver::Lahc(d) => d.core.name,
        }
    }
}
