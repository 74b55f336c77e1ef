//! Route perturbations driving the heuristic search.
//!
//! Eight variants share one lifecycle (`gen_move` → `has_move` → `do_move`
//! → `accept`/`reject`), collapsed here into four families — Shift, Swap,
//! Switch, SimpleSwap — each carrying a `smart` flag that restricts engine
//! selection to the makespan-critical set instead of picking uniformly.
//! This mirrors the source exactly (`SmartShift` etc. are `Shift` with one
//! different line in `reset`/`gen_move`) without a class per variant.
//!
//! Variants are tagged-union payloads rather than `dyn Move` trait objects,
//! per the design note against heap churn in the hot search loop.

pub mod shift;
pub mod simpleswap;
pub mod swap;
pub mod switch;

use oreplan_core::solution::Solution;
use oreplan_core::{OrePlanError, OrePlanResult, Rng};

use crate::constructive::Constructive;

pub use shift::Shift;
pub use simpleswap::SimpleSwap;
pub use swap::Swap;
pub use switch::Switch;

/// Basic counters kept per move for post-run analysis; never consulted by
/// the search itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveStats {
    pub iters: u64,
    pub improvements: u64,
    pub sideways: u64,
    pub worsens: u64,
    pub rejects: u64,
}

/// Fields common to every move: the intermediate-state guard and the
/// delta/initial cost bookkeeping `do_move`/`accept`/`reject` share.
#[derive(Debug, Clone, Default)]
pub struct MoveCore {
    pub intermediate_state: bool,
    pub delta_cost: f64,
    pub initial_cost: f64,
    pub stats: MoveStats,
}

impl MoveCore {
    pub fn accept(&mut self) -> OrePlanResult<()> {
        if !self.intermediate_state {
            return Err(OrePlanError::InvalidState(
                "accept() called before do_move()".into(),
            ));
        }
        self.intermediate_state = false;
        if self.delta_cost < 0.0 {
            self.stats.improvements += 1;
        } else if self.delta_cost == 0.0 {
            self.stats.sideways += 1;
        } else {
            self.stats.worsens += 1;
        }
        Ok(())
    }

    pub fn reject(&mut self) -> OrePlanResult<()> {
        if !self.intermediate_state {
            return Err(OrePlanError::InvalidState(
                "reject() called before do_move()".into(),
            ));
        }
        self.intermediate_state = false;
        self.stats.rejects += 1;
        Ok(())
    }

    fn begin_do_move(&mut self, solution: &Solution) -> OrePlanResult<()> {
        if self.intermediate_state {
            return Err(OrePlanError::InvalidState(
                "do_move() called before a preceding accept()/reject()".into(),
            ));
        }
        self.intermediate_state = true;
        self.stats.iters += 1;
        self.initial_cost = solution.cost;
        Ok(())
    }

    fn finish_do_move(&mut self, solution: &Solution) -> f64 {
        self.delta_cost = solution.cost - self.initial_cost;
        self.delta_cost
    }
}

/// Run the constructive against the already-perturbed routes and measure
/// the cost delta. Shared by every move's `do_move`.
pub fn rebuild_and_measure(
    core: &mut MoveCore,
    solution: &mut Solution,
    constructive: &mut Constructive,
) -> OrePlanResult<f64> {
    core.begin_do_move(solution)?;
    constructive.run(solution, true)?;
    Ok(core.finish_do_move(solution))
}

/// The engine indices holding the single longest reclaim-event duration —
/// the makespan-critical set the `smart` move variants restrict their
/// engine selection to. Mirrors the original's `make_span` list: an engine
/// can appear more than once if it owns more than one event at the max
/// duration, weighting its selection probability accordingly.
pub fn makespan_critical_engines(solution: &Solution) -> Vec<usize> {
    let max_duration = solution
        .reclaims
        .iter()
        .map(|ev| ev.duration)
        .fold(f64::NEG_INFINITY, f64::max);
    solution
        .reclaims
        .iter()
        .filter(|ev| ev.duration == max_duration)
        .map(|ev| ev.engine)
        .collect()
}

/// Pick an engine index, honoring the `smart` flag: uniformly among all
/// engines, or uniformly among the makespan-critical set (falling back to
/// all engines if the solution has no reclaim events yet).
fn pick_engine(smart: bool, solution: &Solution, rng: &mut Rng) -> usize {
    if smart {
        let critical = makespan_critical_engines(solution);
        if !critical.is_empty() {
            return *rng.choose(&critical);
        }
    }
    rng.below(solution.routes.len())
}

/// A tagged union over the four move families, each carrying its own
/// `smart` flag.
#[derive(Debug, Clone)]
pub enum Move {
    Shift(Shift),
    Swap(Swap),
    Switch(Switch),
    SimpleSwap(SimpleSwap),
}

impl Move {
    pub fn name(&self) -> &'static str {
        match self {
            Move::Shift(m) => m.name(),
            Move::Swap(m) => m.name(),
            Move::Switch(m) => m.name(),
            Move::SimpleSwap(m) => m.name(),
        }
    }

    pub fn gen_move(&mut self, solution: &Solution, rng: &mut Rng) {
        match self {
            Move::Shift(m) => m.gen_move(solution, rng),
            Move::Swap(m) => m.gen_move(solution, rng),
            Move::Switch(m) => m.gen_move(solution, rng),
            Move::SimpleSwap(m) => m.gen_move(solution, rng),
        }
    }

    pub fn has_move(&self, solution: &Solution) -> bool {
        match self {
            Move::Shift(m) => m.has_move(solution),
            Move::Swap(m) => m.has_move(solution),
            Move::Switch(m) => m.has_move(solution),
            Move::SimpleSwap(m) => m.has_move(solution),
        }
    }

    pub fn do_move(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
        rng: &mut Rng,
    ) -> OrePlanResult<f64> {
        match self {
            Move::Shift(m) => m.do_move(solution, constructive, rng),
            Move::Swap(m) => m.do_move(solution, constructive, rng),
            Move::Switch(m) => m.do_move(solution, constructive, rng),
            Move::SimpleSwap(m) => m.do_move(solution, constructive, rng),
        }
    }

    pub fn accept(&mut self) -> OrePlanResult<()> {
        match self {
            Move::Shift(m) => m.core.accept(),
            Move::Swap(m) => m.core.accept(),
            Move::Switch(m) => m.core.accept(),
            Move::SimpleSwap(m) => m.core.accept(),
        }
    }

    pub fn reject(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
    ) -> OrePlanResult<()> {
        match self {
            Move::Shift(m) => m.reject(solution, constructive),
            Move::Swap(m) => m.reject(solution, constructive),
            Move::Switch(m) => m.reject(solution, constructive),
            Move::SimpleSwap(m) => m.reject(solution, constructive),
        }
    }

    pub fn stats(&self) -> MoveStats {
        match self {
            Move::Shift(m) => m.core.stats,
            Move::Swap(m) => m.core.stats,
            Move::Switch(m) => m.core.stats,
            Move::SimpleSwap(m) => m.core.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oreplan_core::ids::{EngineId, OutputId, StockpileId};
    use oreplan_core::solution::ReclaimEvent;
    use oreplan_core::{Engine, OutputRequest, Problem, ProblemInfo, QualityRequest, Stockpile};

    fn problem_with_engines(n: usize) -> Problem {
        Problem {
            info: ProblemInfo {
                name: "t".into(),
                omega_1: 1.0,
                omega_2: 1.0,
            },
            stockpiles: vec![Stockpile {
                id: StockpileId::new(1),
                position: 0,
                yard: 1,
                rails: vec![1],
                capacity: 100.0,
                weight_ini: 50.0,
                quality_ini: vec![],
            }],
            engines: (0..n)
                .map(|i| Engine {
                    id: EngineId::new(i + 1),
                    speed_stack: 50.0,
                    speed_reclaim: 50.0,
                    pos_ini: 0,
                    rail: 1,
                    yards: vec![1],
                })
                .collect(),
            inputs: vec![],
            outputs: vec![OutputRequest {
                id: OutputId::new(1),
                destination: "port".into(),
                weight: 50.0,
                quality: vec![QualityRequest::new("Fe", 55.0, 65.0, 60.0, 1)],
                time: 0.0,
            }],
            distances_travel: vec![vec![0.0]],
            time_travel: vec![vec![0.0]],
        }
    }

    #[test]
    fn test_makespan_critical_engines_picks_max_duration() {
        let problem = problem_with_engines(3);
        let mut sol = Solution::new(&problem);
        for (e, d) in [1.0, 5.0, 3.0].into_iter().enumerate() {
            sol.reclaims.push(ReclaimEvent {
                weight: 1.0,
                stockpile: 0,
                engine: e,
                start_time: 0.0,
                duration: d,
                output: 0,
            });
        }
        assert_eq!(makespan_critical_engines(&sol), vec![1]);
    }
}
