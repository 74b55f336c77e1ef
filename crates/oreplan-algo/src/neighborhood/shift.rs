//! Shift: re-schedule one job from a (possibly makespan-critical) engine's
//! route to another position in the same route.

use oreplan_core::solution::{RouteEntry, Solution};
use oreplan_core::{OrePlanResult, Rng};

use super::{pick_engine, rebuild_and_measure, MoveCore};
use crate::constructive::Constructive;

#[derive(Debug, Clone)]
pub struct Shift {
    smart: bool,
    pub core: MoveCore,
    engine: usize,
    job: RouteEntry,
    pos: usize,
}

impl Shift {
    pub fn new(smart: bool) -> Self {
        Self {
            smart,
            core: MoveCore::default(),
            engine: 0,
            job: RouteEntry::new(0, oreplan_core::solution::Activity::Reclaim),
            pos: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        if self.smart {
            "SmartShift"
        } else {
            "Shift"
        }
    }

    pub fn reset(&mut self, solution: &Solution, rng: &mut Rng) {
        self.engine = pick_engine(self.smart, solution, rng);
        let route = &solution.routes[self.engine];
        if !route.is_empty() {
            self.pos = rng.below(route.len());
            self.job = route[self.pos];
        }
    }

    pub fn gen_move(&mut self, solution: &Solution, rng: &mut Rng) {
        self.reset(solution, rng);
        for _ in 0..1_000 {
            self.engine = pick_engine(self.smart, solution, rng);
            if self.has_move(solution) {
                break;
            }
        }
    }

    pub fn has_move(&self, solution: &Solution) -> bool {
        solution.routes[self.engine].len() > 1
    }

    pub fn do_move(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
        rng: &mut Rng,
    ) -> OrePlanResult<f64> {
        if self.has_move(solution) {
            let route = &mut solution.routes[self.engine];
            self.pos = rng.below(route.len());
            self.job = route.remove(self.pos);
            let insert_at = rng.below(route.len() + 1);
            route.insert(insert_at, self.job);
        }
        rebuild_and_measure(&mut self.core, solution, constructive)
    }

    pub fn reject(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
    ) -> OrePlanResult<()> {
        self.core.reject()?;
        let route = &mut solution.routes[self.engine];
        if let Some(idx) = route.iter().position(|e| *e == self.job) {
            route.remove(idx);
        }
        let pos = self.pos.min(route.len());
        route.insert(pos, self.job);
        constructive.run(solution, true)
    }
}
