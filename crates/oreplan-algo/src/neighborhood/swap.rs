//! Swap: exchange one job between two engines' routes, each landing at a
//! random position in its new route.

use oreplan_core::solution::{Activity, RouteEntry, Solution};
use oreplan_core::{OrePlanResult, Rng};

use super::{pick_engine, rebuild_and_measure, MoveCore};
use crate::constructive::Constructive;

#[derive(Debug, Clone)]
pub struct Swap {
    smart: bool,
    pub core: MoveCore,
    engine1: usize,
    engine2: usize,
    job1: RouteEntry,
    job2: RouteEntry,
    pos1: usize,
    pos2: usize,
}

impl Swap {
    pub fn new(smart: bool) -> Self {
        Self {
            smart,
            core: MoveCore::default(),
            engine1: 0,
            engine2: 0,
            job1: RouteEntry::new(0, Activity::Reclaim),
            job2: RouteEntry::new(0, Activity::Reclaim),
            pos1: 0,
            pos2: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        if self.smart {
            "SmartSwap"
        } else {
            "Swap"
        }
    }

    fn other_engine(&self, excl: usize, solution: &Solution, rng: &mut Rng) -> usize {
        let n = solution.routes.len();
        if n <= 1 {
            return excl;
        }
        loop {
            let e = rng.below(n);
            if e != excl {
                return e;
            }
        }
    }

    pub fn reset(&mut self, solution: &Solution, rng: &mut Rng) {
        self.engine1 = pick_engine(self.smart, solution, rng);
        self.engine2 = self.other_engine(self.engine1, solution, rng);
        self.resample_jobs(solution, rng);
    }

    fn resample_jobs(&mut self, solution: &Solution, rng: &mut Rng) {
        let route1 = &solution.routes[self.engine1];
        let route2 = &solution.routes[self.engine2];
        if !route1.is_empty() {
            self.pos1 = rng.below(route1.len());
            self.job1 = route1[self.pos1];
        }
        if !route2.is_empty() {
            self.pos2 = rng.below(route2.len());
            self.job2 = route2[self.pos2];
        }
    }

    pub fn gen_move(&mut self, solution: &Solution, rng: &mut Rng) {
        self.reset(solution, rng);
        for _ in 0..1_000 {
            self.resample_jobs(solution, rng);
            if self.has_move(solution) {
                break;
            }
        }
    }

    pub fn has_move(&self, solution: &Solution) -> bool {
        let route1 = &solution.routes[self.engine1];
        let route2 = &solution.routes[self.engine2];
        !route1.is_empty() && !route2.is_empty() && self.job1.activity == self.job2.activity
    }

    pub fn do_move(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
        rng: &mut Rng,
    ) -> OrePlanResult<f64> {
        if self.has_move(solution) {
            self.pos1 = solution.routes[self.engine1]
                .iter()
                .position(|e| *e == self.job1)
                .unwrap_or(self.pos1);
            self.pos2 = solution.routes[self.engine2]
                .iter()
                .position(|e| *e == self.job2)
                .unwrap_or(self.pos2);

            solution.routes[self.engine1].remove(self.pos1);
            solution.routes[self.engine2].remove(self.pos2);

            // decide both insertion points up front from the post-removal
            // lengths, rather than falling back to the original position only
            // after a random choice on the other route already failed.
            let len1 = solution.routes[self.engine1].len();
            let len2 = solution.routes[self.engine2].len();
            let (at1, at2) = if len1 > 0 && len2 > 0 {
                (rng.below(len1 + 1), rng.below(len2 + 1))
            } else {
                (self.pos1.min(len1), self.pos2.min(len2))
            };

            solution.routes[self.engine1].insert(at1, self.job2);
            solution.routes[self.engine2].insert(at2, self.job1);
        }
        rebuild_and_measure(&mut self.core, solution, constructive)
    }

    pub fn reject(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
    ) -> OrePlanResult<()> {
        self.core.reject()?;
        let route1 = &mut solution.routes[self.engine1];
        if let Some(idx) = route1.iter().position(|e| *e == self.job2) {
            route1.remove(idx);
        }
        let pos1 = self.pos1.min(route1.len());
        route1.insert(pos1, self.job1);

        let route2 = &mut solution.routes[self.engine2];
        if let Some(idx) = route2.iter().position(|e| *e == self.job1) {
            route2.remove(idx);
        }
        let pos2 = self.pos2.min(route2.len());
        route2.insert(pos2, self.job2);

        constructive.run(solution, true)
    }
}
