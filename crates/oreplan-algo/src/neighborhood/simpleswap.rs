//! SimpleSwap: exchange two jobs' values between two engines' routes
//! without changing either position, unlike the full [`super::swap::Swap`].

use oreplan_core::{OrePlanResult, Rng};

use super::{pick_engine, rebuild_and_measure, MoveCore};
use crate::constructive::Constructive;
use oreplan_core::solution::Solution;

#[derive(Debug, Clone)]
pub struct SimpleSwap {
    smart: bool,
    pub core: MoveCore,
    engine1: usize,
    engine2: usize,
    pos1: usize,
    pos2: usize,
}

impl SimpleSwap {
    pub fn new(smart: bool) -> Self {
        Self {
            smart,
            core: MoveCore::default(),
            engine1: 0,
            engine2: 0,
            pos1: 0,
            pos2: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        if self.smart {
            "SmartSimpleSwap"
        } else {
            "SimpleSwap"
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

    fn pick_positions(&mut self, solution: &Solution, rng: &mut Rng) {
        let route1 = &solution.routes[self.engine1];
        let route2 = &solution.routes[self.engine2];
        if !route1.is_empty() {
            self.pos1 = rng.below(route1.len());
        }
        if !route2.is_empty() {
            self.pos2 = rng.below(route2.len());
        }
    }

    pub fn reset(&mut self, solution: &Solution, rng: &mut Rng) {
        self.engine1 = pick_engine(self.smart, solution, rng);
        self.engine2 = self.other_engine(self.engine1, solution, rng);
        self.pick_positions(solution, rng);
    }

    pub fn gen_move(&mut self, solution: &Solution, rng: &mut Rng) {
        self.reset(solution, rng);
        for _ in 0..1_000 {
            self.pick_positions(solution, rng);
            if self.has_move(solution) {
                break;
            }
        }
    }

    pub fn has_move(&self, solution: &Solution) -> bool {
        !solution.routes[self.engine1].is_empty() && !solution.routes[self.engine2].is_empty()
    }

    pub fn do_move(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
        rng: &mut Rng,
    ) -> OrePlanResult<f64> {
        if self.has_move(solution) {
            self.pick_positions(solution, rng);
            let job1 = solution.routes[self.engine1][self.pos1];
            let job2 = solution.routes[self.engine2][self.pos2];
            solution.routes[self.engine1][self.pos1] = job2;
            solution.routes[self.engine2][self.pos2] = job1;
        }
        rebuild_and_measure(&mut self.core, solution, constructive)
    }

    pub fn reject(
        &mut self,
        solution: &mut Solution,
        constructive: &mut Constructive,
    ) -> OrePlanResult<()> {
        self.core.reject()?;
        let route1_len = solution.routes[self.engine1].len();
        let route2_len = solution.routes[self.engine2].len();
        if self.pos1 < route1_len && self.pos2 < route2_len {
            let job1 = solution.routes[self.engine1][self.pos1];
            let job2 = solution.routes[self.engine2][self.pos2];
            solution.routes[self.engine1][self.pos1] = job2;
            solution.routes[self.engine2][self.pos2] = job1;
        }
        constructive.run(solution, true)
    }
}
