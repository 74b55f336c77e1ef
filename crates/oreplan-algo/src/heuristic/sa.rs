//! Simulated annealing: accept worsening moves with probability
//! `exp(-delta / temperature)`, cooling by `alpha` every `sa_max`
//! iterations and reheating to `t0` if the temperature underflows.

use oreplan_core::{OrePlanResult, Rng, Solution};

use super::{select_move, HeuristicCore};
use crate::constructive::Constructive;
use crate::neighborhood::Move;

pub struct SimulatedAnnealing {
    pub core: HeuristicCore,
    alpha: f64,
    t0: f64,
    sa_max: u32,
    eps: f64,
}

impl SimulatedAnnealing {
    pub fn new(moves: Vec<Move>, alpha: f64, t0: f64, sa_max: u32) -> Self {
        Self {
            core: HeuristicCore::new("Simulated Annealing", moves),
            alpha,
            t0,
            sa_max,
            eps: 1e-6,
        }
    }

    /// Run the annealing schedule for up to `max_iters` temperature drops.
    /// When `best_known` is false the incumbent is seeded from
    /// `initial_solution` (the feedback loop's repeat passes set it true so
    /// the prior best survives a worse intermediate solution).
    pub fn run(
        &mut self,
        initial_solution: &Solution,
        constructive: &mut Constructive,
        rng: &mut Rng,
        max_iters: u32,
        best_known: bool,
    ) -> OrePlanResult<Solution> {
        if !best_known || self.core.best_solution.is_none() {
            self.core.best_solution = Some(initial_solution.clone());
        }

        let mut solution = initial_solution.clone();
        let mut temperature = self.t0;
        self.core.iters = 0;

        while temperature > self.eps && self.core.iters < max_iters as u64 {
            for _ in 0..self.sa_max {
                let idx = select_move(&self.core.moves, &solution, rng);
                let delta = self.core.moves[idx].do_move(&mut solution, constructive, rng)?;

                let accept = if delta < 0.0 {
                    true
                } else if delta == 0.0 {
                    true
                } else {
                    rng.uniform() < (-delta / temperature).exp()
                };

                if accept {
                    self.core.moves[idx].accept()?;
                    self.core.maybe_update_best(&solution);
                } else {
                    self.core.moves[idx].reject(&mut solution, constructive)?;
                }
            }

            self.core.iters += 1;
            temperature *= self.alpha;
            if temperature < self.eps {
                temperature = self.t0;
            }
        }

        Ok(self.core.best_solution.clone().unwrap())
    }
}
