//! Shared constructive-scheduler machinery: the `run`/`build` skeleton and
//! the route-merge heap both [`super::postmodel::PostModel`] and
//! [`super::premodel::PreModel`] build on top of.

use oreplan_core::solution::{Activity, Route};
use oreplan_core::{OrePlanError, OrePlanResult, Problem, Solution};
use std::cmp::Ordering;

/// A tentative route entry produced by `set_route`, before `set_jobs` has
/// resolved duplicate-stockpile conflicts across engines into the final
/// per-engine route.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub access_time: f64,
    pub engine: usize,
    pub stockpile: usize,
    pub activity: Activity,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.access_time == other.access_time
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap: reverse the natural f64 order
        other
            .access_time
            .partial_cmp(&self.access_time)
            .unwrap_or(Ordering::Equal)
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Which greedy route-generation strategy to run. See
/// [`super::postmodel`] and [`super::premodel`] for the two behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructiveKind {
    PreModel,
    PostModel,
}

/// The constructive scheduler: given mass decisions, produces per-engine
/// routes (if not already set) and replays them into a timeline.
///
/// Mirrors the original's `Constructive` base class plus its `PreModel`/
/// `PostModel` subclasses, collapsed into one struct dispatching on
/// [`ConstructiveKind`] rather than a class hierarchy, since the only
/// difference between variants is the body of two methods.
pub struct Constructive<'p> {
    pub problem: &'p Problem,
    pub kind: ConstructiveKind,
    pub output_id: Option<usize>,
    /// `[request][stockpile]`, cached from `Solution::weights` at
    /// construction time.
    pub weights: Vec<Vec<f64>>,
    /// Per-stockpile stacked mass still pending placement, summed from
    /// `Solution::input_weights` and zeroed out as `build` consumes it.
    pub inputs: Vec<f64>,
    /// PreModel-only: feedback matrix `[request][stockpile]`, 1 where the
    /// stockpile was actually routed for that request, 1e3 otherwise. See
    /// the open design question on PreModel's unfiltered route generator.
    pub feedback: Option<Vec<Vec<f64>>>,
}

impl<'p> Constructive<'p> {
    pub fn new(problem: &'p Problem, solution: &Solution, kind: ConstructiveKind) -> Self {
        let inputs = solution
            .input_weights
            .iter()
            .map(|row| row.iter().sum())
            .collect();
        let feedback = match kind {
            ConstructiveKind::PreModel => Some(vec![
                vec![1e3; problem.num_stockpiles()];
                problem.num_outputs()
            ]),
            ConstructiveKind::PostModel => None,
        };
        Self {
            problem,
            kind,
            output_id: None,
            weights: solution.weights.clone(),
            inputs,
            feedback,
        }
    }

    /// Re-derive `inputs` from the solution's current input matrix. Called
    /// after a full run so a subsequent run starts from the true stacked
    /// mass rather than whatever `build` consumed along the way.
    pub fn reset_inputs(&mut self, solution: &Solution) {
        self.inputs = solution
            .input_weights
            .iter()
            .map(|row| row.iter().sum())
            .collect();
    }

    /// Run the constructive for every output request (or, if `has_routes`,
    /// replay the routes already set on `solution` for the already-assigned
    /// `output_id`).
    pub fn run(&mut self, solution: &mut Solution, has_routes: bool) -> OrePlanResult<()> {
        solution.reset_clocks();

        if has_routes {
            self.build(solution)?;
        } else {
            for k in 0..self.problem.num_outputs() {
                self.output_id = Some(k);
                self.set_routes(solution);
                self.build(solution)?;
            }
        }

        self.reset_inputs(solution);
        Ok(())
    }

    /// Replay `solution.routes` into stack/reclaim events and update cost.
    pub fn build(&self, solution: &mut Solution) -> OrePlanResult<()> {
        let output_id = self.output_id.ok_or_else(|| {
            OrePlanError::InvalidState("build() called before an output_id was set".into())
        })?;
        if self.weights.is_empty() {
            return Err(OrePlanError::InvalidState(
                "build() called with an empty weight matrix".into(),
            ));
        }
        if solution.routes.iter().all(|r| r.is_empty()) {
            return Err(OrePlanError::InvalidState(
                "build() called before routes were set for any engine".into(),
            ));
        }

        solution.reset_events();
        let mut inputs = self.inputs.clone();

        for engine_idx in 0..self.problem.num_engines() {
            let eng = &self.problem.engines[engine_idx];
            let route = solution.routes[engine_idx].clone();
            let pos_ini = solution.engine_position[engine_idx];

            for entry in &route {
                let stp = entry.stockpile;
                let mut setup = 0.0;
                let reclaim_duration = if eng.can_reclaim() {
                    round2(self.weights[output_id][stp] / eng.speed_reclaim)
                } else {
                    0.0
                };
                let travel = self.problem.time_travel[pos_ini][stp];

                if matches!(entry.activity, Activity::Stack | Activity::Both) {
                    let stack_amt = inputs[stp];
                    let stack_duration = if eng.can_stack() {
                        stack_amt / eng.speed_stack
                    } else {
                        0.0
                    };
                    let stack_duration = round2(stack_duration);
                    solution.stacks.push(oreplan_core::solution::StackEvent {
                        weight: round1(stack_amt),
                        stockpile: stp,
                        engine: engine_idx,
                        start_time: round2(solution.engine_clock[engine_idx] + travel),
                        duration: stack_duration,
                    });
                    solution.engine_clock[engine_idx] += stack_duration;
                    setup += self.problem.time_travel[stp][stp];
                    inputs[stp] = 0.0;
                }

                if matches!(entry.activity, Activity::Reclaim | Activity::Both) {
                    solution
                        .reclaims
                        .push(oreplan_core::solution::ReclaimEvent {
                            weight: round1(self.weights[output_id][stp]),
                            stockpile: stp,
                            engine: engine_idx,
                            start_time: round2(
                                solution.engine_clock[engine_idx] + travel + setup,
                            ),
                            duration: reclaim_duration,
                            output: output_id,
                        });
                }

                solution.engine_clock[engine_idx] += reclaim_duration + travel;
            }

            if let Some(last) = route.last() {
                solution.engine_position[engine_idx] = last.stockpile;
            }
        }

        solution.update_cost(output_id)?;
        Ok(())
    }

    /// Build tentative per-engine routes and resolve them into final
    /// `solution.routes` via `set_jobs`.
    pub fn set_routes(&mut self, solution: &mut Solution) {
        let mut start_time = solution.engine_clock.clone();
        let mut candidates: Vec<Vec<Candidate>> = Vec::with_capacity(self.problem.num_engines());
        for engine_idx in 0..self.problem.num_engines() {
            let pos_ini = solution.engine_position[engine_idx];
            candidates.push(self.set_route(&mut start_time, engine_idx, pos_ini));
        }
        self.set_jobs(solution, candidates);
    }

    /// Greedily extend one engine's tentative route, dispatching on the
    /// constructive variant.
    fn set_route(
        &self,
        start_time: &mut [f64],
        engine_idx: usize,
        pos_ini: usize,
    ) -> Vec<Candidate> {
        match self.kind {
            ConstructiveKind::PostModel => {
                super::postmodel::set_route(self, start_time, engine_idx, pos_ini)
            }
            ConstructiveKind::PreModel => {
                super::premodel::set_route(self, start_time, engine_idx, pos_ini)
            }
        }
    }

    /// Merge tentative per-engine routes into the final `solution.routes`.
    fn set_jobs(&mut self, solution: &mut Solution, routes: Vec<Vec<Candidate>>) {
        match self.kind {
            ConstructiveKind::PostModel => super::postmodel::set_jobs(self, solution, routes),
            ConstructiveKind::PreModel => super::premodel::set_jobs(self, solution, routes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_ordering_is_min_heap() {
        use std::collections::BinaryHeap;
        let mut heap = BinaryHeap::new();
        heap.push(Candidate {
            access_time: 5.0,
            engine: 0,
            stockpile: 0,
            activity: Activity::Reclaim,
        });
        heap.push(Candidate {
            access_time: 1.0,
            engine: 0,
            stockpile: 1,
            activity: Activity::Reclaim,
        });
        assert_eq!(heap.pop().unwrap().access_time, 1.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(1.0), 1.0);
    }
}
