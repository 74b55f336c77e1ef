//! The mutable solution aggregate.
//!
//! A `Solution` owns the blending mass decisions, per-engine routes and
//! clocks, the stack/reclaim event logs, and the scalar cost. It is built
//! once per run and mutated throughout: the constructive scheduler resets
//! and repopulates the event logs on every rebuild, while routes and mass
//! decisions persist across those resets until a neighborhood move changes
//! them.
//!
//! Engine starting positions are tracked here (`engine_position`) rather
//! than mutated on [`crate::engine::Engine`] itself, so that `Problem`
//! stays immutable for the run's lifetime — see the design note on
//! `pos_ini` mutation.

use crate::error::{OrePlanError, OrePlanResult};
use crate::problem::Problem;
use serde::{Deserialize, Serialize};

/// The operation tag of a route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Reclaim,
    Stack,
    Both,
}

/// One scheduled stop in an engine's route: a stockpile index and what to
/// do there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub stockpile: usize,
    pub activity: Activity,
}

impl RouteEntry {
    pub fn new(stockpile: usize, activity: Activity) -> Self {
        Self { stockpile, activity }
    }
}

/// A route is the ordered list of stops for a single engine.
pub type Route = Vec<RouteEntry>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackEvent {
    pub weight: f64,
    pub stockpile: usize,
    pub engine: usize,
    pub start_time: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReclaimEvent {
    pub weight: f64,
    pub stockpile: usize,
    pub engine: usize,
    pub start_time: f64,
    pub duration: f64,
    pub output: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryQuality {
    pub parameter: String,
    pub value: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub goal: f64,
    pub importance: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub weight: f64,
    pub start_time: f64,
    pub duration: f64,
    pub quality: Vec<DeliveryQuality>,
}

/// The mutable solution state shared by the blending model, constructive
/// scheduler, and neighborhood moves.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Blending (OMP) objective value, `None` if infeasible.
    pub objective: Option<f64>,
    /// `weights[k][i]` = mass reclaimed from stockpile i for request k.
    pub weights: Vec<Vec<f64>>,
    /// `input_weights[i][h]` = mass transferred from input h into stockpile i.
    pub input_weights: Vec<Vec<f64>>,

    /// Scheduling cost (the current request's completion time).
    pub cost: f64,
    /// Per-engine ordered route.
    pub routes: Vec<Route>,
    /// Per-engine clock: the time at which the engine becomes free.
    pub engine_clock: Vec<f64>,
    /// Per-engine current stockpile position (see module docs).
    pub engine_position: Vec<usize>,
    /// Per-request gap: `1 - optimal_duration / observed_duration`.
    pub gap: Vec<f64>,

    pub stacks: Vec<StackEvent>,
    pub reclaims: Vec<ReclaimEvent>,
    pub deliveries: Vec<Delivery>,
    has_deliveries: bool,
}

impl Solution {
    /// Construct an empty solution bound to `problem`'s engine positions.
    pub fn new(problem: &Problem) -> Self {
        let num_engines = problem.num_engines();
        Self {
            objective: None,
            weights: Vec::new(),
            input_weights: Vec::new(),
            cost: f64::INFINITY,
            routes: vec![Vec::new(); num_engines],
            engine_clock: vec![0.0; num_engines],
            engine_position: problem.engines.iter().map(|e| e.pos_ini).collect(),
            gap: vec![1.0; problem.num_outputs()],
            stacks: Vec::new(),
            reclaims: Vec::new(),
            deliveries: Vec::new(),
            has_deliveries: false,
        }
    }

    /// Store the blending model's result.
    pub fn set_objective(
        &mut self,
        objective: Option<f64>,
        weights: Vec<Vec<f64>>,
        input_weights: Vec<Vec<f64>>,
    ) {
        self.objective = objective;
        self.weights = weights;
        self.input_weights = input_weights;
    }

    /// Clear the event logs ahead of a constructive rebuild. Routes,
    /// clocks, and mass decisions are preserved.
    pub fn reset_events(&mut self) {
        self.stacks.clear();
        self.reclaims.clear();
        self.deliveries.clear();
        self.has_deliveries = false;
    }

    /// Reset every engine's clock to zero, as done once per output request
    /// at the start of a constructive run.
    pub fn reset_clocks(&mut self) {
        for c in &mut self.engine_clock {
            *c = 0.0;
        }
    }

    /// The `(start, end)` window of reclaim activity for a given output
    /// request index.
    pub fn work_time(&self, output_idx: usize) -> OrePlanResult<(f64, f64)> {
        let mut start = f64::INFINITY;
        let mut end = f64::NEG_INFINITY;
        let mut any = false;
        for ev in &self.reclaims {
            if ev.output == output_idx {
                any = true;
                start = start.min(ev.start_time);
                end = end.max(ev.start_time + ev.duration);
            }
        }
        if !any {
            return Err(OrePlanError::InvalidState(
                "work_time() called for an output with no reclaim events".into(),
            ));
        }
        Ok((start, end))
    }

    /// Recompute `cost` from the current reclaim events for `output_idx`.
    pub fn update_cost(&mut self, output_idx: usize) -> OrePlanResult<()> {
        self.cost = self.work_time(output_idx)?.1;
        Ok(())
    }

    /// Compute per-request delivered quality, gap, and delivery summaries
    /// from the current mass decisions and event logs.
    ///
    /// Mirrors the original's `__quality_mean`: the delivered value of
    /// parameter `j` for request `k` is the mass-weighted average of
    /// `quality_ini[i][j]` over stockpiles, weighted by `weights[k][i]`. A
    /// request with zero total reclaimed mass (model infeasible or
    /// unbounded) is reported as an error rather than silently producing
    /// NaN.
    pub fn set_deliveries(&mut self, problem: &Problem) -> OrePlanResult<()> {
        if self.objective.is_none() {
            return Err(OrePlanError::Infeasible(
                "blending model produced no feasible solution".into(),
            ));
        }
        if self.weights.is_empty() {
            return Err(OrePlanError::InvalidState(
                "set_deliveries() called with an empty weight matrix".into(),
            ));
        }

        self.deliveries.clear();

        for (k, out) in problem.outputs.iter().enumerate() {
            let weights_k = &self.weights[k];
            let total: f64 = weights_k.iter().sum();
            if total <= 0.0 {
                return Err(OrePlanError::Infeasible(
                    "the model is infeasible or unbounded".into(),
                ));
            }

            let mut quality_report = Vec::with_capacity(out.quality.len());
            for (j, req) in out.quality.iter().enumerate() {
                let mut acc = 0.0;
                for (i, stp) in problem.stockpiles.iter().enumerate() {
                    let w = weights_k.get(i).copied().unwrap_or(0.0);
                    let q = stp.quality_ini.get(j).map(|q| q.value).unwrap_or(0.0);
                    acc += w * q;
                }
                let value = (acc / total * 100.0).round() / 100.0;
                quality_report.push(DeliveryQuality {
                    parameter: req.parameter.clone(),
                    value,
                    minimum: req.minimum,
                    maximum: req.maximum,
                    goal: req.goal,
                    importance: req.importance,
                });
            }

            let (start, end) = self.work_time(k)?;
            let total_reclaim_speed: f64 =
                problem.engines.iter().map(|e| e.speed_reclaim).sum();
            let optimal_duration = if total_reclaim_speed > 0.0 {
                out.weight / total_reclaim_speed
            } else {
                0.0
            };
            let observed = end - start;
            self.gap[k] = if observed > 0.0 {
                ((1.0 - optimal_duration / observed) * 100.0).round() / 100.0
            } else {
                1.0
            };

            self.deliveries.push(Delivery {
                weight: out.weight,
                start_time: start,
                duration: ((end - start) * 100.0).round() / 100.0,
                quality: quality_report,
            });
        }

        self.has_deliveries = true;
        Ok(())
    }

    pub fn has_deliveries(&self) -> bool {
        self.has_deliveries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::ids::EngineId;
    use crate::ids::{OutputId, StockpileId};
    use crate::output::OutputRequest;
    use crate::quality::{Quality, QualityRequest};
    use crate::stockpile::Stockpile;

    fn simple_problem() -> Problem {
        Problem {
            info: crate::problem::ProblemInfo {
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
                weight_ini: 100.0,
                quality_ini: vec![Quality::new("Fe", 60.0)],
            }],
            engines: vec![Engine {
                id: EngineId::new(1),
                speed_stack: 50.0,
                speed_reclaim: 50.0,
                pos_ini: 0,
                rail: 1,
                yards: vec![1],
            }],
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
    fn test_work_time_requires_events() {
        let problem = simple_problem();
        let sol = Solution::new(&problem);
        assert!(sol.work_time(0).is_err());
    }

    #[test]
    fn test_set_deliveries_computes_quality_and_gap() {
        let problem = simple_problem();
        let mut sol = Solution::new(&problem);
        sol.set_objective(Some(0.0), vec![vec![50.0]], vec![vec![]]);
        sol.reclaims.push(ReclaimEvent {
            weight: 50.0,
            stockpile: 0,
            engine: 0,
            start_time: 0.0,
            duration: 1.0,
            output: 0,
        });

        sol.set_deliveries(&problem).unwrap();
        assert_eq!(sol.deliveries.len(), 1);
        assert_eq!(sol.deliveries[0].quality[0].value, 60.0);
        assert_eq!(sol.gap[0], 0.0);
    }

    #[test]
    fn test_set_deliveries_rejects_zero_mass() {
        let problem = simple_problem();
        let mut sol = Solution::new(&problem);
        sol.set_objective(Some(0.0), vec![vec![0.0]], vec![vec![]]);
        assert!(sol.set_deliveries(&problem).is_err());
    }
}
