//! Switch: exchange the positions of two jobs within a single engine's
//! route, in place.

use oreplan_core::solution::Solution;
use oreplan_core::{OrePlanResult, Rng};

use super::{pick_engine, rebuild_and_measure, MoveCore};
use crate::constructive::Constructive;

#[derive(Debug, Clone)]
pub struct Switch {
    smart: bool,
    pub core: MoveCore,
    engine: usize,
    idx1: usize,
    idx2: usize,
}

impl Switch {
    pub fn new(smart: bool) -> Self {
        Self {
            smart,
            core: MoveCore::default(),
            engine: 0,
            idx1: 0,
            idx2: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        if self.smart {
            "SmartSwitch"
        } else {
            "Switch"
        }
    }

    fn pick_indices(&mut self, solution: &Solution, rng: &mut Rng) {
        let len = solution.routes[self.engine].len();
        if len > 1 {
            self.idx1 = rng.below(len);
            loop {
                self.idx2 = rng.below(len);
                if self.idx2 != self.idx1 {
                    break;
                }
            }
        }
    }

    pub fn reset(&mut self, solution: &Solution, rng: &mut Rng) {
        self.engine = pick_engine(self.smart, solution, rng);
        self.pick_indices(solution, rng);
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
            self.pick_indices(solution, rng);
            solution.routes[self.engine].swap(self.idx1, self.idx2);
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
        if self.idx1 < route.len() && self.idx2 < route.len() {
            route.swap(self.idx1, self.idx2);
        }
        constructive.run(solution, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::ConstructiveKind;
    use oreplan_core::ids::{EngineId, OutputId, StockpileId};
    use oreplan_core::solution::{Activity, RouteEntry};
    use oreplan_core::{Engine, OutputRequest, Problem, ProblemInfo, QualityRequest, Stockpile};

    fn two_stockpile_one_engine_problem() -> Problem {
        Problem {
            info: ProblemInfo {
                name: "t".into(),
                omega_1: 1.0,
                omega_2: 1.0,
            },
            stockpiles: vec![
                Stockpile {
                    id: StockpileId::new(1),
                    position: 0,
                    yard: 1,
                    rails: vec![1],
                    capacity: 100.0,
                    weight_ini: 80.0,
                    quality_ini: vec![],
                },
                Stockpile {
                    id: StockpileId::new(2),
                    position: 1,
                    yard: 1,
                    rails: vec![1],
                    capacity: 100.0,
                    weight_ini: 80.0,
                    quality_ini: vec![],
                },
            ],
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
                weight: 100.0,
                quality: vec![QualityRequest::new("Fe", 55.0, 65.0, 60.0, 1)],
                time: 0.0,
            }],
            distances_travel: vec![vec![0.0, 10.0], vec![10.0, 0.0]],
            time_travel: vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        }
    }

    #[test]
    fn test_reject_restores_route_and_cost_after_do_move() {
        let problem = two_stockpile_one_engine_problem();
        let mut solution = Solution::new(&problem);
        solution.set_objective(Some(0.0), vec![vec![60.0, 40.0]], vec![vec![], vec![]]);
        solution.routes = vec![vec![
            RouteEntry::new(0, Activity::Reclaim),
            RouteEntry::new(1, Activity::Reclaim),
        ]];

        let mut constructive = Constructive::new(&problem, &solution, ConstructiveKind::PostModel);
        constructive.output_id = Some(0);
        constructive.run(&mut solution, true).unwrap();

        let original_routes = solution.routes.clone();
        let original_cost = solution.cost;

        let mut rng = Rng::new(3);
        let mut mv = Switch::new(false);
        mv.engine = 0;

        mv.do_move(&mut solution, &mut constructive, &mut rng).unwrap();

        mv.reject(&mut solution, &mut constructive).unwrap();

        assert_eq!(solution.routes, original_routes);
        assert!((solution.cost - original_cost).abs() < 1e-9);
    }
}
