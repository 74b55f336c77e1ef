//! The outer feedback loop: reweight the blending model from the current
//! mass pattern, re-solve, rebuild the routes, and (if a heuristic driver
//! is configured) re-run it with the prior incumbent preserved.

use oreplan_core::{OrePlanError, OrePlanResult, Problem, Rng, Solution};

use crate::constructive::Constructive;
use crate::heuristic::HeuristicDriver;
use crate::omp::{solve_omp, OmpWeights};

/// Run `iterations` feedback passes, mutating `solution` in place and
/// returning it for convenience. `weights` carries over between passes
/// (each pass reweights it from the previous pass's mass decisions), and
/// `heuristic`, if present, runs with `best_known = true` on every pass so
/// its incumbent is never reset by a worse intermediate solution.
pub fn run_feedback_loop(
    problem: &Problem,
    solution: &mut Solution,
    constructive: &mut Constructive,
    weights: &mut OmpWeights,
    heuristic: Option<&mut HeuristicDriver>,
    rng: &mut Rng,
    iterations: u32,
    max_iters: u32,
) -> OrePlanResult<()> {
    let mut heuristic = heuristic;

    for _ in 0..iterations {
        weights.randomize_x(&solution.weights, rng);
        weights.randomize_y(&solution.input_weights, rng);

        let result = solve_omp(problem, weights)
            .map_err(|e| OrePlanError::Solver(e.to_string()))?;
        solution.set_objective(result.objective, result.weights, result.input_weights);
        if solution.objective.is_none() {
            return Err(OrePlanError::Infeasible(
                "feedback pass produced an infeasible blending model".into(),
            ));
        }

        constructive.reset_inputs(solution);
        constructive.run(solution, false)?;

        if let Some(driver) = heuristic.as_deref_mut() {
            let best = driver.run(solution, constructive, rng, max_iters, true)?;
            *solution = best;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oreplan_core::ids::{EngineId, OutputId, StockpileId};
    use oreplan_core::{Engine, OutputRequest, ProblemInfo, Quality, QualityRequest, Stockpile};

    fn simple_problem() -> Problem {
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
    fn test_feedback_loop_runs_without_heuristic() {
        use crate::constructive::ConstructiveKind;

        let problem = simple_problem();
        let mut solution = Solution::new(&problem);
        let mut weights = OmpWeights::uniform(1, 1, 0);
        let mut rng = Rng::new(1);

        let result = solve_omp(&problem, &weights).unwrap();
        solution.set_objective(result.objective, result.weights, result.input_weights);

        let mut constructive = Constructive::new(&problem, &solution, ConstructiveKind::PostModel);
        constructive.run(&mut solution, false).unwrap();

        run_feedback_loop(
            &problem,
            &mut solution,
            &mut constructive,
            &mut weights,
            None,
            &mut rng,
            2,
            10,
        )
        .unwrap();

        assert!(solution.objective.is_some());
    }
}
