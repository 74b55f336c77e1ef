//! Route-first greedy construction: every accessible stockpile is
//! enumerated regardless of whether it carries any intended reclaim mass
//! for the current request, every entry is tagged `Reclaim`, and no
//! stack/reclaim merge upgrade is applied. A feedback matrix tracking
//! which stockpiles were actually visited is built alongside, meant to
//! feed back into the blending model's `wˣ` weights on a subsequent solve.
//!
//! This intentionally produces zero-duration entries in `build` for
//! stockpiles with no real work — see the design note on PreModel's
//! unfiltered route generator.

use super::base::{Candidate, Constructive};
use oreplan_core::solution::{Activity, RouteEntry, Solution};
use std::collections::BinaryHeap;

pub fn set_route(
    c: &Constructive,
    start_time: &mut [f64],
    engine_idx: usize,
    pos_ini: usize,
) -> Vec<Candidate> {
    let engine = &c.problem.engines[engine_idx];
    let p = c.problem.num_stockpiles();

    let mut visited = vec![false; p];
    for i in 0..p {
        if !c.problem.stockpiles[i].reachable_by(engine.rail) {
            visited[i] = true;
        }
    }

    let mut route = Vec::new();
    let mut pos = pos_ini;

    while visited.iter().any(|&v| !v) {
        let candidate = (0..p)
            .filter(|&i| !visited[i])
            .map(|i| (c.problem.time_travel[pos][i] + start_time[engine_idx], i))
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let Some((faster, i)) = candidate else {
            break;
        };

        start_time[engine_idx] += faster;
        route.push(Candidate {
            access_time: faster,
            engine: engine_idx,
            stockpile: i,
            activity: Activity::Reclaim,
        });

        visited[i] = true;
        pos = i;
    }

    route
}

/// Merge tentative entries in access-time order with no upgrade rule, then
/// mark every visited stockpile as `1` (cheap) in the feedback matrix for
/// the current output request, leaving unvisited ones at the `1e3`
/// (discouraged) default.
pub fn set_jobs(c: &mut Constructive, solution: &mut Solution, routes: Vec<Vec<Candidate>>) {
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::new();
    for r in routes {
        heap.extend(r);
    }

    while let Some(cand) = heap.pop() {
        solution.routes[cand.engine].push(RouteEntry::new(cand.stockpile, cand.activity));
    }

    let output_id = c
        .output_id
        .expect("set_jobs called before output_id was assigned");
    if let Some(feedback) = c.feedback.as_mut() {
        for route in &solution.routes {
            for entry in route {
                feedback[output_id][entry.stockpile] = 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::base::ConstructiveKind;
    use oreplan_core::ids::{EngineId, OutputId, StockpileId};
    use oreplan_core::{Engine, OutputRequest, Problem, ProblemInfo, QualityRequest, Solution, Stockpile};

    fn two_stockpile_problem() -> Problem {
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
                weight: 50.0,
                quality: vec![QualityRequest::new("Fe", 55.0, 65.0, 60.0, 1)],
                time: 0.0,
            }],
            distances_travel: vec![vec![0.0, 10.0], vec![10.0, 0.0]],
            time_travel: vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        }
    }

    #[test]
    fn test_set_route_visits_every_accessible_stockpile_regardless_of_mass() {
        let problem = two_stockpile_problem();
        let mut solution = Solution::new(&problem);
        // only stockpile 0 has intended mass; PreModel should still visit both
        solution.set_objective(Some(0.0), vec![vec![50.0, 0.0]], vec![vec![], vec![]]);
        let mut c = Constructive::new(&problem, &solution, ConstructiveKind::PreModel);
        c.output_id = Some(0);

        let mut start_time = vec![0.0];
        let route = set_route(&c, &mut start_time, 0, 0);

        assert_eq!(route.len(), 2);
        assert!(route.iter().all(|r| r.activity == Activity::Reclaim));
    }

    #[test]
    fn test_set_jobs_marks_visited_stockpiles_in_feedback_matrix() {
        let problem = two_stockpile_problem();
        let solution_template = Solution::new(&problem);
        let mut c = Constructive::new(&problem, &solution_template, ConstructiveKind::PreModel);
        c.output_id = Some(0);
        let mut solution = solution_template;
        solution.routes = vec![Vec::new()];

        let routes = vec![vec![Candidate {
            access_time: 1.0,
            engine: 0,
            stockpile: 1,
            activity: Activity::Reclaim,
        }]];

        set_jobs(&mut c, &mut solution, routes);

        let feedback = c.feedback.as_ref().unwrap();
        assert_eq!(feedback[0][1], 1.0);
        assert_eq!(feedback[0][0], 1e3);
    }
}
