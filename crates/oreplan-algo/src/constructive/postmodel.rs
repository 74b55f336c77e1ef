//! Mass-aware greedy route construction: only stockpiles with positive
//! intended reclaim mass for the current request are candidates, and the
//! merge step lets a stack-only and reclaim-only visit to the same
//! stockpile combine into a single `Both` entry.

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
    let output_id = c
        .output_id
        .expect("set_route called before output_id was assigned");
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
            .filter(|&i| !visited[i] && c.weights[output_id][i] > 0.0)
            .map(|i| (c.problem.time_travel[pos][i] + start_time[engine_idx], i))
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let Some((faster, i)) = candidate else {
            break;
        };

        let mut duration = if engine.can_reclaim() {
            ((c.weights[output_id][i] / engine.speed_reclaim) * 10.0).round() / 10.0
        } else {
            0.0
        };

        let mut activity = Activity::Reclaim;
        if c.inputs[i] > 0.0 {
            let setup = if engine.can_reclaim() {
                c.problem.time_travel[i][i]
            } else {
                0.0
            };
            if engine.can_stack() {
                duration += ((c.inputs[i] / engine.speed_stack) * 10.0).round() / 10.0 + setup;
                activity = if engine.can_reclaim() {
                    Activity::Both
                } else {
                    Activity::Stack
                };
            }
        }

        if duration > 0.0 {
            start_time[engine_idx] += duration + faster;
            route.push(Candidate {
                access_time: faster,
                engine: engine_idx,
                stockpile: i,
                activity,
            });
        }

        visited[i] = true;
        pos = i;
    }

    route
}

/// Merge all engines' tentative candidates into the final routes via a
/// min-heap keyed by access time, applying the stack/reclaim upgrade rule
/// when the same stockpile is drawn by more than one tentative entry.
pub fn set_jobs(c: &mut Constructive, solution: &mut Solution, routes: Vec<Vec<Candidate>>) {
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::new();
    for r in routes {
        heap.extend(r);
    }

    let mut marker: Vec<Option<Activity>> = vec![None; c.problem.num_stockpiles()];

    while let Some(cand) = heap.pop() {
        let stp = cand.stockpile;
        match marker[stp] {
            Some(Activity::Both) => continue,
            Some(Activity::Stack) if cand.activity == Activity::Both => {
                solution.routes[cand.engine].push(RouteEntry::new(stp, Activity::Reclaim));
                marker[stp] = Some(Activity::Both);
            }
            Some(Activity::Reclaim) if cand.activity == Activity::Both => {
                solution.routes[cand.engine].push(RouteEntry::new(stp, Activity::Stack));
                marker[stp] = Some(Activity::Both);
            }
            Some(existing) if existing == cand.activity => {}
            _ => {
                solution.routes[cand.engine].push(RouteEntry::new(stp, cand.activity));
                marker[stp] = Some(cand.activity);
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
                weight: 100.0,
                quality: vec![QualityRequest::new("Fe", 55.0, 65.0, 60.0, 1)],
                time: 0.0,
            }],
            distances_travel: vec![vec![0.0, 10.0], vec![10.0, 0.0]],
            time_travel: vec![vec![0.0, 10.0], vec![10.0, 0.0]],
        }
    }

    #[test]
    fn test_set_route_picks_nearest_unvisited_stockpile_with_mass() {
        let problem = two_stockpile_problem();
        let mut solution = Solution::new(&problem);
        solution.set_objective(Some(0.0), vec![vec![50.0, 50.0]], vec![vec![], vec![]]);
        let mut c = Constructive::new(&problem, &solution, ConstructiveKind::PostModel);
        c.output_id = Some(0);

        let mut start_time = vec![0.0];
        let route = set_route(&c, &mut start_time, 0, 0);

        assert_eq!(route.len(), 2);
        assert_eq!(route[0].stockpile, 0);
        assert_eq!(route[1].stockpile, 1);
        assert!(route.iter().all(|r| r.activity == Activity::Reclaim));
    }

    #[test]
    fn test_set_jobs_merges_duplicate_stockpile_visits_to_both() {
        let problem = two_stockpile_problem();
        let solution_template = Solution::new(&problem);
        let mut c = Constructive::new(&problem, &solution_template, ConstructiveKind::PostModel);
        c.output_id = Some(0);
        let mut solution = solution_template;
        solution.routes = vec![Vec::new()];

        let routes = vec![vec![
            Candidate {
                access_time: 1.0,
                engine: 0,
                stockpile: 0,
                activity: Activity::Stack,
            },
            Candidate {
                access_time: 2.0,
                engine: 0,
                stockpile: 0,
                activity: Activity::Reclaim,
            },
        ]];

        set_jobs(&mut c, &mut solution, routes);

        assert_eq!(solution.routes[0].len(), 2);
        assert!(solution.routes[0].iter().any(|e| e.activity == Activity::Stack));
        assert!(solution.routes[0].iter().any(|e| e.activity == Activity::Reclaim));
    }
}
