//! The Ore Mixing Problem: a linear blending model solved via `good_lp`.
//!
//! ## Formulation
//!
//! For `P` stockpiles, `E` inputs, `R` requests, `T` quality parameters:
//!
//! ```text
//! minimize    ω₁·D_limit + ω₂·D_goal + Σ wˣ·x + Σ wʸ·y
//!
//! subject to:
//!   Σᵢ y[h,i] ≤ input[h].weight                              (input capacity)
//!   Σ_h y[h,i] + stockpile[i].weight_ini ≤ stockpile[i].capacity   (stockpile capacity)
//!   Σ_k x[i,k] ≤ stockpile[i].weight_ini + y[h,i],  ∀(i,h)    (mass availability)
//!   Σᵢ x[i,k] = output[k].weight                              (demand)
//!   Σᵢ x[i,k]·(q[i,j] − min[j,k]) + a_min[j,k]·demand[k] ≥ 0   (lower deviation)
//!   Σᵢ x[i,k]·(q[i,j] − max[j,k]) − a_max[j,k]·demand[k] ≤ 0   (upper deviation)
//!   Σᵢ x[i,k]·(q[i,j] − goal[j,k]) + (b_min−b_max)[j,k]·demand[k] = 0  (goal deviation)
//! ```
//!
//! The mass-availability constraint is indexed by every input `h`, which
//! over-constrains stockpiles fed by more than one input. This mirrors the
//! original model exactly rather than silently correcting it — see the
//! crate-level design notes.

use good_lp::solvers::clarabel::clarabel;
use good_lp::{constraint, variable, Expression, Solution as LpSolution, SolverModel, Variable};
use oreplan_core::Problem;

use super::weights::OmpWeights;

/// Result of solving the blending model: the objective value (`None` if
/// infeasible/unbounded) and the two mass matrices.
#[derive(Debug, Clone, Default)]
pub struct OmpResult {
    pub objective: Option<f64>,
    /// `[request][stockpile]`
    pub weights: Vec<Vec<f64>>,
    /// `[stockpile][input]`
    pub input_weights: Vec<Vec<f64>>,
}

#[derive(Debug, thiserror::Error)]
pub enum OmpError {
    #[error("blending model has no stockpiles or no requests")]
    EmptyProblem,
    #[error("solver failed: {0}")]
    SolverFailed(String),
}

/// Solve the blending model for `problem` with the given variable weights.
///
/// Returns `Ok(OmpResult { objective: None, .. })` with empty matrices when
/// the model is infeasible or unbounded, matching the original's `(None,
/// {}, {})` return rather than surfacing an error — infeasibility here is
/// an expected outcome the caller (constructive/heuristic/driver) must
/// handle, not a solver malfunction.
pub fn solve_omp(problem: &Problem, weights: &OmpWeights) -> Result<OmpResult, OmpError> {
    let p = problem.num_stockpiles();
    let e = problem.num_inputs();
    let r = problem.num_outputs();
    let t = problem.num_quality_params();

    if p == 0 || r == 0 {
        return Err(OmpError::EmptyProblem);
    }

    let mut vars = good_lp::variables!();

    let x: Vec<Vec<Variable>> = (0..p)
        .map(|_| (0..r).map(|_| vars.add(variable().min(0.0))).collect())
        .collect();
    let y: Vec<Vec<Variable>> = (0..e)
        .map(|_| (0..p).map(|_| vars.add(variable().min(0.0))).collect())
        .collect();
    let a_min: Vec<Vec<Variable>> = (0..t)
        .map(|_| (0..r).map(|_| vars.add(variable().min(0.0))).collect())
        .collect();
    let a_max: Vec<Vec<Variable>> = (0..t)
        .map(|_| (0..r).map(|_| vars.add(variable().min(0.0))).collect())
        .collect();
    let b_min: Vec<Vec<Variable>> = (0..t)
        .map(|_| (0..r).map(|_| vars.add(variable().min(0.0))).collect())
        .collect();
    let b_max: Vec<Vec<Variable>> = (0..t)
        .map(|_| (0..r).map(|_| vars.add(variable().min(0.0))).collect())
        .collect();

    // deviation terms of the objective
    let mut d_limit = Expression::from(0.0);
    let mut d_goal = Expression::from(0.0);
    for k in 0..r {
        let out = &problem.outputs[k];
        for (j, req) in out.quality.iter().enumerate().take(t) {
            let lower_n = req.lower_normalizer();
            let upper_n = req.upper_normalizer();
            d_limit += req.importance as f64 * a_min[j][k] / lower_n;
            d_limit += req.importance as f64 * a_max[j][k] / upper_n;
            d_goal += (b_min[j][k] + b_max[j][k]) / lower_n.min(upper_n);
        }
    }

    let mut r_scheduling = Expression::from(0.0);
    for i in 0..p {
        for k in 0..r {
            r_scheduling += weights.w_x[i][k] * x[i][k];
        }
    }
    let mut i_scheduling = Expression::from(0.0);
    for h in 0..e {
        for i in 0..p {
            i_scheduling += weights.w_y[h][i] * y[h][i];
        }
    }

    let objective = problem.info.omega_1 * d_limit
        + problem.info.omega_2 * d_goal
        + r_scheduling
        + i_scheduling;

    let mut model = vars.minimise(objective).using(clarabel);

    for h in 0..e {
        let cap = Expression::sum((0..p).map(|i| y[h][i]));
        model = model.with(constraint!(cap <= problem.inputs[h].weight));
    }

    for i in 0..p {
        let stp = &problem.stockpiles[i];
        let inflow = Expression::sum((0..e).map(|h| y[h][i]));
        model = model.with(constraint!(inflow + stp.weight_ini <= stp.capacity));

        for h in 0..e {
            let reclaimed = Expression::sum((0..r).map(|k| x[i][k]));
            model = model.with(constraint!(reclaimed <= stp.weight_ini + y[h][i]));
        }
    }

    for k in 0..r {
        let out = &problem.outputs[k];
        let demand = Expression::sum((0..p).map(|i| x[i][k]));
        model = model.with(constraint!(demand == out.weight));

        for (j, req) in out.quality.iter().enumerate().take(t) {
            let lower: Expression = (0..p)
                .map(|i| {
                    let q = problem.stockpiles[i]
                        .quality_ini
                        .get(j)
                        .map_or(0.0, |qi| qi.value);
                    x[i][k] * (q - req.minimum)
                })
                .sum();
            model = model.with(constraint!(lower + a_min[j][k] * out.weight >= 0.0));

            let upper: Expression = (0..p)
                .map(|i| {
                    let q = problem.stockpiles[i]
                        .quality_ini
                        .get(j)
                        .map_or(0.0, |qi| qi.value);
                    x[i][k] * (q - req.maximum)
                })
                .sum();
            model = model.with(constraint!(upper - a_max[j][k] * out.weight <= 0.0));

            let goal: Expression = (0..p)
                .map(|i| {
                    let q = problem.stockpiles[i]
                        .quality_ini
                        .get(j)
                        .map_or(0.0, |qi| qi.value);
                    x[i][k] * (q - req.goal)
                })
                .sum();
            model = model
                .with(constraint!(goal + (b_min[j][k] - b_max[j][k]) * out.weight == 0.0));
        }
    }

    let solution = match model.solve() {
        Ok(s) => s,
        Err(_) => {
            return Ok(OmpResult::default());
        }
    };

    let weight_matrix: Vec<Vec<f64>> = (0..r)
        .map(|k| (0..p).map(|i| solution.value(x[i][k])).collect())
        .collect();
    let input_matrix: Vec<Vec<f64>> = (0..p)
        .map(|i| (0..e).map(|h| solution.value(y[h][i])).collect())
        .collect();

    // Recompute the objective from solved variable values rather than
    // `Expression::eval`, so the reported value matches exactly what the
    // weight matrices above represent.
    let mut objective_value = 0.0;
    for k in 0..r {
        let out = &problem.outputs[k];
        for (j, req) in out.quality.iter().enumerate().take(t) {
            let lower_n = req.lower_normalizer();
            let upper_n = req.upper_normalizer();
            let a_min_v = solution.value(a_min[j][k]);
            let a_max_v = solution.value(a_max[j][k]);
            let b_min_v = solution.value(b_min[j][k]);
            let b_max_v = solution.value(b_max[j][k]);
            objective_value += problem.info.omega_1
                * req.importance as f64
                * (a_min_v / lower_n + a_max_v / upper_n);
            objective_value +=
                problem.info.omega_2 * (b_min_v + b_max_v) / lower_n.min(upper_n);
        }
    }
    for i in 0..p {
        for k in 0..r {
            objective_value += weights.w_x[i][k] * weight_matrix[k][i];
        }
    }
    for i in 0..p {
        for h in 0..e {
            objective_value += weights.w_y[h][i] * input_matrix[i][h];
        }
    }

    Ok(OmpResult {
        objective: Some(objective_value),
        weights: weight_matrix,
        input_weights: input_matrix,
    })
}
