//! JSON I/O for the problem instance and solution record. Kept out of
//! `oreplan-core` per its explicit non-goals; the core only needs the
//! `Serialize`/`Deserialize` impls already on its types.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use oreplan_core::solution::{Delivery, ReclaimEvent, StackEvent};
use oreplan_core::{Problem, ProblemInfo, Solution};
use serde::Serialize;

pub fn read_problem(path: impl AsRef<Path>) -> Result<Problem> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading problem instance from {}", path.display()))?;
    let problem: Problem = serde_json::from_str(&raw)
        .with_context(|| format!("parsing problem instance from {}", path.display()))?;
    problem
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid problem instance: {e}"))?;
    Ok(problem)
}

/// The on-disk solution record: the problem's echoed `info`, the blending
/// objective, per-request gap, the raw event lists, and the per-request
/// delivery summary built by `Solution::set_deliveries`.
#[derive(Debug, Serialize)]
pub struct SolutionRecord<'a> {
    pub info: &'a ProblemInfo,
    pub objective: Option<f64>,
    pub gap: &'a [f64],
    pub stacks: &'a [StackEvent],
    pub reclaims: &'a [ReclaimEvent],
    pub outputs: &'a [Delivery],
}

pub fn write_solution(path: impl AsRef<Path>, problem: &Problem, solution: &Solution) -> Result<()> {
    if !solution.has_deliveries() {
        anyhow::bail!("write_solution called before Solution::set_deliveries");
    }
    let record = SolutionRecord {
        info: &problem.info,
        objective: solution.objective,
        gap: &solution.gap,
        stacks: &solution.stacks,
        reclaims: &solution.reclaims,
        outputs: &solution.deliveries,
    };
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&record)
        .context("serializing solution record")?;
    fs::write(path, json).with_context(|| format!("writing solution to {}", path.display()))?;
    Ok(())
}
