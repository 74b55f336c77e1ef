//! The immutable problem definition: stockpiles, engines, inputs, outputs,
//! travel matrices, and the blending objective weights.

use crate::engine::Engine;
use crate::input::Input;
use crate::output::OutputRequest;
use crate::stockpile::Stockpile;
use serde::{Deserialize, Serialize};

/// Name and the two blending-objective weights (ω₁ for limit deviation,
/// ω₂ for goal deviation), carried through to the solution for echoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInfo {
    pub name: String,
    pub omega_1: f64,
    pub omega_2: f64,
}

/// A full stockyard planning instance. Constructed once and never mutated
/// for the lifetime of a run; all per-run mutable state lives in
/// [`crate::solution::Solution`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub info: ProblemInfo,
    pub stockpiles: Vec<Stockpile>,
    pub engines: Vec<Engine>,
    pub inputs: Vec<Input>,
    pub outputs: Vec<OutputRequest>,
    #[serde(rename = "distancesTravel")]
    pub distances_travel: Vec<Vec<f64>>,
    #[serde(rename = "timeTravel")]
    pub time_travel: Vec<Vec<f64>>,
}

impl Problem {
    pub fn num_stockpiles(&self) -> usize {
        self.stockpiles.len()
    }

    pub fn num_engines(&self) -> usize {
        self.engines.len()
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Number of distinct quality parameters tracked by the first output
    /// request; every request is expected to carry the same parameter set
    /// in the same order (mirrors how the blending model indexes `j`).
    pub fn num_quality_params(&self) -> usize {
        self.outputs.first().map_or(0, |o| o.quality.len())
    }

    /// Validate structural invariants that the blending model and
    /// constructive scheduler both rely on. Called once after
    /// deserialization; not re-checked per iteration.
    pub fn validate(&self) -> Result<(), String> {
        let p = self.num_stockpiles();
        if self.distances_travel.len() != p || self.time_travel.len() != p {
            return Err(format!(
                "travel matrices must be {p}x{p}, got distances={}, time={}",
                self.distances_travel.len(),
                self.time_travel.len()
            ));
        }
        for (row_idx, row) in self.time_travel.iter().enumerate() {
            if row.len() != p {
                return Err(format!(
                    "timeTravel row {row_idx} has length {} expected {p}",
                    row.len()
                ));
            }
        }
        for stp in &self.stockpiles {
            if stp.weight_ini > stp.capacity {
                return Err(format!(
                    "stockpile {} initial mass {} exceeds capacity {}",
                    stp.id.value(),
                    stp.weight_ini,
                    stp.capacity
                ));
            }
        }
        for eng in &self.engines {
            if eng.pos_ini >= p {
                return Err(format!(
                    "engine {} starting position {} out of range",
                    eng.id.value(),
                    eng.pos_ini
                ));
            }
        }
        Ok(())
    }
}
