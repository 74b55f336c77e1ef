//! Stockpile: a pile of pre-blended ore at a fixed yard position.

use crate::ids::StockpileId;
use crate::quality::Quality;
use serde::{Deserialize, Serialize};

/// A stockpile reachable by a subset of rails, with a fixed capacity and
/// an initial mass and composition.
///
/// Invariant: `weight_ini <= capacity`. Reclaimed mass across all requests
/// from this stockpile must not exceed `weight_ini` plus whatever has been
/// stacked into it (enforced by the blending model, see
/// [`oreplan_algo::omp`](../../oreplan_algo/omp/index.html)).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stockpile {
    pub id: StockpileId,
    pub position: usize,
    pub yard: usize,
    pub rails: Vec<u32>,
    pub capacity: f64,
    #[serde(rename = "weightIni")]
    pub weight_ini: f64,
    #[serde(rename = "qualityIni")]
    pub quality_ini: Vec<Quality>,
}

impl Stockpile {
    /// Whether `rail` can access this stockpile.
    pub fn reachable_by(&self, rail: u32) -> bool {
        self.rails.contains(&rail)
    }

    /// The as-stacked value of a named quality parameter, or `None` if the
    /// stockpile carries no reading for it.
    pub fn quality_value(&self, parameter: &str) -> Option<f64> {
        self.quality_ini
            .iter()
            .find(|q| q.parameter == parameter)
            .map(|q| q.value)
    }
}
