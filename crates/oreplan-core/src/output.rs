//! Output request: a demand for a quantity of ore meeting quality bounds.

use crate::ids::OutputId;
use crate::quality::QualityRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputRequest {
    pub id: OutputId,
    pub destination: String,
    pub weight: f64,
    pub quality: Vec<QualityRequest>,
    pub time: f64,
}
