//! Input: incoming ore that may be stacked into stockpiles.

use crate::ids::InputId;
use crate::quality::Quality;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
    pub id: InputId,
    pub weight: f64,
    pub quality: Vec<Quality>,
    pub time: f64,
}
