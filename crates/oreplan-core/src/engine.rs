//! Engine: a stacker/reclaimer running on a rail, serving a set of yards.

use crate::ids::EngineId;
use serde::{Deserialize, Serialize};

/// A stacking/reclaiming machine. Either speed may be zero, meaning the
/// engine cannot perform that role.
///
/// `pos_ini` is the engine's *configured* starting stockpile position for a
/// fresh run. The position that advances as routes are replayed is tracked
/// by [`crate::solution::Solution`], not here — `Problem` (and everything
/// in it, including `Engine`) is immutable for the lifetime of a run, so
/// the per-replay "current position" lives in the mutable solution state
/// instead of mutating this struct across move rollback boundaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engine {
    pub id: EngineId,
    #[serde(rename = "speedStack")]
    pub speed_stack: f64,
    #[serde(rename = "speedReclaim")]
    pub speed_reclaim: f64,
    #[serde(rename = "posIni")]
    pub pos_ini: usize,
    pub rail: u32,
    pub yards: Vec<usize>,
}

impl Engine {
    /// Whether this engine can visit a stockpile reachable only by `rail`.
    pub fn can_access_rail(&self, rail: u32) -> bool {
        self.rail == rail
    }

    pub fn can_stack(&self) -> bool {
        self.speed_stack > 0.0
    }

    pub fn can_reclaim(&self) -> bool {
        self.speed_reclaim > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_flags() {
        let e = Engine {
            id: EngineId::new(1),
            speed_stack: 0.0,
            speed_reclaim: 50.0,
            pos_ini: 0,
            rail: 1,
            yards: vec![1],
        };
        assert!(!e.can_stack());
        assert!(e.can_reclaim());
    }
}
