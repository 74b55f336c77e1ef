//! Quality parameters: a stockpile/input's as-is composition, and a
//! request's bounds on that composition.

use serde::{Deserialize, Serialize};

/// A single measured quality parameter (e.g. "Fe", "SiO2") and its value,
/// as carried by a stockpile's initial composition or an input's assay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    pub parameter: String,
    pub value: f64,
}

impl Quality {
    pub fn new(parameter: impl Into<String>, value: f64) -> Self {
        Self {
            parameter: parameter.into(),
            value,
        }
    }
}

/// A bound on one quality parameter for an output request: acceptable
/// range, a soft goal within it, and the relative importance used to
/// weight deviation penalties in the blending objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRequest {
    pub parameter: String,
    pub minimum: f64,
    pub maximum: f64,
    pub goal: f64,
    pub importance: u32,
}

impl QualityRequest {
    pub fn new(
        parameter: impl Into<String>,
        minimum: f64,
        maximum: f64,
        goal: f64,
        importance: u32,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            minimum,
            maximum,
            goal,
            importance,
        }
    }

    /// Normalizer for the upper-bound deviation: `max - goal`, clamped away
    /// from zero to avoid division by zero in the objective.
    pub fn upper_normalizer(&self) -> f64 {
        let d = self.maximum - self.goal;
        if d == 0.0 {
            1e-6
        } else {
            d
        }
    }

    /// Normalizer for the lower-bound deviation: `goal - min`, clamped
    /// away from zero.
    pub fn lower_normalizer(&self) -> f64 {
        let d = self.goal - self.minimum;
        if d == 0.0 {
            1e-6
        } else {
            d
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizer_clamps_zero() {
        let q = QualityRequest::new("Fe", 60.0, 60.0, 60.0, 1);
        assert_eq!(q.upper_normalizer(), 1e-6);
        assert_eq!(q.lower_normalizer(), 1e-6);
    }

    #[test]
    fn test_normalizer_normal_case() {
        let q = QualityRequest::new("Fe", 55.0, 65.0, 60.0, 3);
        assert_eq!(q.upper_normalizer(), 5.0);
        assert_eq!(q.lower_normalizer(), 5.0);
    }
}
