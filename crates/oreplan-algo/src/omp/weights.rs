//! Objective weights for the mass and input-transfer variables, and the
//! feedback-driven reweighting the outer loop applies between passes.

use oreplan_core::Rng;

/// Per-variable weights in the blending objective:
/// `w_x[i][k]` multiplies `x[i,k]`, `w_y[h][i]` multiplies `y[h,i]`.
/// Both default to 1 and are only changed by the feedback loop.
#[derive(Debug, Clone)]
pub struct OmpWeights {
    /// `[stockpile][request]`
    pub w_x: Vec<Vec<f64>>,
    /// `[input][stockpile]`
    pub w_y: Vec<Vec<f64>>,
}

impl OmpWeights {
    /// All weights set to 1, the default before any feedback pass.
    pub fn uniform(num_stockpiles: usize, num_requests: usize, num_inputs: usize) -> Self {
        Self {
            w_x: vec![vec![1.0; num_requests]; num_stockpiles],
            w_y: vec![vec![1.0; num_stockpiles]; num_inputs],
        }
    }

    /// Reweight `w_x` from a prior solution's reclaim matrix (`[k][i]`,
    /// i.e. `Solution::weights`): entries that were actually used get a
    /// random weight in `[1, 1000]` (encouraging reuse), everything else
    /// resets to 1 (discouraging previously-unused stockpiles).
    pub fn randomize_x(&mut self, prior: &[Vec<f64>], rng: &mut Rng) {
        let num_stockpiles = self.w_x.len();
        let num_requests = self.w_x.first().map_or(0, |r| r.len());
        self.w_x = vec![vec![1.0; num_requests]; num_stockpiles];
        for (k, row) in prior.iter().enumerate() {
            for (i, &mass) in row.iter().enumerate() {
                if i >= num_stockpiles || k >= num_requests {
                    continue;
                }
                self.w_x[i][k] = if mass > 0.0 {
                    rng.range_inclusive(1, 1000) as f64
                } else {
                    1.0
                };
            }
        }
    }

    /// Reweight `w_y` from a prior solution's input matrix (`[i][h]`, i.e.
    /// `Solution::input_weights`), analogous to [`Self::randomize_x`].
    pub fn randomize_y(&mut self, prior: &[Vec<f64>], rng: &mut Rng) {
        let num_inputs = self.w_y.len();
        let num_stockpiles = self.w_y.first().map_or(0, |r| r.len());
        self.w_y = vec![vec![1.0; num_stockpiles]; num_inputs];
        for (i, row) in prior.iter().enumerate() {
            for (h, &mass) in row.iter().enumerate() {
                if h >= num_inputs || i >= num_stockpiles {
                    continue;
                }
                self.w_y[h][i] = if mass > 0.0 {
                    rng.range_inclusive(1, 1000) as f64
                } else {
                    1.0
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_defaults_to_one() {
        let w = OmpWeights::uniform(2, 3, 1);
        assert!(w.w_x.iter().all(|row| row.iter().all(|&v| v == 1.0)));
        assert!(w.w_y.iter().all(|row| row.iter().all(|&v| v == 1.0)));
    }

    #[test]
    fn test_randomize_x_keeps_unused_at_one() {
        let mut w = OmpWeights::uniform(2, 2, 1);
        let mut rng = Rng::new(7);
        // request 0 used stockpile 0 only
        w.randomize_x(&[vec![50.0, 0.0], vec![0.0, 0.0]], &mut rng);
        assert!(w.w_x[0][0] >= 1.0 && w.w_x[0][0] <= 1000.0);
        assert_eq!(w.w_x[1][0], 1.0);
        assert_eq!(w.w_x[0][1], 1.0);
    }
}
