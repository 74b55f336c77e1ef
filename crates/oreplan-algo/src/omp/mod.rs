//! Blending model (Ore Mixing Problem): a MILP relaxed to an LP over
//! continuous mass and deviation variables, solved with `good_lp`.

mod solver;
mod weights;

pub use solver::{solve_omp, OmpError, OmpResult};
pub use weights::OmpWeights;
