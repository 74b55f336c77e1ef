//! Greedy constructive scheduler: turns blending-model mass decisions into
//! per-engine routes and a simulated timeline. See [`base::Constructive`]
//! for the shared skeleton and [`postmodel`]/[`premodel`] for the two
//! route-generation strategies.

pub mod base;
pub mod postmodel;
pub mod premodel;

pub use base::{Candidate, Constructive, ConstructiveKind};
