//! # oreplan-core: stockyard planning domain model
//!
//! Defines the immutable [`Problem`] (stockpiles, engines, inputs, output
//! requests, travel matrices) and the mutable [`Solution`] aggregate that
//! the blending model, constructive scheduler, and neighborhood moves in
//! `oreplan-algo` operate on.
//!
//! ## Example
//!
//! ```ignore
//! use oreplan_core::{Problem, Solution};
//!
//! let problem: Problem = serde_json::from_str(&data)?;
//! problem.validate().map_err(OrePlanError::Validation)?;
//! let solution = Solution::new(&problem);
//! ```

pub mod engine;
pub mod error;
pub mod ids;
pub mod input;
pub mod output;
pub mod problem;
pub mod quality;
pub mod rng;
pub mod solution;
pub mod stockpile;

pub use engine::Engine;
pub use error::{OrePlanError, OrePlanResult};
pub use ids::{EngineId, InputId, OutputId, StockpileId};
pub use input::Input;
pub use output::OutputRequest;
pub use problem::{Problem, ProblemInfo};
pub use quality::{Quality, QualityRequest};
pub use rng::Rng;
pub use solution::{Activity, Delivery, DeliveryQuality, ReclaimEvent, Route, RouteEntry, Solution, StackEvent};
pub use stockpile::Stockpile;
