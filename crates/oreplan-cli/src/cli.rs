//! Command-line surface: a thin driver over `oreplan-core`/`oreplan-algo`.
//! Argument parsing, JSON I/O, and logging live here, outside the core per
//! its explicit non-goals.

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConstructiveArg {
    Premodel,
    Postmodel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Sa,
    Lahc,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-stage stockyard blending and scheduling planner", long_about = None)]
pub struct Cli {
    /// Problem instance, as JSON.
    pub input_file: String,

    /// Where to write the solution record, as JSON.
    pub output_file: String,

    /// Seed for the single PRNG threaded through the constructive and
    /// heuristic.
    pub seed: u64,

    /// Which greedy route-construction strategy to run.
    #[arg(long = "constructive", value_enum, default_value_t = ConstructiveArg::Postmodel)]
    pub constructive: ConstructiveArg,

    /// Local-search driver. Omit to skip the heuristic pass entirely and
    /// emit the constructive's solution as-is.
    #[arg(long = "algorithm", value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Number of outer feedback iterations (reweight the blending model
    /// from the scheduler's mass pattern and repeat). 0 disables feedback.
    #[arg(long = "feedback", default_value_t = 0)]
    pub feedback: u32,

    /// Iteration budget passed to the heuristic driver on every pass.
    #[arg(long = "maxiters", default_value_t = 1_000)]
    pub maxiters: u32,

    /// LAHC history length.
    #[arg(long = "lsize", default_value_t = 1_000)]
    pub lsize: usize,

    /// SA cooling rate.
    #[arg(long = "alpha", default_value_t = 0.9)]
    pub alpha: f64,

    /// SA iterations per temperature step.
    #[arg(long = "samax", default_value_t = 1_000)]
    pub samax: u32,

    /// SA initial temperature.
    #[arg(long = "t0", default_value_t = 1.0)]
    pub t0: f64,

    /// Logging verbosity.
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: tracing::Level,
}
