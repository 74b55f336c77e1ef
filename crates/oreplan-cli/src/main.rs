use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use oreplan_algo::neighborhood::{SimpleSwap, Shift, Swap, Switch};
use oreplan_algo::{
    run_feedback_loop, solve_omp, Constructive, ConstructiveKind, HeuristicDriver, Lahc, Move,
    OmpWeights, SimulatedAnnealing,
};
use oreplan_core::{Rng, Solution};

mod cli;
mod io;

use cli::{AlgorithmArg, Cli, ConstructiveArg};

fn default_moves() -> Vec<Move> {
    vec![
        Move::Shift(Shift::new(false)),
        Move::SimpleSwap(SimpleSwap::new(false)),
        Move::Swap(Swap::new(false)),
        Move::Switch(Switch::new(false)),
        Move::Shift(Shift::new(true)),
        Move::SimpleSwap(SimpleSwap::new(true)),
        Move::Swap(Swap::new(true)),
        Move::Switch(Switch::new(true)),
    ]
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let problem = io::read_problem(&cli.input_file)?;
    let mut rng = Rng::new(cli.seed);

    let constructive_kind = match cli.constructive {
        ConstructiveArg::Premodel => ConstructiveKind::PreModel,
        ConstructiveArg::Postmodel => ConstructiveKind::PostModel,
    };

    let mut solution = Solution::new(&problem);
    let mut weights = OmpWeights::uniform(
        problem.num_stockpiles(),
        problem.num_outputs(),
        problem.num_inputs(),
    );

    // PreModel needs an unweighted first pass (every stockpile's initial
    // mass) to build its feedback matrix before the real blending solve.
    if constructive_kind == ConstructiveKind::PreModel {
        let initial_weights: Vec<Vec<f64>> = (0..problem.num_outputs())
            .map(|_| problem.stockpiles.iter().map(|s| s.weight_ini).collect())
            .collect();
        let initial_inputs: Vec<Vec<f64>> = problem
            .stockpiles
            .iter()
            .map(|_| problem.inputs.iter().map(|i| i.weight).collect())
            .collect();
        solution.set_objective(None, initial_weights, initial_inputs);

        let mut pre = Constructive::new(&problem, &solution, ConstructiveKind::PreModel);
        pre.run(&mut solution, false)?;
        if let Some(feedback) = pre.feedback.clone() {
            // `feedback` is `[request][stockpile]`; `w_x` is `[stockpile][request]`.
            let p = problem.num_stockpiles();
            let r = problem.num_outputs();
            weights.w_x = (0..p)
                .map(|i| (0..r).map(|k| feedback[k][i]).collect())
                .collect();
        }
    }

    let omp_result = solve_omp(&problem, &weights)?;
    solution.set_objective(
        omp_result.objective,
        omp_result.weights,
        omp_result.input_weights,
    );
    if solution.objective.is_none() {
        anyhow::bail!("blending model produced no feasible solution");
    }

    let mut constructive = Constructive::new(&problem, &solution, ConstructiveKind::PostModel);
    constructive.run(&mut solution, false)?;

    let mut driver = cli.algorithm.map(|alg| match alg {
        AlgorithmArg::Sa => {
            HeuristicDriver::Sa(SimulatedAnnealing::new(default_moves(), cli.alpha, cli.t0, cli.samax))
        }
        AlgorithmArg::Lahc => HeuristicDriver::Lahc(Lahc::new(default_moves(), cli.lsize)),
    });

    if let Some(driver) = driver.as_mut() {
        info!("running {} for {} iterations", driver.name(), cli.maxiters);
        let best = driver.run(&solution, &mut constructive, &mut rng, cli.maxiters, false)?;
        solution = best;
    }

    if cli.feedback > 0 {
        info!("running {} feedback iteration(s)", cli.feedback);
        run_feedback_loop(
            &problem,
            &mut solution,
            &mut constructive,
            &mut weights,
            driver.as_mut(),
            &mut rng,
            cli.feedback,
            cli.maxiters,
        )?;
    }

    solution.set_deliveries(&problem)?;
    io::write_solution(&cli.output_file, &problem, &solution)?;
    info!("solution written to {}", cli.output_file);

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
