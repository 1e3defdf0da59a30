use crate::reports;
use cellforge::config::{Config, ProblemKind};
use cellforge::error::{CellForgeError, CfResult};
use cellforge::netlist::Circuit;
use cellforge::optimizer::GeneticEngine;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Benchmark netlists (`cells nets [rows cols]` header, one net per line). A directory
    /// stands for every `.txt` file in it; all circuits share one engine.
    #[arg(short = 'n', long, num_args = 1.., required = true)]
    pub netlist: Vec<PathBuf>,

    #[command(flatten)]
    pub config: Config,

    /// JSON run configuration; replaces the flag values when given.
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// Keep evolving each circuit in rounds of `--generations` until this many seconds have
    /// passed.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Write the results as a JSON array, one entry per circuit.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: RunArgs, problem: ProblemKind) -> CfResult<()> {
    let config = match &args.config_file {
        Some(path) => {
            info!("⚙️  Loading configuration from {}", path.display());
            Config::load_from_file(path)?
        }
        None => args.config.clone(),
    };

    let netlists = collect_netlists(&args.netlist)?;
    let (first, rest) = netlists
        .split_first()
        .ok_or_else(|| CellForgeError::Configuration("no netlist files found".into()))?;

    info!(
        "🔧 {} | {} circuit(s) | population {}, {} generations, mutation factor {}",
        problem,
        netlists.len(),
        config.search.population_size,
        config.search.generations,
        config.search.mutation_factor
    );

    let circuit = Circuit::load_from_file(first)?;
    let mut engine = GeneticEngine::new(circuit, problem, &config, args.seed)?;
    let mut summaries = Vec::with_capacity(netlists.len());
    summaries.push(run_circuit(&mut engine, first, &config, &args)?);

    for path in rest {
        engine.load_circuit(Circuit::load_from_file(path)?)?;
        summaries.push(run_circuit(&mut engine, path, &config, &args)?);
    }

    reports::print_summary(&summaries);

    if let Some(path) = &args.output {
        reports::write_json(path, &summaries)?;
        info!("💾 Results written to {}", path.display());
    }

    Ok(())
}

/// Evolves the circuit currently loaded in `engine` and reports on it.
fn run_circuit(
    engine: &mut GeneticEngine,
    netlist: &Path,
    config: &Config,
    args: &RunArgs,
) -> CfResult<reports::RunSummary> {
    println!("\n=== {} ===", netlist.display());
    info!(
        "📐 {} cells, {} nets",
        engine.circuit().cells,
        engine.circuit().nets.len()
    );

    let initial = engine.initialize()?;
    println!("Initial cost: {}", initial.cost);

    let start = Instant::now();
    let mut best = engine.run_generations(config.search.generations)?;
    let mut rounds = 1;

    if let Some(limit) = args.time.map(Duration::from_secs) {
        while start.elapsed() < limit {
            best = engine.run_generations(config.search.generations)?;
            rounds += 1;
        }
    }
    let elapsed = start.elapsed();

    println!("=== 🏆 FINAL RESULT ===");
    println!("Final cost: {}", best.cost);

    reports::print_solution(engine.circuit(), &best.solution);
    reports::print_costliest_nets(engine.scorer(), &best.solution, 10);

    Ok(reports::RunSummary {
        problem: engine.encoding().problem(),
        netlist: netlist.display().to_string(),
        seed: args.seed,
        config: config.clone(),
        initial_cost: initial.cost,
        final_cost: best.cost,
        rounds,
        generations: engine.generation(),
        elapsed_secs: elapsed.as_secs_f64(),
        best,
    })
}

/// Expands directories to their `.txt` files (sorted); plain paths pass through.
fn collect_netlists(paths: &[PathBuf]) -> CfResult<Vec<PathBuf>> {
    let mut netlists = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in fs::read_dir(path)? {
                let file = entry?.path();
                if file.is_file() && file.extension().is_some_and(|ext| ext == "txt") {
                    found.push(file);
                }
            }
            found.sort();
            netlists.extend(found);
        } else {
            netlists.push(path.clone());
        }
    }
    Ok(netlists)
}
