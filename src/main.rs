use cellforge::config::ProblemKind;
use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Balanced bipartition minimising cut-size.
    Partition(cmd::run::RunArgs),
    /// Grid placement minimising half-perimeter wirelength.
    Place(cmd::run::RunArgs),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let result = match cli.command {
        Commands::Partition(args) => cmd::run::run(args, ProblemKind::Partition),
        Commands::Place(args) => cmd::run::run(args, ProblemKind::Placement),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
