use std::{path::PathBuf, process, time::Instant};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use priocut::{Aig, CutParams, Cuts};

/// Computes the priority K-cuts of an And-Inverter Graph.
#[derive(Parser)]
#[clap(name = "priocut", version, long_about = None)]
struct Cli {
    /// An AIG in the binary or ASCII AIGER format.
    file: PathBuf,

    /// The maximum number of inputs for each cut.
    #[clap(short, default_value_t = 4, value_parser = clap::value_parser!(u32).range(2..))]
    k: u32,

    /// The number of priority cuts stored for each vertex.
    #[clap(short, default_value_t = 2, value_parser = clap::value_parser!(u32).range(2..))]
    p: u32,

    /// Display the results on the screen (slows down the execution for
    /// large graphs).
    #[clap(short)]
    d: bool,
}

fn run(cli: &Cli) -> priocut::Result<()> {
    let start = Instant::now();
    let aig = Aig::from_file(&cli.file)?;
    info!(elapsed = ?start.elapsed(), "loaded the AIG in the main memory");

    let computation = Instant::now();
    let cuts = Cuts::compute(
        &aig,
        CutParams {
            max_inputs: cli.k as usize,
            max_cuts: cli.p as usize,
        },
    )?;
    info!(elapsed = ?computation.elapsed(), "evaluated the priority k-cuts");
    info!(elapsed = ?start.elapsed(), "total execution time");

    if cli.d {
        print!("{}", cuts.to_text());
    }
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and usage errors share the same non-zero exit.
        Err(e) => {
            let _ = e.print();
            process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        process::exit(1);
    }
}
