// pda-sim: Simulate pushdown and finite automata loaded from files.
//
// Usage:
//   pda-sim run --file F --input W [--mode step|auto] [FLAGS]
//   pda-sim accepts --file F --input W [FLAGS]
//   pda-sim draw --file F
//   pda-sim validate --file F
//
// `run` pauses for ENTER between snapshots unless `--mode auto` is given.
// `accepts` exits with 0 when the input is accepted and 2 when it is
// rejected. Errors exit with 1. Set RUST_LOG for diagnostics on stderr.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use pda_cli::render::{render_automaton, render_step_list};
use pda_cli::{CliError, SimulationArgs};
use pda_engine::Simulator;
use pda_loader::load_automaton;

#[derive(Parser)]
#[command(name = "pda-sim")]
#[command(about = "Pushdown automaton simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RunMode {
    /// Wait for ENTER between snapshots
    Step,
    /// Print every snapshot without pausing
    Auto,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream frontier snapshots, then print the verdict
    Run {
        #[command(flatten)]
        sim: SimulationArgs,

        /// Presentation mode
        #[arg(long, value_enum, default_value = "step")]
        mode: RunMode,
    },

    /// Print accepted/rejected and the witness trace
    Accepts {
        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Print an ASCII diagram of the automaton
    Draw {
        /// Automaton file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Load and validate an automaton file
    Validate {
        /// Automaton file
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn print_witness(out: &mut impl Write, witness: &[String]) -> io::Result<()> {
    writeln!(out, "witness:")?;
    for (i, entry) in witness.iter().enumerate() {
        writeln!(out, "  {i:>3}. {entry}")?;
    }
    Ok(())
}

fn run(sim_args: &SimulationArgs, mode: RunMode) -> Result<ExitCode, CliError> {
    let automaton = load_automaton(&sim_args.file)?;
    let sim = Simulator::new(&automaton, sim_args.options())?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut pausing = mode == RunMode::Step;
    let mut steps = 0;
    let mut witness = None;

    for snapshot in sim.run_symbols(sim_args.symbols()) {
        let snapshot = snapshot?;
        steps = snapshot.step;
        writeln!(out, "{}", render_step_list(snapshot.step, &snapshot.configurations))?;

        if let (Some(i), Some(config)) = (snapshot.accepted, snapshot.accepting_configuration()) {
            writeln!(out, "configuration {} is accepting", i + 1)?;
            witness = Some(config.history.clone());
            break;
        }
        if pausing {
            write!(out, "press ENTER for the next step...")?;
            out.flush()?;
            let mut line = String::new();
            // EOF on stdin finishes the run without pausing.
            if stdin.lock().read_line(&mut line)? == 0 {
                pausing = false;
                writeln!(out)?;
            }
        }
    }

    match witness {
        Some(witness) => {
            writeln!(out, "accepted after {steps} steps")?;
            print_witness(&mut out, &witness)?;
        }
        None => writeln!(out, "rejected after {steps} steps")?,
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn accepts(sim_args: &SimulationArgs) -> Result<ExitCode, CliError> {
    let automaton = load_automaton(&sim_args.file)?;
    let verdict = Simulator::new(&automaton, sim_args.options())?
        .accepts_symbols(sim_args.symbols())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match verdict.witness {
        Some(witness) if verdict.accepted => {
            writeln!(out, "accepted")?;
            print_witness(&mut out, &witness)?;
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            writeln!(out, "rejected")?;
            Ok(ExitCode::from(2))
        }
    }
}

fn draw(file: &Path) -> Result<ExitCode, CliError> {
    let automaton = load_automaton(file)?;
    println!("{}", render_automaton(&automaton));
    Ok(ExitCode::SUCCESS)
}

fn validate(file: &Path) -> Result<ExitCode, CliError> {
    let automaton = load_automaton(file)?;
    println!(
        "{}: valid {} with {} states and {} transitions",
        file.display(),
        automaton.kind(),
        automaton.states().len(),
        automaton.transitions().len()
    );
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    pda_cli::init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run { sim, mode } => run(sim, *mode),
        Commands::Accepts { sim } => accepts(sim),
        Commands::Draw { file } => draw(file),
        Commands::Validate { file } => validate(file),
    };
    result.unwrap_or_else(|e| pda_cli::fatal(&e.to_string()))
}
