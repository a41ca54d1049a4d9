// pda-cli: shared utilities for the pda-sim command-line tool.

pub mod render;

use std::path::PathBuf;
use std::process;

use clap::Args;
use pda_core::Symbol;
use pda_engine::{
    AcceptanceMode, EmptyStackPolicy, EngineError, ExplorationStrategy, RunOptions,
    DEFAULT_MAX_FRONTIER_SIZE, DEFAULT_MAX_STEPS, DEFAULT_MAX_VISITS_PER_SIGNATURE, DEFAULT_SEED,
};
use pda_loader::LoadError;
use tracing_subscriber::EnvFilter;

/// Error type for CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Simulation flags shared by the `run` and `accepts` subcommands.
#[derive(Debug, Clone, Args)]
pub struct SimulationArgs {
    /// Automaton file (.yaml, .yml, .json, .txt, .pda, .ascii or .csv)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Input word
    #[arg(short, long, default_value = "")]
    pub input: String,

    /// Acceptance mode (final_state or empty_stack)
    #[arg(long, default_value = "final_state")]
    pub acceptance: AcceptanceMode,

    /// Exploration strategy (breadth or random)
    #[arg(long, default_value = "breadth")]
    pub strategy: ExplorationStrategy,

    /// Seed for the random strategy
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum number of frontier expansions
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Maximum number of configurations kept per frontier
    #[arg(long, default_value_t = DEFAULT_MAX_FRONTIER_SIZE)]
    pub max_frontier: usize,

    /// Maximum admissions of one (state, input, stack) signature
    #[arg(long, default_value_t = DEFAULT_MAX_VISITS_PER_SIGNATURE)]
    pub max_visits: u32,

    /// Let the `?` pop guard match a stack holding only the initial stack symbol
    #[arg(long)]
    pub sentinel_empty: bool,

    /// Split the input on this separator instead of per character
    #[arg(long)]
    pub separator: Option<String>,
}

impl SimulationArgs {
    /// Engine options for these flags. Limits are validated by the simulator.
    pub fn options(&self) -> RunOptions {
        let policy = if self.sentinel_empty {
            EmptyStackPolicy::SentinelCountsAsEmpty
        } else {
            EmptyStackPolicy::Strict
        };
        RunOptions::new(self.acceptance)
            .with_strategy(self.strategy)
            .with_seed(self.seed)
            .with_max_steps(self.max_steps)
            .with_max_frontier_size(self.max_frontier)
            .with_max_visits_per_signature(self.max_visits)
            .with_empty_stack_policy(policy)
    }

    /// The input word as symbols.
    pub fn symbols(&self) -> Vec<Symbol> {
        tokenize(&self.input, self.separator.as_deref())
    }
}

/// Split `input` into symbols: per character, or on `separator` when given.
pub fn tokenize(input: &str, separator: Option<&str>) -> Vec<Symbol> {
    match separator {
        Some(sep) if !sep.is_empty() => Symbol::split(input, sep),
        _ => Symbol::from_chars(input),
    }
}

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}
