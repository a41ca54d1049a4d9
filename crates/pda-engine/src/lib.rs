//! Simulation engine for nondeterministic pushdown automata and DFAs.
//!
//! The engine reads a validated [`Automaton`](pda_core::Automaton), creates
//! the initial [`Configuration`], and repeatedly expands the frontier of
//! active configurations until one of them is accepting, the frontier dies,
//! or the step limit is hit. Each expansion is exposed lazily through the
//! [`Run`] iterator so a terminal driver can render one snapshot at a time.
//!
//! # Architecture
//!
//! - [`stack`] -- Value-semantics symbol stack
//! - [`configuration`] -- Execution snapshot and loop-suppression signature
//! - [`options`] -- Run options (acceptance mode, strategy, limits, policy)
//! - [`step`] -- Applicability test, transition application, single-config step
//! - [`explore`] -- Breadth-first and randomized single-path explorers
//! - [`run`] -- The [`Simulator`] entry point and the [`Run`] snapshot iterator
//! - [`acceptance`] -- Acceptance predicate and the accept/reject verdict

pub mod acceptance;
pub mod configuration;
pub mod explore;
pub mod options;
pub mod run;
pub mod stack;
pub mod step;

pub use acceptance::{Acceptance, accepts, accepts_with, is_accepting};
pub use configuration::{Configuration, Signature};
pub use explore::{BreadthExplorer, Exploration, Explorer, RandomExplorer, VisitCounts};
pub use options::{AcceptanceMode, EmptyStackPolicy, ExplorationStrategy, RunOptions};
pub use run::{Run, Simulator, Snapshot};
pub use stack::Stack;
pub use step::{apply_transition, is_applicable, simulate_step};

/// Error type for simulation runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The run needed more expansion steps than allowed. Either the automaton
    /// diverges or the limit is set too low.
    #[error("step limit exceeded ({limit}); the automaton may loop or the limit is too low")]
    StepLimitExceeded { limit: usize },
    #[error("invalid acceptance mode '{0}' (expected 'final_state' or 'empty_stack')")]
    InvalidAcceptanceMode(String),
    #[error("invalid exploration strategy '{0}' (expected 'breadth' or 'random')")]
    InvalidExplorationStrategy(String),
    #[error("{name} must be greater than zero")]
    InvalidLimit { name: &'static str },
    /// Pop or peek on an empty stack. The guarded API never triggers this.
    #[error("pop from empty stack")]
    EmptyStack,
}

/// Default run-wide limit on frontier expansions.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Default cap on the number of configurations kept per frontier.
pub const DEFAULT_MAX_FRONTIER_SIZE: usize = 500;

/// Default number of times one signature may enter the frontier.
pub const DEFAULT_MAX_VISITS_PER_SIGNATURE: u32 = 3;

/// Default seed for the randomized explorer.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// History entry of every initial configuration.
pub const START_HISTORY: &str = "start";
