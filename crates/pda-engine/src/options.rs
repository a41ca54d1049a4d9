// Run options: acceptance mode, exploration strategy, limits, and policies.

use std::fmt;
use std::str::FromStr;

use crate::{
    DEFAULT_MAX_FRONTIER_SIZE, DEFAULT_MAX_STEPS, DEFAULT_MAX_VISITS_PER_SIGNATURE, DEFAULT_SEED,
    EngineError,
};

/// Rule deciding whether a configuration counts as a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AcceptanceMode {
    /// The configuration is in a final state. Leftover input is allowed:
    /// a run accepts the moment any branch reaches a final state.
    #[default]
    FinalState,
    /// All input consumed and the stack is empty (or holds only the
    /// initial stack symbol).
    EmptyStack,
}

impl FromStr for AcceptanceMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "final_state" => Ok(AcceptanceMode::FinalState),
            "empty_stack" => Ok(AcceptanceMode::EmptyStack),
            other => Err(EngineError::InvalidAcceptanceMode(other.to_string())),
        }
    }
}

impl fmt::Display for AcceptanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptanceMode::FinalState => f.write_str("final_state"),
            AcceptanceMode::EmptyStack => f.write_str("empty_stack"),
        }
    }
}

/// How the frontier is advanced at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExplorationStrategy {
    /// Expand every configuration of the frontier (complete search).
    #[default]
    Breadth,
    /// Follow a single randomly chosen path (illustrative trace only).
    Random,
}

impl FromStr for ExplorationStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breadth" => Ok(ExplorationStrategy::Breadth),
            "random" => Ok(ExplorationStrategy::Random),
            other => Err(EngineError::InvalidExplorationStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ExplorationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorationStrategy::Breadth => f.write_str("breadth"),
            ExplorationStrategy::Random => f.write_str("random"),
        }
    }
}

/// Meaning of the `?` (empty) stack guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmptyStackPolicy {
    /// The guard holds only when the stack has no symbols at all.
    #[default]
    Strict,
    /// The guard also holds when the stack contains only the automaton's
    /// initial stack symbol (a permanent bottom marker).
    SentinelCountsAsEmpty,
}

/// Options for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: AcceptanceMode,
    pub strategy: ExplorationStrategy,
    /// Maximum number of frontier expansions before the run fails.
    pub max_steps: usize,
    /// Frontiers larger than this are pruned down to it.
    pub max_frontier_size: usize,
    /// A signature reaching this many visits is no longer admitted.
    pub max_visits_per_signature: u32,
    pub empty_stack_policy: EmptyStackPolicy,
    /// Seed for the default random source of the random strategy.
    pub seed: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: AcceptanceMode::default(),
            strategy: ExplorationStrategy::default(),
            max_steps: DEFAULT_MAX_STEPS,
            max_frontier_size: DEFAULT_MAX_FRONTIER_SIZE,
            max_visits_per_signature: DEFAULT_MAX_VISITS_PER_SIGNATURE,
            empty_stack_policy: EmptyStackPolicy::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl RunOptions {
    pub fn new(mode: AcceptanceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: AcceptanceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: ExplorationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_frontier_size(mut self, max_frontier_size: usize) -> Self {
        self.max_frontier_size = max_frontier_size;
        self
    }

    pub fn with_max_visits_per_signature(mut self, max_visits: u32) -> Self {
        self.max_visits_per_signature = max_visits;
        self
    }

    pub fn with_empty_stack_policy(mut self, policy: EmptyStackPolicy) -> Self {
        self.empty_stack_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject non-positive limits. Called before any simulation starts.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_steps == 0 {
            return Err(EngineError::InvalidLimit { name: "max_steps" });
        }
        if self.max_frontier_size == 0 {
            return Err(EngineError::InvalidLimit {
                name: "max_frontier_size",
            });
        }
        if self.max_visits_per_signature == 0 {
            return Err(EngineError::InvalidLimit {
                name: "max_visits_per_signature",
            });
        }
        Ok(())
    }
}
