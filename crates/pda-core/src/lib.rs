//! Automaton definition types shared by the simulator crates.
//!
//! An [`Automaton`] is built once through an [`AutomatonBuilder`], validated,
//! and then treated as read-only for the lifetime of a simulation run.
//!
//! # Architecture
//!
//! - [`symbol`] -- Opaque symbol tokens and the tagged [`Guard`] enum
//! - [`transition`] -- The `(from, to, read, pop, push)` transition relation
//! - [`automaton`] -- The validated automaton and its builder

pub mod automaton;
pub mod symbol;
pub mod transition;

pub use automaton::{Automaton, AutomatonBuilder, AutomatonKind};
pub use symbol::{Guard, State, Symbol};
pub use transition::Transition;

/// Error type for automaton construction and validation.
///
/// Transition indices are 1-based, matching the order in which transitions
/// were added to the builder (and therefore the order in the source file).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("automaton has no states")]
    NoStates,
    #[error("initial state not specified")]
    MissingInitialState,
    #[error("initial state '{0}' is not in the state set")]
    UnknownInitialState(String),
    #[error("final state '{0}' is not in the state set")]
    UnknownFinalState(String),
    #[error("transition {index}: unknown state '{state}'")]
    UnknownState { index: usize, state: String },
    #[error("transition {index}: input symbol '{symbol}' is not in the input alphabet")]
    UnknownInputSymbol { index: usize, symbol: String },
    #[error("transition {index}: stack symbol '{symbol}' is not in the stack alphabet")]
    UnknownStackSymbol { index: usize, symbol: String },
    #[error("initial stack symbol '{0}' is not in the stack alphabet")]
    UnknownInitialStackSymbol(String),
    #[error("unknown automaton kind '{0}' (expected 'pda' or 'dfa')")]
    UnknownKind(String),
    #[error("a DFA must not declare a stack alphabet or an initial stack symbol")]
    DfaStackDeclared,
    #[error("transition {index}: a DFA transition must not pop or push")]
    DfaStackOperation { index: usize },
    #[error("transition {index}: a DFA transition must read a concrete input symbol")]
    DfaNonConcreteRead { index: usize },
    #[error("DFA is nondeterministic: state '{state}' has several transitions on '{symbol}'")]
    Nondeterministic { state: String, symbol: String },
}
