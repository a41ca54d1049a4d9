// Acceptance predicate and the accept/reject verdict.

use pda_core::{Automaton, Symbol};
use tracing::info;

use crate::EngineError;
use crate::configuration::Configuration;
use crate::options::{AcceptanceMode, RunOptions};
use crate::run::{Simulator, Snapshot};

/// Verdict of an acceptance check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    pub accepted: bool,
    /// History of the first accepting configuration, in frontier order.
    pub witness: Option<Vec<String>>,
    /// Expansions performed before the verdict was reached.
    pub steps: usize,
}

impl Acceptance {
    fn rejected(steps: usize) -> Self {
        Self {
            accepted: false,
            witness: None,
            steps,
        }
    }
}

/// Whether `config` satisfies the acceptance predicate of `mode`.
///
/// `FinalState` does not look at the remaining input: reaching a final
/// state accepts even with input left over. `EmptyStack` requires all input
/// consumed and a stack that is empty or holds only the initial stack symbol.
pub fn is_accepting(config: &Configuration, automaton: &Automaton, mode: AcceptanceMode) -> bool {
    match mode {
        AcceptanceMode::FinalState => automaton.is_final(config.state.as_str()),
        AcceptanceMode::EmptyStack => {
            config.is_input_empty()
                && (config.stack.is_empty()
                    || automaton
                        .initial_stack_symbol()
                        .is_some_and(|bottom| config.stack.holds_only(bottom)))
        }
    }
}

/// Drive `run` until its first accepting snapshot, or until it ends.
pub(crate) fn first_acceptance<I>(run: I) -> Result<Acceptance, EngineError>
where
    I: Iterator<Item = Result<Snapshot, EngineError>>,
{
    let mut steps = 0;
    for snapshot in run {
        let mut snapshot = snapshot?;
        steps = snapshot.step;
        if let Some(i) = snapshot.accepted {
            let witness = snapshot.configurations.swap_remove(i).history;
            info!(steps, "input accepted");
            return Ok(Acceptance {
                accepted: true,
                witness: Some(witness),
                steps,
            });
        }
    }
    info!(steps, "input rejected");
    Ok(Acceptance::rejected(steps))
}

/// Check whether `automaton` accepts `input` (one symbol per character)
/// under the acceptance mode named by `mode` (`final_state` or `empty_stack`),
/// with default limits and breadth-first exploration.
pub fn accepts(automaton: &Automaton, input: &str, mode: &str) -> Result<Acceptance, EngineError> {
    let mode: AcceptanceMode = mode.parse()?;
    accepts_with(automaton, Symbol::from_chars(input), RunOptions::new(mode))
}

/// Check acceptance of pre-tokenized `input` under explicit `options`.
///
/// Under [`ExplorationStrategy::Random`](crate::ExplorationStrategy::Random)
/// a rejection only means the sampled path did not accept.
pub fn accepts_with(
    automaton: &Automaton,
    input: Vec<Symbol>,
    options: RunOptions,
) -> Result<Acceptance, EngineError> {
    Simulator::new(automaton, options)?.accepts_symbols(input)
}
