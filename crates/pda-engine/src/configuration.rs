// Execution snapshot and loop-suppression signature.

use std::collections::VecDeque;
use std::fmt;

use pda_core::symbol::EPSILON_TEXT;
use pda_core::{Automaton, State, Symbol};

use crate::START_HISTORY;
use crate::stack::Stack;

/// One point in the execution space of an automaton.
///
/// A configuration owns all of its fields. Forking (one successor per
/// applicable transition) always clones, so siblings never alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Current control state.
    pub state: State,
    /// Input symbols not yet consumed; the head is the next symbol to read.
    pub remaining_input: VecDeque<Symbol>,
    /// Owned stack snapshot.
    pub stack: Stack,
    /// Rendered transitions applied so far, starting with [`START_HISTORY`].
    pub history: Vec<String>,
}

/// Loop-suppression key: `(state, remaining_input, stack_contents)`.
///
/// History is excluded: two configurations that reached the
/// same point along different paths share a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    state: State,
    remaining_input: Vec<Symbol>,
    stack: Vec<Symbol>,
}

impl Configuration {
    /// The initial configuration for `input`.
    ///
    /// The stack is seeded with the automaton's initial stack symbol, if any.
    pub fn initial(automaton: &Automaton, input: Vec<Symbol>) -> Self {
        let stack = match automaton.initial_stack_symbol() {
            Some(bottom) => Stack::with_bottom(bottom.clone()),
            None => Stack::new(),
        };
        Self {
            state: automaton.initial_state().clone(),
            remaining_input: input.into(),
            stack,
            history: vec![START_HISTORY.to_string()],
        }
    }

    /// Next input symbol without consuming it.
    pub fn current_input(&self) -> Option<&Symbol> {
        self.remaining_input.front()
    }

    pub fn is_input_empty(&self) -> bool {
        self.remaining_input.is_empty()
    }

    pub fn signature(&self) -> Signature {
        Signature {
            state: self.state.clone(),
            remaining_input: self.remaining_input.iter().cloned().collect(),
            stack: self.stack.symbols().to_vec(),
        }
    }

    /// Remaining input concatenated, or `ε` when fully consumed.
    pub fn remaining_input_text(&self) -> String {
        if self.remaining_input.is_empty() {
            EPSILON_TEXT.to_string()
        } else {
            self.remaining_input.iter().map(Symbol::as_str).collect()
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "state: {} | input: {} | stack: {}",
            self.state,
            self.remaining_input_text(),
            self.stack
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pda_core::AutomatonKind;

    fn automaton(bottom: Option<&str>) -> Automaton {
        let mut b = Automaton::builder(AutomatonKind::Pda)
            .states(["q0"])
            .input_alphabet(["a"])
            .stack_alphabet(["Z"])
            .initial_state("q0");
        if let Some(z) = bottom {
            b = b.initial_stack_symbol(z);
        }
        b.build().unwrap()
    }

    #[test]
    fn initial_configuration() {
        let config = Configuration::initial(&automaton(None), Symbol::from_chars("aa"));
        assert_eq!(config.state.as_str(), "q0");
        assert_eq!(config.remaining_input.len(), 2);
        assert!(config.stack.is_empty());
        assert_eq!(config.history, vec!["start".to_string()]);
    }

    #[test]
    fn initial_configuration_seeds_sentinel() {
        let config = Configuration::initial(&automaton(Some("Z")), Vec::new());
        assert!(config.stack.holds_only(&Symbol::from("Z")));
        assert!(config.is_input_empty());
        assert!(config.current_input().is_none());
    }

    #[test]
    fn signature_ignores_history() {
        let a = Configuration::initial(&automaton(Some("Z")), Symbol::from_chars("a"));
        let mut b = a.clone();
        b.history.push("q0 → q0 [read: ε, pop: ε, push: ε]".to_string());
        assert_ne!(a, b);
        assert_eq!(a.signature(), b.signature());

        let mut c = a.clone();
        c.remaining_input.pop_front();
        assert_ne!(a.signature(), c.signature());
    }

    #[test]
    fn display() {
        let config = Configuration::initial(&automaton(Some("Z")), Symbol::from_chars("ab"));
        assert_eq!(config.to_string(), "state: q0 | input: ab | stack: Z");
        let empty = Configuration::initial(&automaton(None), Vec::new());
        assert_eq!(empty.to_string(), "state: q0 | input: ε | stack: ε");
    }
}
