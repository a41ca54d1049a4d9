// Validated automaton definition and its builder.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use hashbrown::{HashMap, HashSet};

use crate::DefinitionError;
use crate::symbol::{Guard, State, Symbol};
use crate::transition::Transition;

/// Whether the automaton uses a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AutomatonKind {
    /// Pushdown automaton.
    #[default]
    Pda,
    /// Deterministic finite automaton: no stack, one edge per `(state, symbol)`.
    Dfa,
}

impl FromStr for AutomatonKind {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pda" => Ok(AutomatonKind::Pda),
            "dfa" => Ok(AutomatonKind::Dfa),
            _ => Err(DefinitionError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonKind::Pda => f.write_str("pda"),
            AutomatonKind::Dfa => f.write_str("dfa"),
        }
    }
}

/// A validated, read-only automaton definition.
///
/// Construct with [`AutomatonBuilder`]. Transitions keep their definition
/// order, both globally and per source state.
#[derive(Debug, Clone)]
pub struct Automaton {
    kind: AutomatonKind,
    states: BTreeSet<State>,
    input_alphabet: BTreeSet<Symbol>,
    stack_alphabet: BTreeSet<Symbol>,
    initial_state: State,
    final_states: BTreeSet<State>,
    initial_stack_symbol: Option<Symbol>,
    transitions: Vec<Transition>,
    /// Transitions grouped by source state, in definition order.
    by_state: HashMap<State, Vec<Transition>>,
}

impl Automaton {
    pub fn builder(kind: AutomatonKind) -> AutomatonBuilder {
        AutomatonBuilder::new(kind)
    }

    pub fn kind(&self) -> AutomatonKind {
        self.kind
    }

    pub fn states(&self) -> &BTreeSet<State> {
        &self.states
    }

    pub fn input_alphabet(&self) -> &BTreeSet<Symbol> {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &BTreeSet<Symbol> {
        &self.stack_alphabet
    }

    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    pub fn final_states(&self) -> &BTreeSet<State> {
        &self.final_states
    }

    /// The permanent bottom-of-stack marker, if the automaton declares one.
    pub fn initial_stack_symbol(&self) -> Option<&Symbol> {
        self.initial_stack_symbol.as_ref()
    }

    /// All transitions in definition order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Transitions leaving `state`, in definition order.
    ///
    /// Unknown states have no transitions.
    pub fn transitions_from(&self, state: &str) -> &[Transition] {
        self.by_state.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }
}

/// Collects the parts of an automaton and validates them in [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    kind: AutomatonKind,
    states: Vec<State>,
    input_alphabet: Vec<Symbol>,
    stack_alphabet: Vec<Symbol>,
    initial_state: Option<State>,
    final_states: Vec<State>,
    initial_stack_symbol: Option<Symbol>,
    transitions: Vec<Transition>,
}

impl AutomatonBuilder {
    pub fn new(kind: AutomatonKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn input_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.input_alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn stack_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.stack_alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    pub fn initial_state(mut self, state: impl Into<State>) -> Self {
        self.initial_state = Some(state.into());
        self
    }

    pub fn final_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.final_states.extend(states.into_iter().map(Into::into));
        self
    }

    pub fn initial_stack_symbol(mut self, symbol: impl Into<Symbol>) -> Self {
        self.initial_stack_symbol = Some(symbol.into());
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add a transition from its parts; `read`/`pop` text goes through [`Guard::parse`].
    pub fn rule<I, S>(self, from: &str, to: &str, read: &str, pop: &str, push: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let push = push.into_iter().map(Into::into).collect();
        self.transition(Transition::new(
            from,
            to,
            Guard::parse(read),
            Guard::parse(pop),
            push,
        ))
    }

    /// Validate and freeze the definition.
    pub fn build(self) -> Result<Automaton, DefinitionError> {
        let states: BTreeSet<State> = self.states.into_iter().collect();
        if states.is_empty() {
            return Err(DefinitionError::NoStates);
        }

        let initial_state = self.initial_state.ok_or(DefinitionError::MissingInitialState)?;
        if !states.contains(&initial_state) {
            return Err(DefinitionError::UnknownInitialState(initial_state.to_string()));
        }

        let final_states: BTreeSet<State> = self.final_states.into_iter().collect();
        if let Some(unknown) = final_states.iter().find(|s| !states.contains(*s)) {
            return Err(DefinitionError::UnknownFinalState(unknown.to_string()));
        }

        let input_alphabet: BTreeSet<Symbol> = self.input_alphabet.into_iter().collect();
        let stack_alphabet: BTreeSet<Symbol> = self.stack_alphabet.into_iter().collect();

        if self.kind == AutomatonKind::Dfa
            && (!stack_alphabet.is_empty() || self.initial_stack_symbol.is_some())
        {
            return Err(DefinitionError::DfaStackDeclared);
        }

        if let Some(sym) = &self.initial_stack_symbol {
            if !stack_alphabet.contains(sym) {
                return Err(DefinitionError::UnknownInitialStackSymbol(sym.to_string()));
            }
        }

        let mut by_state: HashMap<State, Vec<Transition>> = HashMap::new();
        let mut dfa_edges: HashSet<(State, Symbol)> = HashSet::new();

        for (i, t) in self.transitions.iter().enumerate() {
            let index = i + 1;
            for state in [t.from_state(), t.to_state()] {
                if !states.contains(state) {
                    return Err(DefinitionError::UnknownState {
                        index,
                        state: state.to_string(),
                    });
                }
            }

            if let Some(sym) = t.read().symbol() {
                if !input_alphabet.contains(sym) {
                    return Err(DefinitionError::UnknownInputSymbol {
                        index,
                        symbol: sym.to_string(),
                    });
                }
            }

            for sym in t.pop().symbol().into_iter().chain(t.push()) {
                if !stack_alphabet.contains(sym) {
                    return Err(DefinitionError::UnknownStackSymbol {
                        index,
                        symbol: sym.to_string(),
                    });
                }
            }

            if self.kind == AutomatonKind::Dfa {
                if !t.pop().is_epsilon() || !t.push().is_empty() {
                    return Err(DefinitionError::DfaStackOperation { index });
                }
                let Some(sym) = t.read().symbol() else {
                    return Err(DefinitionError::DfaNonConcreteRead { index });
                };
                if !dfa_edges.insert((t.from_state().clone(), sym.clone())) {
                    return Err(DefinitionError::Nondeterministic {
                        state: t.from_state().to_string(),
                        symbol: sym.to_string(),
                    });
                }
            }

            by_state
                .entry(t.from_state().clone())
                .or_default()
                .push(t.clone());
        }

        Ok(Automaton {
            kind: self.kind,
            states,
            input_alphabet,
            stack_alphabet,
            initial_state,
            final_states,
            initial_stack_symbol: self.initial_stack_symbol,
            transitions: self.transitions,
            by_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anbn() -> AutomatonBuilder {
        Automaton::builder(AutomatonKind::Pda)
            .states(["q0", "q1", "q2"])
            .input_alphabet(["a", "b"])
            .stack_alphabet(["Z", "A"])
            .initial_state("q0")
            .final_states(["q2"])
            .initial_stack_symbol("Z")
            .rule("q0", "q0", "a", "ε", ["A"])
            .rule("q0", "q1", "b", "A", Vec::<&str>::new())
            .rule("q1", "q1", "b", "A", Vec::<&str>::new())
            .rule("q1", "q2", "ε", "Z", ["Z"])
    }

    #[test]
    fn build_valid_pda() {
        let a = anbn().build().unwrap();
        assert_eq!(a.kind(), AutomatonKind::Pda);
        assert_eq!(a.states().len(), 3);
        assert_eq!(a.initial_state().as_str(), "q0");
        assert_eq!(a.initial_stack_symbol().map(Symbol::as_str), Some("Z"));
        assert!(a.is_final("q2"));
        assert!(!a.is_final("q0"));
        assert_eq!(a.transitions().len(), 4);
    }

    #[test]
    fn transitions_from_keeps_definition_order() {
        let a = Automaton::builder(AutomatonKind::Pda)
            .states(["q"])
            .input_alphabet(["a", "b", "c"])
            .initial_state("q")
            .rule("q", "q", "c", "ε", Vec::<&str>::new())
            .rule("q", "q", "a", "ε", Vec::<&str>::new())
            .rule("q", "q", "b", "ε", Vec::<&str>::new())
            .build()
            .unwrap();
        let reads: Vec<String> = a
            .transitions_from("q")
            .iter()
            .map(|t| t.read().to_string())
            .collect();
        assert_eq!(reads, ["c", "a", "b"]);
        assert!(a.transitions_from("nowhere").is_empty());
    }

    #[test]
    fn reject_empty_state_set() {
        let err = Automaton::builder(AutomatonKind::Pda).build().unwrap_err();
        assert_eq!(err, DefinitionError::NoStates);
    }

    #[test]
    fn reject_unknown_initial_and_final() {
        let err = Automaton::builder(AutomatonKind::Pda)
            .states(["q0"])
            .initial_state("q9")
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::UnknownInitialState("q9".into()));

        let err = Automaton::builder(AutomatonKind::Pda)
            .states(["q0"])
            .initial_state("q0")
            .final_states(["qf"])
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::UnknownFinalState("qf".into()));
    }

    #[test]
    fn reject_unknown_symbols() {
        let err = anbn()
            .rule("q0", "q0", "c", "ε", Vec::<&str>::new())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::UnknownInputSymbol {
                index: 5,
                symbol: "c".into()
            }
        );

        let err = anbn()
            .rule("q0", "q0", "a", "ε", ["Q"])
            .build()
            .unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownStackSymbol { index: 5, .. }));
    }

    #[test]
    fn reject_unknown_transition_state() {
        let err = anbn()
            .rule("q0", "q7", "a", "ε", Vec::<&str>::new())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::UnknownState {
                index: 5,
                state: "q7".into()
            }
        );
    }

    #[test]
    fn reject_unknown_initial_stack_symbol() {
        let err = Automaton::builder(AutomatonKind::Pda)
            .states(["q0"])
            .initial_state("q0")
            .stack_alphabet(["A"])
            .initial_stack_symbol("Z")
            .build()
            .unwrap_err();
        assert_eq!(err, DefinitionError::UnknownInitialStackSymbol("Z".into()));
    }

    #[test]
    fn dfa_rules() {
        let base = || {
            Automaton::builder(AutomatonKind::Dfa)
                .states(["s", "t"])
                .input_alphabet(["0", "1"])
                .initial_state("s")
                .final_states(["t"])
        };

        assert!(base().transition(Transition::edge("s", "t", "1")).build().is_ok());

        let err = base()
            .transition(Transition::edge("s", "t", "1"))
            .transition(Transition::edge("s", "s", "1"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DefinitionError::Nondeterministic { .. }));

        let err = base().rule("s", "t", "ε", "ε", Vec::<&str>::new()).build().unwrap_err();
        assert_eq!(err, DefinitionError::DfaNonConcreteRead { index: 1 });

        let err = base().stack_alphabet(["Z"]).build().unwrap_err();
        assert_eq!(err, DefinitionError::DfaStackDeclared);
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("PDA".parse::<AutomatonKind>().unwrap(), AutomatonKind::Pda);
        assert_eq!("dfa".parse::<AutomatonKind>().unwrap(), AutomatonKind::Dfa);
        assert!("nfa".parse::<AutomatonKind>().is_err());
    }
}
