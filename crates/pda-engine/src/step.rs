// Transition applicability, application, and single-configuration steps.

use pda_core::{Automaton, Guard, Transition};
use tracing::trace;

use crate::EngineError;
use crate::configuration::Configuration;
use crate::options::EmptyStackPolicy;
use crate::stack::Stack;

/// Whether `stack` counts as empty for the `?` stack guard under `policy`.
pub(crate) fn stack_counts_as_empty(
    stack: &Stack,
    automaton: &Automaton,
    policy: EmptyStackPolicy,
) -> bool {
    match policy {
        EmptyStackPolicy::Strict => stack.is_empty(),
        EmptyStackPolicy::SentinelCountsAsEmpty => {
            stack.is_empty()
                || automaton
                    .initial_stack_symbol()
                    .is_some_and(|bottom| stack.holds_only(bottom))
        }
    }
}

/// Decide whether `transition` can fire from `config`. Never mutates.
///
/// Both guards must hold:
/// - input: `ε` always; `?` iff no input is left; a symbol iff it is the
///   head of the remaining input.
/// - stack: `ε` always; `?` iff the stack counts as empty under `policy`;
///   a symbol iff it is the top of the stack.
pub fn is_applicable(
    config: &Configuration,
    transition: &Transition,
    automaton: &Automaton,
    policy: EmptyStackPolicy,
) -> bool {
    let input_ok = match transition.read() {
        Guard::Epsilon => true,
        Guard::WildcardEmpty => config.is_input_empty(),
        Guard::Concrete(sym) => config.current_input() == Some(sym),
    };
    if !input_ok {
        return false;
    }

    match transition.pop() {
        Guard::Epsilon => true,
        Guard::WildcardEmpty => stack_counts_as_empty(&config.stack, automaton, policy),
        // An empty stack has no top; this is a mismatch, not an error.
        Guard::Concrete(sym) => config.stack.peek().ok() == Some(sym),
    }
}

/// Produce the successor of `config` under an applicable `transition`.
///
/// The source configuration is left untouched. Only a concrete `read`
/// consumes input and only a concrete `pop` pops; `push` is applied last.
/// Fails with [`EngineError::EmptyStack`] only if the transition was not
/// applicable to begin with.
pub fn apply_transition(
    config: &Configuration,
    transition: &Transition,
) -> Result<Configuration, EngineError> {
    let mut next = config.clone();
    next.state = transition.to_state().clone();

    if let Guard::Concrete(_) = transition.read() {
        next.remaining_input.pop_front();
    }
    if let Guard::Concrete(_) = transition.pop() {
        next.stack.pop()?;
    }
    next.stack.push(transition.push());

    let entry = transition.describe();
    trace!(transition = %entry, "applied transition");
    next.history.push(entry);
    Ok(next)
}

/// Apply every applicable transition of `config.state`, in definition order.
///
/// An empty result means this configuration is a dead end for the current
/// step; other configurations of the frontier may still succeed.
pub fn simulate_step(
    config: &Configuration,
    automaton: &Automaton,
    policy: EmptyStackPolicy,
) -> Result<Vec<Configuration>, EngineError> {
    automaton
        .transitions_from(config.state.as_str())
        .iter()
        .filter(|t| is_applicable(config, t, automaton, policy))
        .map(|t| apply_transition(config, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pda_core::{AutomatonKind, Symbol};

    /// PDA with a bottom marker `Z` exercising every guard kind.
    fn guards_pda() -> Automaton {
        Automaton::builder(AutomatonKind::Pda)
            .states(["q0", "q1", "q2", "q3", "q4"])
            .input_alphabet(["a", "b"])
            .stack_alphabet(["Z", "A"])
            .initial_state("q0")
            .final_states(["q4"])
            .initial_stack_symbol("Z")
            .rule("q0", "q1", "a", "Z", ["Z", "A"])
            .rule("q0", "q2", "ε", "ε", Vec::<&str>::new())
            .rule("q0", "q3", "?", "ε", Vec::<&str>::new())
            .rule("q0", "q4", "ε", "?", Vec::<&str>::new())
            .rule("q0", "q1", "b", "ε", Vec::<&str>::new())
            .build()
            .unwrap()
    }

    fn start(a: &Automaton, input: &str) -> Configuration {
        Configuration::initial(a, Symbol::from_chars(input))
    }

    #[test]
    fn concrete_read_and_pop() {
        let a = guards_pda();
        let config = start(&a, "a");
        let t = &a.transitions_from("q0")[0];
        assert!(is_applicable(&config, t, &a, EmptyStackPolicy::Strict));

        let next = apply_transition(&config, t).unwrap();
        assert_eq!(next.state.as_str(), "q1");
        assert!(next.is_input_empty());
        assert_eq!(next.stack.to_string(), "Z,A");
        assert_eq!(next.history.len(), 2);
        assert_eq!(next.history[1], "q0 → q1 [read: a, pop: Z, push: Z,A]");
    }

    #[test]
    fn concrete_read_mismatch() {
        let a = guards_pda();
        let config = start(&a, "b");
        let t = &a.transitions_from("q0")[0];
        assert!(!is_applicable(&config, t, &a, EmptyStackPolicy::Strict));
    }

    #[test]
    fn concrete_read_on_exhausted_input() {
        let a = guards_pda();
        let config = start(&a, "");
        let t = &a.transitions_from("q0")[4];
        assert!(!is_applicable(&config, t, &a, EmptyStackPolicy::Strict));
    }

    #[test]
    fn wildcard_read_requires_empty_input() {
        let a = guards_pda();
        let t = &a.transitions_from("q0")[2];
        assert!(!is_applicable(&start(&a, "a"), t, &a, EmptyStackPolicy::Strict));

        let config = start(&a, "");
        assert!(is_applicable(&config, t, &a, EmptyStackPolicy::Strict));
        let next = apply_transition(&config, t).unwrap();
        assert_eq!(next.stack, config.stack);
        assert!(next.is_input_empty());
    }

    #[test]
    fn wildcard_pop_policies() {
        let a = guards_pda();
        let t = &a.transitions_from("q0")[3];
        let with_sentinel = start(&a, "");

        assert!(!is_applicable(&with_sentinel, t, &a, EmptyStackPolicy::Strict));
        assert!(is_applicable(
            &with_sentinel,
            t,
            &a,
            EmptyStackPolicy::SentinelCountsAsEmpty
        ));

        let mut truly_empty = with_sentinel.clone();
        truly_empty.stack = Stack::new();
        assert!(is_applicable(&truly_empty, t, &a, EmptyStackPolicy::Strict));

        // The wildcard never pops, so the sentinel survives.
        let next = apply_transition(&with_sentinel, t).unwrap();
        assert_eq!(next.stack.to_string(), "Z");
    }

    #[test]
    fn concrete_pop_on_empty_stack_is_not_applicable() {
        let a = guards_pda();
        let mut config = start(&a, "a");
        config.stack = Stack::new();
        let t = &a.transitions_from("q0")[0];
        assert!(!is_applicable(&config, t, &a, EmptyStackPolicy::Strict));
    }

    #[test]
    fn simulate_step_collects_in_definition_order() {
        let a = guards_pda();
        let config = start(&a, "a");
        let next = simulate_step(&config, &a, EmptyStackPolicy::Strict).unwrap();
        let states: Vec<&str> = next.iter().map(|c| c.state.as_str()).collect();
        assert_eq!(states, ["q1", "q2"]);
    }

    #[test]
    fn simulate_step_does_not_mutate_source() {
        let a = guards_pda();
        let config = start(&a, "a");
        let before = config.clone();
        let _ = simulate_step(&config, &a, EmptyStackPolicy::Strict).unwrap();
        assert_eq!(config, before);
    }

    #[test]
    fn forks_do_not_alias_stacks() {
        let a = guards_pda();
        let config = start(&a, "a");
        let mut next = simulate_step(&config, &a, EmptyStackPolicy::Strict).unwrap();
        assert_eq!(next.len(), 2);
        let sibling_before = next[1].stack.clone();

        next[0].stack.push(&Symbol::from_chars("AAA"));
        next[0].stack.pop().unwrap();
        assert_eq!(next[1].stack, sibling_before);
        assert_eq!(config.stack.to_string(), "Z");
    }

    #[test]
    fn misuse_surfaces_empty_stack() {
        let a = guards_pda();
        let mut config = start(&a, "a");
        config.stack = Stack::new();
        let err = apply_transition(&config, &a.transitions_from("q0")[0]).unwrap_err();
        assert_eq!(err, EngineError::EmptyStack);
    }
}
