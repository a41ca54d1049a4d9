// Transition relation entries.

use std::fmt;

use crate::symbol::{EPSILON_TEXT, Guard, State, Symbol};

/// One entry `(from, to, read, pop, push)` of the transition relation.
///
/// `push` is applied left to right, so its last element ends up on top of
/// the stack. An empty `push` leaves the stack untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    from: State,
    to: State,
    read: Guard,
    pop: Guard,
    push: Vec<Symbol>,
}

impl Transition {
    pub fn new(
        from: impl Into<State>,
        to: impl Into<State>,
        read: Guard,
        pop: Guard,
        push: Vec<Symbol>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            read,
            pop,
            push,
        }
    }

    /// Shorthand for a finite-automaton edge: reads `symbol`, no stack effect.
    pub fn edge(from: impl Into<State>, to: impl Into<State>, symbol: impl Into<Symbol>) -> Self {
        Self::new(from, to, Guard::Concrete(symbol.into()), Guard::Epsilon, Vec::new())
    }

    pub fn from_state(&self) -> &State {
        &self.from
    }

    pub fn to_state(&self) -> &State {
        &self.to
    }

    pub fn read(&self) -> &Guard {
        &self.read
    }

    pub fn pop(&self) -> &Guard {
        &self.pop
    }

    pub fn push(&self) -> &[Symbol] {
        &self.push
    }

    /// Push sequence joined with `separator`, or `ε` when empty.
    pub fn push_text(&self, separator: &str) -> String {
        if self.push.is_empty() {
            EPSILON_TEXT.to_string()
        } else {
            self.push
                .iter()
                .map(Symbol::as_str)
                .collect::<Vec<_>>()
                .join(separator)
        }
    }

    /// Human-readable history line, e.g. `q0 → q1 [read: a, pop: Z, push: X,Z]`.
    pub fn describe(&self) -> String {
        format!(
            "{} → {} [read: {}, pop: {}, push: {}]",
            self.from,
            self.to,
            self.read,
            self.pop,
            self.push_text(",")
        )
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_with_push() {
        let t = Transition::new(
            "q0",
            "q1",
            Guard::concrete("a"),
            Guard::concrete("Z"),
            vec![Symbol::from("X"), Symbol::from("Z")],
        );
        assert_eq!(t.describe(), "q0 → q1 [read: a, pop: Z, push: X,Z]");
    }

    #[test]
    fn describe_empty_push_is_epsilon() {
        let t = Transition::new("q1", "q2", Guard::Epsilon, Guard::WildcardEmpty, Vec::new());
        assert_eq!(t.describe(), "q1 → q2 [read: ε, pop: ?, push: ε]");
    }

    #[test]
    fn edge_has_no_stack_effect() {
        let t = Transition::edge("s", "t", "1");
        assert_eq!(t.read(), &Guard::concrete("1"));
        assert_eq!(t.pop(), &Guard::Epsilon);
        assert!(t.push().is_empty());
    }
}
