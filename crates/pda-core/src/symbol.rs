// Symbol tokens and transition guards.

use std::borrow::Borrow;
use std::fmt;

/// Display text for the epsilon guard.
pub const EPSILON_TEXT: &str = "ε";

/// Display text for the "resource is empty" wildcard guard.
pub const WILDCARD_TEXT: &str = "?";

/// An opaque symbol token (input symbol, stack symbol, or state name).
///
/// Symbols compare by their text. Reserved meanings such as epsilon never
/// live inside a `Symbol`; they are expressed by [`Guard`] instead, so an
/// alphabet may freely contain a symbol spelled `ε` or `?`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(String);

/// State names share the symbol representation.
pub type State = Symbol;

impl Symbol {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split an input string into one symbol per character.
    pub fn from_chars(input: &str) -> Vec<Symbol> {
        input.chars().map(Symbol::from).collect()
    }

    /// Split an input string on `separator`, dropping empty pieces.
    ///
    /// Used for alphabets whose symbols are longer than one character.
    pub fn split(input: &str, separator: &str) -> Vec<Symbol> {
        input
            .split(separator)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Symbol::from)
            .collect()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

/// The `read` or `pop` component of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Always satisfied; consumes nothing.
    Epsilon,
    /// Satisfied only when the guarded resource (input or stack) is empty.
    WildcardEmpty,
    /// Satisfied when the head of the resource equals this symbol.
    Concrete(Symbol),
}

impl Guard {
    /// Parse guard text as written in automaton files.
    ///
    /// `ε`, `eps`, `epsilon` and the empty string are epsilon; `?` is the
    /// empty-resource wildcard; anything else is a concrete symbol.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "" | EPSILON_TEXT | "eps" | "epsilon" => Guard::Epsilon,
            WILDCARD_TEXT => Guard::WildcardEmpty,
            other => Guard::Concrete(Symbol::from(other)),
        }
    }

    pub fn concrete(symbol: impl Into<Symbol>) -> Self {
        Guard::Concrete(symbol.into())
    }

    /// The concrete symbol, if any.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            Guard::Concrete(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Guard::Epsilon)
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Epsilon => f.write_str(EPSILON_TEXT),
            Guard::WildcardEmpty => f.write_str(WILDCARD_TEXT),
            Guard::Concrete(s) => write!(f, "{s}"),
        }
    }
}
