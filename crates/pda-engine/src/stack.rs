// Symbol stack with top-of-stack semantics.

use std::fmt;

use pda_core::Symbol;
use pda_core::symbol::EPSILON_TEXT;

use crate::EngineError;

/// An ordered sequence of stack symbols; the top is the last element.
///
/// The stack owns its storage and `clone()` yields an independent copy, so
/// forked configurations never share a stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Stack {
    items: Vec<Symbol>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack holding only `bottom`.
    pub fn with_bottom(bottom: Symbol) -> Self {
        Self { items: vec![bottom] }
    }

    /// Push `symbols` in order. The last symbol becomes the new top.
    pub fn push(&mut self, symbols: &[Symbol]) {
        self.items.extend_from_slice(symbols);
    }

    /// Remove and return the top symbol.
    pub fn pop(&mut self) -> Result<Symbol, EngineError> {
        self.items.pop().ok_or(EngineError::EmptyStack)
    }

    /// Return the top symbol without removing it.
    pub fn peek(&self) -> Result<&Symbol, EngineError> {
        self.items.last().ok_or(EngineError::EmptyStack)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Contents from bottom to top.
    pub fn symbols(&self) -> &[Symbol] {
        &self.items
    }

    /// Whether the stack holds exactly `symbol` and nothing else.
    pub fn holds_only(&self, symbol: &Symbol) -> bool {
        matches!(self.items.as_slice(), [only] if only == symbol)
    }
}

impl fmt::Display for Stack {
    /// Bottom-to-top, comma separated; `ε` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return f.write_str(EPSILON_TEXT);
        }
        for (i, sym) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{sym}")?;
        }
        Ok(())
    }
}
