// Format-neutral automaton document and its conversion to a validated Automaton.

use std::fmt;

use pda_core::symbol::EPSILON_TEXT;
use pda_core::{Automaton, AutomatonKind, Guard, Symbol, Transition};
use serde::{Deserialize, Serialize};

use crate::LoadError;

/// A scalar field value. YAML reads unquoted `0` or `true` as numbers and
/// booleans; symbols are text either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl Scalar {
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(Scalar),
    Many(Vec<Scalar>),
}

/// The `push` field: either a string (one symbol per character) or an
/// explicit list of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PushField {
    Symbols(Vec<Scalar>),
    Text(Scalar),
}

impl PushField {
    /// Symbols to push, in push order: the last one ends on top. `ε` and
    /// the empty string push nothing.
    pub fn symbols(&self) -> Vec<Symbol> {
        match self {
            PushField::Text(text) => {
                let text = text.text();
                if Guard::parse(&text).is_epsilon() {
                    Vec::new()
                } else {
                    text.chars()
                        .filter(|c| !c.is_whitespace())
                        .map(Symbol::from)
                        .collect()
                }
            }
            PushField::Symbols(items) => items
                .iter()
                .map(Scalar::text)
                .filter(|s| !Guard::parse(s).is_epsilon())
                .map(|s| Symbol::from(s.trim()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDocument {
    pub from: Scalar,
    pub to: Scalar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push: Option<PushField>,
}

impl TransitionDocument {
    pub fn new(from: &str, to: &str, read: &str, pop: &str, push: &str) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            read: Some(read.into()),
            pop: Some(pop.into()),
            push: Some(PushField::Text(push.into())),
        }
    }

    fn into_transition(self) -> Transition {
        let guard = |field: Option<Scalar>| match field {
            Some(s) => Guard::parse(&s.text()),
            None => Guard::Epsilon,
        };
        let push = self.push.as_ref().map(PushField::symbols).unwrap_or_default();
        Transition::new(
            self.from.text(),
            self.to.text(),
            guard(self.read),
            guard(self.pop),
            push,
        )
    }
}

/// An automaton as written in a file, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    #[serde(default)]
    pub kind: Option<String>,
    pub states: Vec<Scalar>,
    #[serde(default)]
    pub input_alphabet: Vec<Scalar>,
    #[serde(default)]
    pub stack_alphabet: Vec<Scalar>,
    #[serde(default)]
    pub initial_state: Option<Scalar>,
    #[serde(default)]
    pub initial_stack: Option<OneOrMany>,
    #[serde(default)]
    pub final_states: Vec<Scalar>,
    #[serde(default)]
    pub transitions: Vec<TransitionDocument>,
}

impl AutomatonDocument {
    pub fn from_yaml(text: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The single initial stack symbol, if any. `ε` counts as none.
    fn initial_stack_symbol(&self) -> Result<Option<Symbol>, LoadError> {
        let symbols: Vec<String> = match &self.initial_stack {
            None => Vec::new(),
            Some(OneOrMany::One(s)) => vec![s.text()],
            Some(OneOrMany::Many(items)) => items.iter().map(Scalar::text).collect(),
        };
        let symbols: Vec<String> = symbols
            .into_iter()
            .filter(|s| !Guard::parse(s).is_epsilon())
            .collect();
        match symbols.as_slice() {
            [] => Ok(None),
            [one] => Ok(Some(Symbol::from(one.trim()))),
            many => Err(LoadError::MultipleInitialStackSymbols(many.len())),
        }
    }

    /// Validate through the core builder.
    pub fn into_automaton(self) -> Result<Automaton, LoadError> {
        let kind: AutomatonKind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => AutomatonKind::default(),
            Some(k) => k.parse()?,
        };
        let initial_stack = self.initial_stack_symbol()?;
        let texts = |items: &[Scalar]| -> Vec<String> {
            items
                .iter()
                .map(|s| s.text().trim().to_string())
                .filter(|s| !s.is_empty() && s != EPSILON_TEXT)
                .collect()
        };

        let mut builder = Automaton::builder(kind)
            .states(texts(&self.states))
            .input_alphabet(texts(&self.input_alphabet))
            .stack_alphabet(texts(&self.stack_alphabet))
            .final_states(texts(&self.final_states));
        if let Some(initial) = &self.initial_state {
            builder = builder.initial_state(initial.text().trim());
        }
        if let Some(symbol) = initial_stack {
            builder = builder.initial_stack_symbol(symbol);
        }
        for t in self.transitions {
            builder = builder.transition(t.into_transition());
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pda_core::DefinitionError;

    const PARENS_YAML: &str = r#"
states: [q]
input_alphabet: ["(", ")"]
stack_alphabet: [X]
initial_state: q
transitions:
  - {from: q, to: q, read: "(", push: X}
  - {from: q, to: q, read: ")", pop: X, push: ε}
"#;

    #[test]
    fn yaml_defaults() {
        let a = AutomatonDocument::from_yaml(PARENS_YAML)
            .unwrap()
            .into_automaton()
            .unwrap();
        assert_eq!(a.kind(), AutomatonKind::Pda);
        assert!(a.initial_stack_symbol().is_none());
        let t = &a.transitions()[0];
        assert_eq!(t.pop(), &Guard::Epsilon);
        assert_eq!(t.push(), &[Symbol::from("X")]);
        assert!(a.transitions()[1].push().is_empty());
    }

    #[test]
    fn push_string_splits_per_character() {
        let push = PushField::Text("XZ".into());
        assert_eq!(push.symbols(), vec![Symbol::from("X"), Symbol::from("Z")]);
        assert!(PushField::Text("ε".into()).symbols().is_empty());
        assert!(PushField::Text("".into()).symbols().is_empty());
    }

    #[test]
    fn push_list_keeps_multichar_symbols() {
        let push = PushField::Symbols(vec!["AB".into(), "ε".into(), "Z".into()]);
        assert_eq!(push.symbols(), vec![Symbol::from("AB"), Symbol::from("Z")]);
    }

    #[test]
    fn unquoted_numbers_are_symbols() {
        let yaml = "kind: dfa\nstates: [s]\ninput_alphabet: [0, 1]\ninitial_state: s\n\
                    final_states: [s]\ntransitions:\n  - {from: s, to: s, read: 0}\n";
        let a = AutomatonDocument::from_yaml(yaml)
            .unwrap()
            .into_automaton()
            .unwrap();
        assert_eq!(a.kind(), AutomatonKind::Dfa);
        assert_eq!(a.transitions()[0].read(), &Guard::concrete("0"));
    }

    #[test]
    fn initial_stack_as_list() {
        let mut doc = AutomatonDocument::from_yaml(PARENS_YAML).unwrap();
        doc.stack_alphabet.push("Z".into());
        doc.initial_stack = Some(OneOrMany::Many(vec!["Z".into()]));
        let a = doc.clone().into_automaton().unwrap();
        assert_eq!(a.initial_stack_symbol(), Some(&Symbol::from("Z")));

        doc.initial_stack = Some(OneOrMany::Many(vec!["Z".into(), "X".into()]));
        assert!(matches!(
            doc.into_automaton(),
            Err(LoadError::MultipleInitialStackSymbols(2))
        ));
    }

    #[test]
    fn validation_errors_pass_through() {
        let mut doc = AutomatonDocument::from_yaml(PARENS_YAML).unwrap();
        doc.transitions.push(TransitionDocument::new("q", "r", "(", "ε", ""));
        assert!(matches!(
            doc.into_automaton(),
            Err(LoadError::Definition(DefinitionError::UnknownState { index: 3, .. }))
        ));
    }

    #[test]
    fn unknown_kind() {
        let mut doc = AutomatonDocument::from_yaml(PARENS_YAML).unwrap();
        doc.kind = Some("turing".into());
        assert!(matches!(
            doc.into_automaton(),
            Err(LoadError::Definition(DefinitionError::UnknownKind(_)))
        ));
    }

    #[test]
    fn missing_states_is_a_yaml_error() {
        let err = AutomatonDocument::from_yaml("initial_state: q\n").unwrap_err();
        assert!(matches!(err, LoadError::Yaml(_)));
    }
}
