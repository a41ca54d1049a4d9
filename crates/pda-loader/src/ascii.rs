//! ASCII mini-language for hand-written automata.
//!
//! ```text
//! # a^n b^n
//! STATES: q0, q1, q2
//! INPUT: a, b
//! STACK: Z, A
//! INITIAL: q0
//! INITIAL_STACK: Z
//! FINAL: q2
//! q0 -> q0 [read=a, push=A]
//! q0 -> q1 [read=b, pop=A]
//! q1 -> q1 [read=b, pop=A]
//! q1 -> q2 [read=?, pop=Z, push=Z]
//! ```
//!
//! Header lines are `KEY: v1, v2`; `KIND` takes `pda` or `dfa`. Transition
//! parameters default to `ε` when omitted, and `push` is split one symbol per
//! character. `#` starts a comment.

use crate::LoadError;
use crate::document::{AutomatonDocument, OneOrMany, PushField, Scalar, TransitionDocument};

fn syntax(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Syntax {
        line,
        message: message.into(),
    }
}

fn list(value: &str) -> Vec<Scalar> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Scalar::from)
        .collect()
}

fn single(value: &str) -> Option<Scalar> {
    let value = value.trim();
    (!value.is_empty()).then(|| Scalar::from(value))
}

fn header(
    doc: &mut AutomatonDocument,
    line: usize,
    key: &str,
    value: &str,
) -> Result<(), LoadError> {
    match key.trim().to_ascii_uppercase().as_str() {
        "KIND" => doc.kind = Some(value.trim().to_string()),
        "STATES" => doc.states = list(value),
        "INPUT" | "INPUT_ALPHABET" => doc.input_alphabet = list(value),
        "STACK" | "STACK_ALPHABET" => doc.stack_alphabet = list(value),
        "INITIAL" | "INITIAL_STATE" => doc.initial_state = single(value),
        "INITIAL_STACK" => doc.initial_stack = Some(OneOrMany::Many(list(value))),
        "FINAL" | "FINAL_STATES" => doc.final_states = list(value),
        other => return Err(syntax(line, format!("unknown header '{other}'"))),
    }
    Ok(())
}

fn transition(line: usize, from: &str, rest: &str) -> Result<TransitionDocument, LoadError> {
    let from = from.trim();
    let (to, params) = match rest.split_once('[') {
        Some((to, params)) => {
            let params = params
                .trim_end()
                .strip_suffix(']')
                .ok_or_else(|| syntax(line, "missing closing ']'"))?;
            (to.trim(), params)
        }
        None => (rest.trim(), ""),
    };
    if from.is_empty() || to.is_empty() {
        return Err(syntax(line, "transition needs a source and a target state"));
    }

    let mut t = TransitionDocument {
        from: from.into(),
        to: to.into(),
        read: None,
        pop: None,
        push: None,
    };
    for param in params.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| syntax(line, format!("expected key=value, got '{param}'")))?;
        let value = Scalar::from(value.trim());
        match key.trim() {
            "read" => t.read = Some(value),
            "pop" => t.pop = Some(value),
            "push" => t.push = Some(PushField::Text(value)),
            other => return Err(syntax(line, format!("unknown transition parameter '{other}'"))),
        }
    }
    Ok(t)
}

/// Parse ASCII automaton text into a document.
pub fn parse(text: &str) -> Result<AutomatonDocument, LoadError> {
    let mut doc = AutomatonDocument::default();
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
        if content.is_empty() {
            continue;
        }
        if let Some((from, rest)) = content.split_once("->") {
            doc.transitions.push(transition(line, from, rest)?);
        } else if let Some((key, value)) = content.split_once(':') {
            header(&mut doc, line, key, value)?;
        } else {
            return Err(syntax(line, format!("unrecognized line '{content}'")));
        }
    }
    Ok(doc)
}
