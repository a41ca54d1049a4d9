//! CSV transition tables.
//!
//! Definition fields travel in `#META,<key>,<values>` rows, with multiple
//! values separated by `;`. A header row starting with `from` precedes the
//! transition rows, which have exactly five columns:
//!
//! ```text
//! #META,states,q;f
//! #META,input_alphabet,(;)
//! #META,stack_alphabet,X
//! #META,initial_state,q
//! from,to,read,pop,push
//! q,q,(,ε,X
//! q,q,),X,ε
//! ```
//!
//! Fields are not quoted, so `,` and `;` cannot appear inside symbols.

use crate::LoadError;
use crate::document::{AutomatonDocument, OneOrMany, PushField, Scalar, TransitionDocument};

const META: &str = "#META";

fn syntax(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Syntax {
        line,
        message: message.into(),
    }
}

fn values(field: &str) -> Vec<Scalar> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Scalar::from)
        .collect()
}

fn meta(doc: &mut AutomatonDocument, line: usize, cells: &[&str]) -> Result<(), LoadError> {
    let [key, value] = cells else {
        return Err(syntax(line, "expected #META,<key>,<values>"));
    };
    let value = value.trim();
    match key.trim() {
        "kind" => doc.kind = Some(value.to_string()),
        "states" => doc.states = values(value),
        "input_alphabet" => doc.input_alphabet = values(value),
        "stack_alphabet" => doc.stack_alphabet = values(value),
        "initial_state" => doc.initial_state = (!value.is_empty()).then(|| Scalar::from(value)),
        "initial_stack" => doc.initial_stack = Some(OneOrMany::Many(values(value))),
        "final_states" => doc.final_states = values(value),
        other => return Err(syntax(line, format!("unknown #META key '{other}'"))),
    }
    Ok(())
}

/// Parse CSV automaton text into a document.
pub fn parse(text: &str) -> Result<AutomatonDocument, LoadError> {
    let mut doc = AutomatonDocument::default();
    let mut seen_header = false;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }
        let cells: Vec<&str> = row.split(',').map(str::trim).collect();

        if cells[0] == META {
            meta(&mut doc, line, &cells[1..])?;
        } else if cells[0].starts_with('#') {
            continue;
        } else if cells[0].eq_ignore_ascii_case("from") {
            seen_header = true;
        } else {
            if !seen_header {
                return Err(syntax(
                    line,
                    "transition row before the 'from,to,read,pop,push' header",
                ));
            }
            let [from, to, read, pop, push] = cells.as_slice() else {
                return Err(syntax(
                    line,
                    format!("expected 5 columns, found {}", cells.len()),
                ));
            };
            doc.transitions.push(TransitionDocument {
                from: (*from).into(),
                to: (*to).into(),
                read: Some((*read).into()),
                pop: Some((*pop).into()),
                push: Some(PushField::Text((*push).into())),
            });
        }
    }
    Ok(doc)
}
