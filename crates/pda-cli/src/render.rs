// Text rendering of configurations, frontier snapshots, and automaton diagrams.

use std::cmp::Ordering;

use pda_core::symbol::EPSILON_TEXT;
use pda_core::{Automaton, State, Symbol};
use pda_engine::Configuration;

const BANNER: &str = "============================================";

/// Multi-line view of one configuration. The stack is listed top first.
pub fn render_config(config: &Configuration) -> String {
    let stack = if config.stack.is_empty() {
        EPSILON_TEXT.to_string()
    } else {
        config
            .stack
            .symbols()
            .iter()
            .rev()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "state: {}\ninput: {}\nstack (top first): {}\n",
        config.state,
        config.remaining_input_text(),
        stack
    )
}

/// One frontier snapshot framed by banner lines.
pub fn render_step_list(step: usize, frontier: &[Configuration]) -> String {
    let mut out = vec![format!("{BANNER}\nstep {step}")];
    match frontier {
        [] => out.push("(no active configurations)".to_string()),
        [single] => out.push(render_config(single)),
        many => {
            for (i, config) in many.iter().enumerate() {
                out.push(format!("--- configuration {} of {} ---", i + 1, many.len()));
                out.push(render_config(config));
            }
        }
    }
    out.push(BANNER.to_string());
    out.join("\n")
}

// ---------------------------------------------------------------------------
// Diagram
// ---------------------------------------------------------------------------

/// Order state names by text prefix, then by numeric suffix: `q2` before `q10`.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    fn key(s: &str) -> (&str, u64) {
        let digits = s.len() - s.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let (prefix, suffix) = s.split_at(s.len() - digits);
        match suffix.parse() {
            Ok(n) => (prefix, n),
            Err(_) => (s, 0),
        }
    }
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

/// Rows of a state box. Final states get an inner ring.
fn state_box(label: &str, double: bool) -> Vec<String> {
    let len = label.chars().count();
    let inner = (len + 2).max(3);
    let dash = |n: usize| "-".repeat(n);
    if !double {
        vec![
            format!(" .{}. ", dash(inner)),
            format!(" /{}\\ ", " ".repeat(inner)),
            format!("| {label:^inner$} |"),
            format!(" \\{}/ ", " ".repeat(inner)),
            format!(" `{}' ", dash(inner)),
        ]
    } else {
        let ring = len.max(inner.saturating_sub(4));
        let pad = inner - ring;
        let (left, right) = (" ".repeat(pad / 2), " ".repeat(pad - pad / 2));
        vec![
            format!(" .{}. ", dash(inner)),
            format!("/{left}.{}.{right}\\", dash(ring)),
            format!("|{left}({label:^ring$}){right}|"),
            format!("\\{left}`{}'{right}/", dash(ring)),
            format!(" `{}' ", dash(inner)),
        ]
    }
}

/// Character grid that grows on demand.
#[derive(Debug, Default)]
struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    fn ensure(&mut self, row: usize, col: usize) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let line = &mut self.rows[row];
        if line.len() <= col {
            line.resize(col + 1, ' ');
        }
    }

    fn is_free(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|line| line.get(col))
            .is_none_or(|&c| c == ' ')
    }

    fn put(&mut self, row: usize, col: usize, ch: char) {
        self.ensure(row, col);
        self.rows[row][col] = ch;
    }

    /// Write `ch` only over a blank cell.
    fn put_if_free(&mut self, row: usize, col: usize, ch: char) {
        if self.is_free(row, col) {
            self.put(row, col, ch);
        }
    }

    /// Write `text` only if every cell it covers is blank.
    fn try_write(&mut self, row: usize, col: usize, text: &str) -> bool {
        let fits = text
            .chars()
            .enumerate()
            .all(|(i, _)| self.is_free(row, col + i));
        if fits {
            self.write(row, col, text);
        }
        fits
    }

    fn write(&mut self, row: usize, col: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(row, col + i, ch);
        }
    }

    /// Place a label on the first free spot, scanning `rows` in order and
    /// shifting up to ten columns either way. Overwrites at `col` on the
    /// first row when nothing fits.
    fn place(&mut self, rows: &[usize], col: usize, text: &str) {
        for &row in rows {
            if self.try_write(row, col, text) {
                return;
            }
            for shift in 1..=10 {
                if col >= shift && self.try_write(row, col - shift, text) {
                    return;
                }
                if self.try_write(row, col + shift, text) {
                    return;
                }
            }
        }
        if let Some(&row) = rows.first() {
            self.write(row, col, text);
        }
    }

    fn into_lines(self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        let leading = lines.iter().take_while(|l| l.is_empty()).count();
        lines.drain(..leading);
        lines
    }
}

const SPACING: usize = 6;
const TOP_MARGIN: usize = 6;
const BOX_HEIGHT: usize = 5;

struct Placed<'a> {
    state: &'a State,
    left: usize,
    right: usize,
}

impl Placed<'_> {
    fn center(&self) -> usize {
        (self.left + self.right + 1) / 2
    }
}

fn find<'p, 'a>(placed: &'p [Placed<'a>], state: &State) -> Option<&'p Placed<'a>> {
    placed.iter().find(|p| p.state == state)
}

fn join_states(states: &[&State]) -> String {
    states
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header plus an ASCII diagram of the automaton.
///
/// States are laid out left to right in natural order. Transitions between
/// the same pair of states share one arrow whose label lists every
/// `(read,pop,push)` triple; rightward arrows are drawn above the box
/// midline with labels above, leftward arrows below it with labels below.
/// Self-loops are drawn above their state.
pub fn render_automaton(automaton: &Automaton) -> String {
    let mut states: Vec<&State> = automaton.states().iter().collect();
    states.sort_by(|a, b| natural_cmp(a.as_str(), b.as_str()));

    let mut canvas = Canvas::default();
    let mut placed = Vec::with_capacity(states.len());
    let mut col = 0;
    for &state in &states {
        let rows = state_box(state.as_str(), automaton.is_final(state.as_str()));
        let width = rows[0].chars().count();
        for (r, line) in rows.iter().enumerate() {
            canvas.write(TOP_MARGIN + r, col, line);
        }
        placed.push(Placed {
            state,
            left: col,
            right: col + width - 1,
        });
        col += width + SPACING;
    }

    // Group labels by (from, to), keeping first-appearance order.
    let mut groups: Vec<(&State, &State, Vec<String>)> = Vec::new();
    for t in automaton.transitions() {
        let label = format!("({},{},{})", t.read(), t.pop(), t.push_text(""));
        match groups
            .iter_mut()
            .find(|(from, to, _)| *from == t.from_state() && *to == t.to_state())
        {
            Some((_, _, labels)) => labels.push(label),
            None => groups.push((t.from_state(), t.to_state(), vec![label])),
        }
    }

    let above: Vec<usize> = (0..TOP_MARGIN).rev().collect();
    let below: Vec<usize> = (TOP_MARGIN + BOX_HEIGHT..TOP_MARGIN + BOX_HEIGHT + 6).collect();
    let inside_box = |c: usize| placed.iter().any(|p| (p.left..=p.right).contains(&c));

    // Loops first so arrow labels route around them.
    for (from, _, labels) in groups.iter().filter(|(from, to, _)| from == to) {
        let Some(p) = find(&placed, from) else { continue };
        let text = format!("↶{}", labels.join(" | "));
        let start = p.center().saturating_sub(text.chars().count() / 2);
        canvas.place(&above, start, &text);
    }

    for (from, to, labels) in groups.iter().filter(|(from, to, _)| from != to) {
        let (Some(src), Some(dst)) = (find(&placed, from), find(&placed, to)) else {
            continue;
        };
        let text = labels.join(" | ");
        let (row, start, end, head_col, head, label_rows) = if src.right < dst.left {
            let (s, e) = (src.right + 1, dst.left - 1);
            (TOP_MARGIN + 1, s, e, e, '▶', &above)
        } else {
            let (s, e) = (dst.right + 1, src.left - 1);
            (TOP_MARGIN + 3, s, e, s, '◀', &below)
        };
        canvas.put_if_free(row, head_col, head);
        for c in start..=end {
            if !inside_box(c) {
                canvas.put_if_free(row, c, '─');
            }
        }
        let mid = (start + end) / 2;
        canvas.place(label_rows, mid.saturating_sub(text.chars().count() / 2), &text);
    }

    let mut finals: Vec<&State> = automaton.final_states().iter().collect();
    finals.sort_by(|a, b| natural_cmp(a.as_str(), b.as_str()));

    let mut out = vec![
        format!("== Automaton ({}) ==", automaton.kind()),
        format!("States: {}", join_states(&states)),
        format!(
            "Initial: {}   Final: {}",
            automaton.initial_state(),
            join_states(&finals)
        ),
        String::new(),
    ];
    out.extend(canvas.into_lines());
    out.join("\n")
}
