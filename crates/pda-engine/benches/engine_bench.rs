// Criterion benchmarks for pda-engine.
//
// Run:
//   cargo bench -p pda-engine

use criterion::{Criterion, criterion_group, criterion_main};
use pda_core::{Automaton, AutomatonKind};
use pda_engine::{AcceptanceMode, RunOptions, Simulator};

/// Even-length palindromes: one midpoint guess per input position.
fn palindromes() -> Automaton {
    let none: [&str; 0] = [];
    Automaton::builder(AutomatonKind::Pda)
        .states(["push", "pop", "done"])
        .input_alphabet(["a", "b"])
        .stack_alphabet(["Z", "a", "b"])
        .initial_state("push")
        .final_states(["done"])
        .initial_stack_symbol("Z")
        .rule("push", "push", "a", "ε", ["a"])
        .rule("push", "push", "b", "ε", ["b"])
        .rule("push", "pop", "ε", "ε", none)
        .rule("pop", "pop", "a", "a", none)
        .rule("pop", "pop", "b", "b", none)
        .rule("pop", "done", "?", "Z", ["Z"])
        .build()
        .expect("palindrome automaton")
}

fn bench_accept_palindrome(c: &mut Criterion) {
    let automaton = palindromes();
    let sim = Simulator::new(&automaton, RunOptions::new(AcceptanceMode::FinalState))
        .expect("simulator");
    let half: String = "abbaab".repeat(8);
    let word: String = half.chars().chain(half.chars().rev()).collect();

    c.bench_function("accept_palindrome_96", |b| {
        b.iter(|| sim.accepts(std::hint::black_box(&word)).expect("run"))
    });
}

fn bench_reject_palindrome(c: &mut Criterion) {
    let automaton = palindromes();
    let sim = Simulator::new(&automaton, RunOptions::new(AcceptanceMode::FinalState))
        .expect("simulator");
    let word: String = "ab".repeat(48);

    c.bench_function("reject_alternating_96", |b| {
        b.iter(|| sim.accepts(std::hint::black_box(&word)).expect("run"))
    });
}

criterion_group!(benches, bench_accept_palindrome, bench_reject_palindrome);
criterion_main!(benches);
