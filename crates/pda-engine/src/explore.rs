// Frontier expansion strategies, loop suppression, and pruning.
//
// The run loop in `run.rs` is strategy-agnostic: it hands the current
// frontier to an `Explorer` and gets the next frontier back. Breadth-first
// expansion keeps every branch (subject to the frontier cap); the random
// explorer collapses the frontier to one illustrative path.

use std::cmp::Reverse;

use hashbrown::HashMap;
use pda_core::Automaton;
use rand::Rng;
use tracing::debug;

use crate::EngineError;
use crate::configuration::{Configuration, Signature};
use crate::options::RunOptions;
use crate::step::simulate_step;

/// Per-run visit counts keyed by configuration signature.
#[derive(Debug)]
pub struct VisitCounts {
    counts: HashMap<Signature, u32>,
    limit: u32,
}

impl VisitCounts {
    pub fn new(limit: u32) -> Self {
        Self {
            counts: HashMap::new(),
            limit,
        }
    }

    /// Visits recorded so far for `signature`.
    pub fn count(&self, signature: &Signature) -> u32 {
        self.counts.get(signature).copied().unwrap_or(0)
    }

    /// Whether `signature` is still below the visit cap.
    pub fn can_visit(&self, signature: &Signature) -> bool {
        self.count(signature) < self.limit
    }

    pub fn record(&mut self, signature: Signature) {
        *self.counts.entry(signature).or_insert(0) += 1;
    }

    /// Record `config` if its signature is below the cap.
    ///
    /// Returns `false` (and records nothing) for a configuration that has
    /// to be discarded.
    pub fn admit(&mut self, config: &Configuration) -> bool {
        let signature = config.signature();
        if !self.can_visit(&signature) {
            return false;
        }
        self.record(signature);
        true
    }
}

/// Keep the `max` most promising configurations.
///
/// Ranking: configurations in a final state first, then less remaining
/// input, then a smaller stack. The sort is stable, so ties keep their
/// frontier order and the result is deterministic.
///
/// Returns the number of discarded configurations.
pub fn prune(frontier: &mut Vec<Configuration>, automaton: &Automaton, max: usize) -> usize {
    if frontier.len() <= max {
        return 0;
    }
    frontier.sort_by_key(|c| {
        (
            Reverse(automaton.is_final(c.state.as_str())),
            c.remaining_input.len(),
            c.stack.len(),
        )
    });
    let dropped = frontier.len() - max;
    frontier.truncate(max);
    dropped
}

/// Strategy for advancing a frontier by one logical step.
pub trait Explorer {
    /// Compute the next frontier from `frontier`.
    ///
    /// Successors whose signature already reached the visit cap are
    /// discarded silently. An empty result ends the run.
    fn advance(
        &mut self,
        automaton: &Automaton,
        options: &RunOptions,
        frontier: Vec<Configuration>,
        visits: &mut VisitCounts,
    ) -> Result<Vec<Configuration>, EngineError>;
}

/// Expands every configuration of the frontier.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthExplorer;

impl Explorer for BreadthExplorer {
    fn advance(
        &mut self,
        automaton: &Automaton,
        options: &RunOptions,
        frontier: Vec<Configuration>,
        visits: &mut VisitCounts,
    ) -> Result<Vec<Configuration>, EngineError> {
        let mut next = Vec::new();
        let mut suppressed = 0usize;

        for config in &frontier {
            for successor in simulate_step(config, automaton, options.empty_stack_policy)? {
                if visits.admit(&successor) {
                    next.push(successor);
                } else {
                    suppressed += 1;
                }
            }
        }

        let pruned = prune(&mut next, automaton, options.max_frontier_size);
        debug!(frontier = next.len(), suppressed, pruned, "breadth expansion");
        Ok(next)
    }
}

/// Follows one randomly chosen path.
///
/// Each step picks one configuration of the frontier uniformly at random,
/// then one of its admissible successors uniformly at random. If the chosen
/// configuration has no admissible successor it is dropped and the rest of
/// the frontier carries over.
#[derive(Debug, Clone)]
pub struct RandomExplorer<R> {
    rng: R,
}

impl<R: Rng> RandomExplorer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Explorer for RandomExplorer<R> {
    fn advance(
        &mut self,
        automaton: &Automaton,
        options: &RunOptions,
        mut frontier: Vec<Configuration>,
        visits: &mut VisitCounts,
    ) -> Result<Vec<Configuration>, EngineError> {
        if frontier.is_empty() {
            return Ok(frontier);
        }

        let chosen = frontier.remove(self.rng.gen_range(0..frontier.len()));
        let mut candidates: Vec<Configuration> =
            simulate_step(&chosen, automaton, options.empty_stack_policy)?
                .into_iter()
                .filter(|c| visits.can_visit(&c.signature()))
                .collect();

        if candidates.is_empty() {
            debug!(state = %chosen.state, remaining = frontier.len(), "random path dead end");
            return Ok(frontier);
        }

        let picked = candidates.swap_remove(self.rng.gen_range(0..candidates.len()));
        visits.record(picked.signature());
        debug!(state = %picked.state, "random step");
        Ok(vec![picked])
    }
}

/// Runtime-selected explorer, built from [`ExplorationStrategy`](crate::ExplorationStrategy).
#[derive(Debug, Clone)]
pub enum Exploration<R> {
    Breadth(BreadthExplorer),
    Random(RandomExplorer<R>),
}

impl<R: Rng> Explorer for Exploration<R> {
    fn advance(
        &mut self,
        automaton: &Automaton,
        options: &RunOptions,
        frontier: Vec<Configuration>,
        visits: &mut VisitCounts,
    ) -> Result<Vec<Configuration>, EngineError> {
        match self {
            Exploration::Breadth(e) => e.advance(automaton, options, frontier, visits),
            Exploration::Random(e) => e.advance(automaton, options, frontier, visits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pda_core::{AutomatonKind, Symbol};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fan_out() -> Automaton {
        Automaton::builder(AutomatonKind::Pda)
            .states(["q0", "p1", "p2", "p3", "f"])
            .input_alphabet(["a"])
            .stack_alphabet(["A"])
            .initial_state("q0")
            .final_states(["f"])
            .rule("q0", "p1", "ε", "ε", ["A", "A"])
            .rule("q0", "p2", "ε", "ε", Vec::<&str>::new())
            .rule("q0", "p3", "a", "ε", ["A", "A", "A"])
            .rule("q0", "f", "ε", "ε", ["A", "A", "A", "A"])
            .build()
            .unwrap()
    }

    fn start(a: &Automaton, input: &str) -> Configuration {
        Configuration::initial(a, Symbol::from_chars(input))
    }

    #[test]
    fn visit_counts_cap() {
        let a = fan_out();
        let config = start(&a, "a");
        let mut visits = VisitCounts::new(2);
        assert!(visits.admit(&config));
        assert!(visits.admit(&config));
        assert!(!visits.admit(&config));
        assert_eq!(visits.count(&config.signature()), 2);
    }

    #[test]
    fn prune_ranks_final_then_input_then_stack() {
        let a = fan_out();
        let mut frontier = simulate_step(
            &start(&a, "a"),
            &a,
            crate::EmptyStackPolicy::Strict,
        )
        .unwrap();
        assert_eq!(frontier.len(), 4);

        let dropped = prune(&mut frontier, &a, 3);
        assert_eq!(dropped, 1);
        let states: Vec<&str> = frontier.iter().map(|c| c.state.as_str()).collect();
        assert_eq!(states, ["f", "p3", "p2"]);
    }

    #[test]
    fn prune_within_cap_is_noop() {
        let a = fan_out();
        let mut frontier = vec![start(&a, "a")];
        assert_eq!(prune(&mut frontier, &a, 1), 0);
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn breadth_discards_capped_signatures() {
        let a = fan_out();
        let options = RunOptions::default().with_max_visits_per_signature(1);
        let config = start(&a, "a");
        let mut visits = VisitCounts::new(options.max_visits_per_signature);

        let first = BreadthExplorer
            .advance(&a, &options, vec![config.clone()], &mut visits)
            .unwrap();
        assert_eq!(first.len(), 4);

        // Same configuration again: every successor signature is already capped.
        let second = BreadthExplorer
            .advance(&a, &options, vec![config], &mut visits)
            .unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn random_collapses_to_one_path() {
        let a = fan_out();
        let options = RunOptions::default();
        let mut visits = VisitCounts::new(options.max_visits_per_signature);
        let mut explorer = RandomExplorer::new(ChaCha8Rng::seed_from_u64(42));

        let next = explorer
            .advance(&a, &options, vec![start(&a, "a")], &mut visits)
            .unwrap();
        assert_eq!(next.len(), 1);
        assert_eq!(visits.count(&next[0].signature()), 1);
    }

    #[test]
    fn random_dead_end_drops_chosen_configuration() {
        let a = fan_out();
        let options = RunOptions::default();
        let mut visits = VisitCounts::new(options.max_visits_per_signature);
        let mut explorer = RandomExplorer::new(ChaCha8Rng::seed_from_u64(1));

        let mut dead = start(&a, "");
        dead.state = Symbol::from("p2");
        let next = explorer.advance(&a, &options, vec![dead], &mut visits).unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn random_is_reproducible_for_equal_seeds() {
        let a = fan_out();
        let options = RunOptions::default();
        let pick = |seed| {
            let mut visits = VisitCounts::new(options.max_visits_per_signature);
            let mut explorer = RandomExplorer::new(ChaCha8Rng::seed_from_u64(seed));
            explorer
                .advance(&a, &options, vec![start(&a, "a")], &mut visits)
                .unwrap()
        };
        assert_eq!(pick(9), pick(9));
    }
}
