// Simulator entry point and the lazy frontier snapshot iterator.

use std::mem;

use pda_core::{Automaton, Symbol};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::EngineError;
use crate::acceptance::{self, Acceptance, is_accepting};
use crate::configuration::Configuration;
use crate::explore::{BreadthExplorer, Exploration, Explorer, RandomExplorer, VisitCounts};
use crate::options::{ExplorationStrategy, RunOptions};
use crate::step::simulate_step;

/// One frontier, as produced by a single logical step of a [`Run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of expansions performed so far (0 for the initial frontier).
    pub step: usize,
    /// Active configurations, in frontier order.
    pub configurations: Vec<Configuration>,
    /// Index of the first accepting configuration, if any. A snapshot with
    /// an accepting configuration is always the last one of its run.
    pub accepted: Option<usize>,
}

impl Snapshot {
    /// The first accepting configuration, if any.
    pub fn accepting_configuration(&self) -> Option<&Configuration> {
        self.accepted.and_then(|i| self.configurations.get(i))
    }
}

/// A simulator bound to one automaton and one set of validated options.
///
/// Every call to [`run`](Self::run) starts from scratch; no state is carried
/// between calls, so equal inputs yield equal snapshot sequences.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    options: RunOptions,
}

impl<'a> Simulator<'a> {
    /// Bind `automaton` to `options`, rejecting invalid limits up front.
    pub fn new(automaton: &'a Automaton, options: RunOptions) -> Result<Self, EngineError> {
        options.validate()?;
        Ok(Self { automaton, options })
    }

    pub fn automaton(&self) -> &'a Automaton {
        self.automaton
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Successors of a single configuration under this simulator's policy.
    pub fn step(&self, config: &Configuration) -> Result<Vec<Configuration>, EngineError> {
        simulate_step(config, self.automaton, self.options.empty_stack_policy)
    }

    /// Run over `input`, one symbol per character.
    pub fn run(&self, input: &str) -> Run<'a, Exploration<ChaCha8Rng>> {
        self.run_symbols(Symbol::from_chars(input))
    }

    /// Run over pre-tokenized input. The random strategy draws from a
    /// `ChaCha8Rng` seeded with [`RunOptions::seed`].
    pub fn run_symbols(&self, input: Vec<Symbol>) -> Run<'a, Exploration<ChaCha8Rng>> {
        self.run_with_rng(input, ChaCha8Rng::seed_from_u64(self.options.seed))
    }

    /// Run over pre-tokenized input with an explicit random source.
    pub fn run_with_rng<R: Rng>(&self, input: Vec<Symbol>, rng: R) -> Run<'a, Exploration<R>> {
        let explorer = match self.options.strategy {
            ExplorationStrategy::Breadth => Exploration::Breadth(BreadthExplorer),
            ExplorationStrategy::Random => Exploration::Random(RandomExplorer::new(rng)),
        };
        Run::start(self.automaton, self.options, input, explorer)
    }

    /// Accept/reject verdict for `input`, one symbol per character.
    pub fn accepts(&self, input: &str) -> Result<Acceptance, EngineError> {
        acceptance::first_acceptance(self.run(input))
    }

    pub fn accepts_symbols(&self, input: Vec<Symbol>) -> Result<Acceptance, EngineError> {
        acceptance::first_acceptance(self.run_symbols(input))
    }
}

/// Lazy, finite sequence of frontier snapshots.
///
/// The first item is the initial frontier. Acceptance is checked on every
/// frontier before it is expanded; an accepting frontier is emitted and
/// ends the run. The run also ends when the frontier dies, and fails with
/// [`EngineError::StepLimitExceeded`] when more than `max_steps`
/// expansions would be needed. After an error the iterator is exhausted.
#[derive(Debug)]
pub struct Run<'a, E> {
    automaton: &'a Automaton,
    options: RunOptions,
    explorer: E,
    frontier: Vec<Configuration>,
    visits: VisitCounts,
    step: usize,
    started: bool,
    finished: bool,
}

impl<'a, E: Explorer> Run<'a, E> {
    /// Start a run with a caller-supplied explorer. Invalid limits are
    /// rejected before the initial frontier is built.
    pub fn new(
        automaton: &'a Automaton,
        options: RunOptions,
        input: Vec<Symbol>,
        explorer: E,
    ) -> Result<Self, EngineError> {
        options.validate()?;
        Ok(Self::start(automaton, options, input, explorer))
    }

    /// Start a run whose options were already validated.
    pub(crate) fn start(
        automaton: &'a Automaton,
        options: RunOptions,
        input: Vec<Symbol>,
        explorer: E,
    ) -> Self {
        let initial = Configuration::initial(automaton, input);
        let mut visits = VisitCounts::new(options.max_visits_per_signature);
        visits.record(initial.signature());
        Self {
            automaton,
            options,
            explorer,
            frontier: vec![initial],
            visits,
            step: 0,
            started: false,
            finished: false,
        }
    }

    /// Expansions performed so far.
    pub fn steps(&self) -> usize {
        self.step
    }

    /// Emit the current frontier, ending the run if it is accepting.
    fn snapshot(&mut self) -> Snapshot {
        let accepted = self
            .frontier
            .iter()
            .position(|c| is_accepting(c, self.automaton, self.options.mode));
        if accepted.is_some() {
            debug!(step = self.step, "accepting configuration found");
            self.finished = true;
        }
        Snapshot {
            step: self.step,
            configurations: self.frontier.clone(),
            accepted,
        }
    }
}

impl<E: Explorer> Iterator for Run<'_, E> {
    type Item = Result<Snapshot, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(Ok(self.snapshot()));
        }

        self.step += 1;
        if self.step > self.options.max_steps {
            warn!(limit = self.options.max_steps, "step limit exceeded");
            self.finished = true;
            return Some(Err(EngineError::StepLimitExceeded {
                limit: self.options.max_steps,
            }));
        }

        let frontier = mem::take(&mut self.frontier);
        match self
            .explorer
            .advance(self.automaton, &self.options, frontier, &mut self.visits)
        {
            Ok(next) if next.is_empty() => {
                debug!(step = self.step, "frontier exhausted");
                self.finished = true;
                None
            }
            Ok(next) => {
                debug!(step = self.step, frontier = next.len(), "frontier advanced");
                self.frontier = next;
                Some(Ok(self.snapshot()))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
