//! Alternating detection and reduction until neither finds anything new.

use crate::classify::{classify, ClassMap};
use crate::detect::detect;
use crate::error::{Error, Result};
use crate::forest::DisjointForest;
use crate::reduce::{reduce_classes, reduce_vector};
use crate::registry::PairsRegistry;
use crate::word::Word;
use std::mem::take;
use tracing::{info, info_span};

/// Where a [`FixedPointDriver`] is in its run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Classes are being built from the word list.
    Initializing,
    /// About to scan for new commuting pairs.
    Detecting,
    /// About to shrink classes using the pairs found.
    Reducing,
    /// A full round found nothing new; the run is over.
    Converged,
    /// A round failed part way through. The driver's state can't be trusted any more.
    Aborted,
}

/// What happened during one round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct RoundSummary {
    /// Rounds are numbered from 1.
    pub round: usize,
    /// Live classes when the round began.
    pub classes: usize,
    /// Registered pairs after the round's detection pass.
    pub pairs: usize,
    /// Whether detection registered any new pair.
    pub detect_changed: bool,
    /// Whether any class was reduced.
    pub reduce_changed: bool,
}

impl RoundSummary {
    /// Returns `true` if this round changed nothing, so the run has converged.
    pub fn is_fixed_point(&self) -> bool {
        !self.detect_changed && !self.reduce_changed
    }
}

/// Owns the class map and the pair registry for the length of a run, and moves them through
/// rounds of detection followed by reduction.
#[derive(Debug)]
pub struct FixedPointDriver {
    classes: ClassMap,
    registry: PairsRegistry,
    round: usize,
    phase: Phase,
}

impl FixedPointDriver {
    /// Classifies `words` into their initial anagram classes.
    pub fn new<I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = Word>,
    {
        let _span = info_span!("initializing").entered();
        let classes = classify(words)?;
        info!(classes = classes.len(), "classified dictionary");
        Ok(FixedPointDriver::from_classes(classes))
    }

    /// Starts a run from classes that were built some other way.
    pub fn from_classes(classes: ClassMap) -> Self {
        FixedPointDriver {
            classes,
            registry: PairsRegistry::new(),
            round: 0,
            phase: Phase::Detecting,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live classes.
    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    /// The pairs registered so far.
    pub fn registry(&self) -> &PairsRegistry {
        &self.registry
    }

    /// Runs one round: detection over the current classes, then reduction of those same classes
    /// using everything detection has registered. The round has reached a fixed point only if
    /// neither half changed anything.
    ///
    /// Stepping a converged driver runs a round that is certain to change nothing. Stepping an
    /// aborted driver is an error.
    pub fn step(&mut self) -> Result<RoundSummary> {
        if self.phase == Phase::Aborted {
            return Err(Error::InvariantViolation(
                "stepped a driver whose previous round failed".to_owned(),
            ));
        }
        self.round += 1;
        let _span = info_span!("round", round = self.round).entered();
        let classes_at_start = self.classes.len();

        self.phase = Phase::Detecting;
        let (registry, detect_changed) = match detect(&self.classes, self.registry.clone()) {
            Ok(result) => result,
            Err(e) => return Err(self.abort(e)),
        };

        self.phase = Phase::Reducing;
        let (classes, reduce_changed) = match reduce_classes(take(&mut self.classes), &registry) {
            Ok(result) => result,
            Err(e) => return Err(self.abort(e)),
        };

        if !registry.covers(&self.registry) {
            return Err(self.abort(Error::InvariantViolation(
                "pair registry shrank during a round".to_owned(),
            )));
        }
        self.registry = registry;
        self.classes = classes;

        let summary = RoundSummary {
            round: self.round,
            classes: classes_at_start,
            pairs: self.registry.len(),
            detect_changed,
            reduce_changed,
        };
        self.phase = if summary.is_fixed_point() {
            Phase::Converged
        } else {
            Phase::Detecting
        };
        info!(
            classes = summary.classes,
            pairs = summary.pairs,
            detect_changed,
            reduce_changed,
            "round finished"
        );
        Ok(summary)
    }

    fn abort(&mut self, error: Error) -> Error {
        self.phase = Phase::Aborted;
        error
    }

    /// Runs rounds until a fixed point.
    pub fn run(self) -> Result<Convergence> {
        self.run_with(|_, _| Ok(()))
    }

    /// Runs rounds until a fixed point, calling `observer` after every round with that round's
    /// summary and the registry as it stands. An error from the observer stops the run.
    pub fn run_with<F>(mut self, mut observer: F) -> Result<Convergence>
    where
        F: FnMut(&RoundSummary, &PairsRegistry) -> Result<()>,
    {
        loop {
            let summary = self.step()?;
            observer(&summary, &self.registry)?;
            if self.phase == Phase::Converged {
                info!(
                    rounds = self.round,
                    pairs = self.registry.len(),
                    irreducible = self.classes.len(),
                    "converged"
                );
                return Ok(Convergence {
                    registry: self.registry,
                    classes: self.classes,
                    rounds: self.round,
                });
            }
        }
    }
}

/// The result of a completed run.
#[derive(Debug)]
pub struct Convergence {
    /// Every commuting pair found, with its witnesses.
    pub registry: PairsRegistry,
    /// The classes that could not be reduced any further.
    pub classes: ClassMap,
    /// How many rounds it took, including the final round that changed nothing.
    pub rounds: usize,
}

impl Convergence {
    /// Finds the irreducible class that `word` ended up in, if any: reduces the word's count
    /// vector by the registered pairs until it stops shrinking, and looks that up. The class holds
    /// reduced words, so it usually won't contain `word` itself.
    pub fn class_of(&self, word: &Word) -> Option<&DisjointForest<Word>> {
        let mut counts = word.count_vector();
        loop {
            let reduced = reduce_vector(&counts, &self.registry);
            if reduced == counts {
                return self.classes.get(&counts);
            }
            counts = reduced;
        }
    }
}
