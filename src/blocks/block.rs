use std::sync::Arc;

use super::{BedGraphRecord, BlockCounts, BlockStatistics};
use crate::state::{BlockState, CandidateStates, StateError};
use crate::variant::VariantSite;

/// Result of classifying one site against its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteOutcome {
    /// At least one candidate agrees with the block state.
    Consistent,
    /// The block is partial, so consistency was not assessed.
    Unassessed,
    /// Mendelian inheritance error.
    Mie,
    /// Site carries no inheritance information.
    NotInformative,
    /// No candidate agrees with the block state.
    StateConsistencyError,
}

/// Half-open chromosome interval `[start, stop)` with an assigned state.
///
/// A block without a state is partial. Only the counters change after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomicBlock<S> {
    chromosome: Arc<str>,
    start: u64,
    stop: u64,
    state: Option<S>,
    counts: BlockCounts,
}

impl<S: BlockState> GenomicBlock<S> {
    /// Create a block. A partial state is stored as `None`.
    pub fn new(chromosome: impl Into<Arc<str>>, start: u64, stop: u64, state: Option<S>) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            stop,
            state: state.filter(|s| !s.is_partial()),
            counts: BlockCounts::default(),
        }
    }

    /// Chromosome name.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub(crate) fn chromosome_arc(&self) -> &Arc<str> {
        &self.chromosome
    }

    /// Inclusive start.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive stop.
    pub fn stop(&self) -> u64 {
        self.stop
    }

    /// Length in bases.
    pub fn len(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    /// Whether the interval covers no bases.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assigned state; `None` for a partial block.
    pub fn state(&self) -> Option<S> {
        self.state
    }

    /// Whether no state is assigned.
    pub fn is_partial(&self) -> bool {
        self.state.is_none()
    }

    /// Whether `position` lies inside the block.
    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position < self.stop
    }

    /// Current counters.
    pub fn counts(&self) -> BlockCounts {
        self.counts
    }

    /// Classify a site located in this block.
    pub fn classify(&mut self, site: &VariantSite) -> SiteOutcome {
        self.classify_candidates(&site.candidates())
    }

    /// Classify a site given only its candidate states.
    ///
    /// Exactly one counter moves per site, with priority MIE, then
    /// not-informative, then SCE.
    pub fn classify_candidates(&mut self, candidates: &CandidateStates) -> SiteOutcome {
        self.counts.variants += 1;

        if candidates.is_mie() {
            self.counts.mie += 1;
            return SiteOutcome::Mie;
        }
        if candidates.is_not_informative() {
            self.counts.not_informative += 1;
            return SiteOutcome::NotInformative;
        }

        let Some(state) = self.state else {
            return SiteOutcome::Unassessed;
        };
        if candidates.any(|candidate| state.accepts(candidate)) {
            SiteOutcome::Consistent
        } else {
            self.counts.sce += 1;
            SiteOutcome::StateConsistencyError
        }
    }

    /// Statistics snapshot.
    pub fn statistics(&self) -> BlockStatistics {
        BlockStatistics {
            chromosome: self.chromosome.to_string(),
            start: self.start,
            stop: self.stop,
            state: self.state.map(|s| s.to_string()),
            counts: self.counts,
        }
    }

    /// `(chromosome, start, stop, score)` for bedgraph output. Partial
    /// blocks carry the partial score.
    pub fn bedgraph(&self) -> Result<BedGraphRecord, StateError> {
        let score = match &self.state {
            Some(state) => state.encode()?,
            None => S::PARTIAL_SCORE,
        };
        Ok(BedGraphRecord {
            chromosome: self.chromosome.to_string(),
            start: self.start,
            stop: self.stop,
            score,
        })
    }
}
