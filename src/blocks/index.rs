use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::{
    BedGraphRecord, BlockCounts, GenomeStatistics, GenomicBlock, ScoredInterval, SiteOutcome,
};
use crate::state::{BlockState, StateError};
use crate::variant::VariantSite;

/// Structural failures while building a [`BlockIndex`]. These abort the
/// whole load.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockIndexError {
    /// `stop <= start`.
    #[error("empty or inverted block {chromosome}:{start}-{stop}")]
    EmptyBlock {
        /// Chromosome name.
        chromosome: String,
        /// Block start.
        start: u64,
        /// Block stop.
        stop: u64,
    },

    /// Two blocks on one chromosome share at least one base.
    #[error(
        "overlapping blocks on {chromosome}: [{first_start}, {first_stop}) and [{second_start}, {second_stop})"
    )]
    Overlap {
        /// Chromosome name.
        chromosome: String,
        /// Start of the earlier block.
        first_start: u64,
        /// Stop of the earlier block.
        first_stop: u64,
        /// Start of the later block.
        second_start: u64,
        /// Stop of the later block.
        second_stop: u64,
    },

    /// Blocks declared as sorted were not ascending by start.
    #[error("blocks on {chromosome} are not sorted: {previous_start} precedes {start}")]
    Unsorted {
        /// Chromosome name.
        chromosome: String,
        /// Start of the preceding block.
        previous_start: u64,
        /// Start of the out-of-order block.
        start: u64,
    },

    /// A raw score does not name a state.
    #[error("invalid block score: {0}")]
    State(#[from] StateError),
}

/// Collects blocks in any order; [`BlockIndexBuilder::build`] sorts,
/// validates and freezes them.
#[derive(Debug)]
pub struct BlockIndexBuilder<S> {
    chromosomes: Vec<Arc<str>>,
    slots: HashMap<Arc<str>, usize>,
    blocks: Vec<Vec<GenomicBlock<S>>>,
}

impl<S: BlockState> Default for BlockIndexBuilder<S> {
    fn default() -> Self {
        Self {
            chromosomes: Vec::new(),
            slots: HashMap::new(),
            blocks: Vec::new(),
        }
    }
}

impl<S: BlockState> BlockIndexBuilder<S> {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block. Chromosomes keep the order of their first block.
    pub fn push(&mut self, block: GenomicBlock<S>) -> &mut Self {
        let slot = match self.slots.get(block.chromosome()) {
            Some(&slot) => slot,
            None => {
                let name = Arc::clone(block.chromosome_arc());
                let slot = self.blocks.len();
                self.slots.insert(Arc::clone(&name), slot);
                self.chromosomes.push(name);
                self.blocks.push(Vec::new());
                slot
            }
        };
        self.blocks[slot].push(block);
        self
    }

    /// Add a block built from a raw scored interval.
    pub fn push_scored(&mut self, interval: &ScoredInterval) -> Result<&mut Self, BlockIndexError> {
        let state = S::decode(interval.score)?;
        let block = GenomicBlock::new(
            interval.chromosome.as_str(),
            interval.start,
            interval.stop,
            Some(state),
        );
        Ok(self.push(block))
    }

    /// Sort each chromosome's blocks by start, reject empty or overlapping
    /// blocks and freeze the index.
    pub fn build(mut self) -> Result<BlockIndex<S>, BlockIndexError> {
        for blocks in &mut self.blocks {
            blocks.sort_by_key(|block| block.start());
        }
        BlockIndex::from_parts(self.chromosomes, self.slots, self.blocks)
    }
}

/// Frozen, chromosome-indexed collection of non-overlapping blocks.
///
/// Intervals and states never change once built; lookups are binary
/// searches over each chromosome's ascending block list. Counters are
/// updated through [`BlockIndex::classify`] or [`BlockIndex::lookup_mut`].
#[derive(Debug, Clone)]
pub struct BlockIndex<S> {
    chromosomes: Vec<Arc<str>>,
    slots: HashMap<Arc<str>, usize>,
    blocks: Vec<Vec<GenomicBlock<S>>>,
}

impl<S: BlockState> BlockIndex<S> {
    /// Build from raw scored intervals, mapping each score to a state.
    pub fn from_scored_intervals<'a, I>(intervals: I) -> Result<Self, BlockIndexError>
    where
        I: IntoIterator<Item = &'a ScoredInterval>,
    {
        let mut builder = BlockIndexBuilder::new();
        for interval in intervals {
            builder.push_scored(interval)?;
        }
        builder.build()
    }

    /// Build from blocks already ascending by start within each chromosome.
    /// Out-of-order input is rejected instead of sorted.
    pub fn from_sorted_blocks<I>(blocks: I) -> Result<Self, BlockIndexError>
    where
        I: IntoIterator<Item = GenomicBlock<S>>,
    {
        let mut builder = BlockIndexBuilder::new();
        for block in blocks {
            builder.push(block);
        }
        for (chromosome, blocks) in builder.chromosomes.iter().zip(&builder.blocks) {
            for pair in blocks.windows(2) {
                if pair[1].start() < pair[0].start() {
                    return Err(BlockIndexError::Unsorted {
                        chromosome: chromosome.to_string(),
                        previous_start: pair[0].start(),
                        start: pair[1].start(),
                    });
                }
            }
        }
        Self::from_parts(builder.chromosomes, builder.slots, builder.blocks)
    }

    fn from_parts(
        chromosomes: Vec<Arc<str>>,
        slots: HashMap<Arc<str>, usize>,
        blocks: Vec<Vec<GenomicBlock<S>>>,
    ) -> Result<Self, BlockIndexError> {
        for (chromosome, blocks) in chromosomes.iter().zip(&blocks) {
            if let Some(block) = blocks.iter().find(|block| block.is_empty()) {
                return Err(BlockIndexError::EmptyBlock {
                    chromosome: chromosome.to_string(),
                    start: block.start(),
                    stop: block.stop(),
                });
            }
            for pair in blocks.windows(2) {
                if pair[1].start() < pair[0].stop() {
                    return Err(BlockIndexError::Overlap {
                        chromosome: chromosome.to_string(),
                        first_start: pair[0].start(),
                        first_stop: pair[0].stop(),
                        second_start: pair[1].start(),
                        second_stop: pair[1].stop(),
                    });
                }
            }
        }

        let index = Self {
            chromosomes,
            slots,
            blocks,
        };
        tracing::info!(
            chromosomes = index.chromosomes.len(),
            blocks = index.len(),
            "block index frozen"
        );
        Ok(index)
    }

    /// Block containing `position` on `chromosome`, if any.
    pub fn lookup(&self, chromosome: &str, position: u64) -> Option<&GenomicBlock<S>> {
        let blocks = self.blocks(chromosome);
        let idx = Self::covering(blocks, position)?;
        Some(&blocks[idx])
    }

    /// Mutable access to the block containing `position`, for updating its
    /// counters.
    pub fn lookup_mut(&mut self, chromosome: &str, position: u64) -> Option<&mut GenomicBlock<S>> {
        let slot = *self.slots.get(chromosome)?;
        let blocks = &mut self.blocks[slot];
        let idx = Self::covering(blocks.as_slice(), position)?;
        Some(&mut blocks[idx])
    }

    fn covering(blocks: &[GenomicBlock<S>], position: u64) -> Option<usize> {
        let after = blocks.partition_point(|block| block.start() <= position);
        let idx = after.checked_sub(1)?;
        blocks[idx].contains(position).then_some(idx)
    }

    /// Classify `site` against the block containing it. Returns `None`
    /// when the site falls outside every block.
    pub fn classify(&mut self, site: &VariantSite) -> Option<SiteOutcome> {
        self.lookup_mut(site.chromosome(), site.position())
            .map(|block| block.classify(site))
    }

    /// Blocks of one chromosome in ascending order; empty if unknown.
    pub fn blocks(&self, chromosome: &str) -> &[GenomicBlock<S>] {
        match self.slots.get(chromosome) {
            Some(&slot) => &self.blocks[slot],
            None => &[],
        }
    }

    /// Chromosome names in load order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chromosomes.iter().map(|name| name.as_ref())
    }

    /// Every block, chromosome by chromosome.
    pub fn iter(&self) -> impl Iterator<Item = &GenomicBlock<S>> {
        self.blocks.iter().flatten()
    }

    /// Total number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.iter().map(Vec::len).sum()
    }

    /// Whether the index holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aggregate counters over every block.
    pub fn genome_statistics(&self) -> GenomeStatistics {
        let mut stats = GenomeStatistics::default();
        let mut counts = BlockCounts::default();
        for block in self.iter() {
            stats.blocks += 1;
            stats.partial_blocks += usize::from(block.is_partial());
            stats.covered_bases += block.len();
            counts += block.counts();
        }
        stats.counts = counts;
        stats
    }

    /// Bedgraph records for every block in index order.
    pub fn bedgraph(&self) -> Result<Vec<BedGraphRecord>, StateError> {
        self.iter().map(GenomicBlock::bedgraph).collect()
    }
}
