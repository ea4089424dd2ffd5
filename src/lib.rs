//! # Quartet inheritance-state engine
//!
//! Classifies each variant site of a four-person family (two founders and
//! two children) into the inheritance state that best explains the four
//! genotypes, and aggregates sites into genomic blocks of uniform state.
//!
//! ## Pipeline
//!
//! 1. **Decode**: a VCF/BCF record becomes a [`VariantSite`]
//! 2. **Derive**: the four genotypes reduce to a canonical [`GenotypePattern`]
//! 3. **Classify**: the pattern maps to one or two [`QuartetState`] candidates
//! 4. **Aggregate**: the enclosing [`GenomicBlock`] counts MIEs, SCEs and
//!    not-informative sites
//!
//! ## Usage Example
//!
//! ```
//! use quartet::{classify_str, QuartetState};
//!
//! let states = classify_str("ab/ab;aa/aa").unwrap();
//! assert!(states.contains(QuartetState::Identical));
//! assert_eq!(states.len(), 1);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod blocks;   // Genomic blocks and the frozen block index
pub mod family;   // Alleles, members, genotypes
pub mod pattern;  // Genotype pattern derivation and classification
pub mod pipeline; // Stream scanning and report writers
pub mod state;    // Quartet, trio and cross-trios states
pub mod variant;  // Variant sites and record decoding

// Re-exports for convenience
pub use blocks::{
    BlockIndex, BlockIndexBuilder, BlockIndexError, GenomicBlock, ScoredInterval, SiteOutcome,
};
pub use family::{Allele, FamilyMember, Genotype, PerMember};
pub use pattern::{classify, classify_str, GenotypePattern, PatternClassifier, PatternError};
pub use pipeline::{open_variants, BlockScanner, ScanConfig, ScanSummary};
pub use state::{
    BlockState, CandidateStates, CrossTriosState, InheritanceState, QuartetState, StateError,
    TrioState,
};
pub use variant::{FilterPolicy, RecordDecoder, RecordError, VariantSite};

use thiserror::Error;

/// Errors that abort an operation, as opposed to per-record failures
/// which callers skip.
#[derive(Error, Debug)]
pub enum QuartetError {
    /// Block index could not be built.
    #[error("block index error: {0}")]
    BlockIndex(#[from] BlockIndexError),

    /// Interval file could not be read.
    #[error("interval source error: {0}")]
    Intervals(#[from] blocks::IntervalParseError),

    /// State could not be encoded or decoded.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Variant stream could not be read.
    #[error("scan error: {0}")]
    Scan(#[from] pipeline::ScanError),
}

/// Load a block index from a bedgraph stream. Malformed lines are skipped;
/// invalid scores and overlapping blocks abort the load.
pub fn load_block_index<S, R>(reader: R) -> Result<BlockIndex<S>, QuartetError>
where
    S: BlockState,
    R: std::io::BufRead,
{
    let batch = blocks::read_bedgraph(reader)?;
    Ok(BlockIndex::from_scored_intervals(&batch.intervals)?)
}
