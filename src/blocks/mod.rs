//! Genomic blocks of uniform inheritance state.
//!
//! Blocks are loaded once from bedgraph-style scored intervals into a
//! [`BlockIndex`], which is then frozen. Sites are classified against the
//! block that contains them, updating that block's counters.

mod block;
mod index;
mod interval;
mod stats;

pub use block::{GenomicBlock, SiteOutcome};
pub use index::{BlockIndex, BlockIndexBuilder, BlockIndexError};
pub use interval::{
    parse_bedgraph_line, read_bedgraph, BedGraphRecord, IntervalBatch, IntervalParseError,
    ScoredInterval,
};
pub use stats::{percentage, BlockCounts, BlockStatistics, GenomeStatistics};
