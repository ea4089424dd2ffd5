//! Single-pass scan of a variant stream against a block index.
//!
//! The scanner decodes each VCF/BCF record, classifies the site against its
//! block and tallies outcomes. Per-record failures are counted and skipped;
//! only an unopenable or corrupt stream ends the scan.

mod config;
mod report;
mod scanner;

pub use config::ScanConfig;
pub use report::{
    render_bedgraph, write_bedgraph, write_block_statistics, write_genome_statistics,
};
pub use scanner::{open_variants, BlockScanner, ScanError, ScanSummary};
