use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_htslib::bcf::{self, Read};
use thiserror::Error;

use crate::blocks::{BlockIndex, SiteOutcome};
use crate::state::BlockState;
use crate::variant::{RecordDecoder, RecordError, VariantSite};

use super::ScanConfig;

/// Consecutive unreadable records after which the stream is treated as
/// corrupt rather than merely dirty.
const MAX_CONSECUTIVE_READ_FAILURES: usize = 1000;

/// Failures that stop a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The variant file could not be opened.
    #[error("failed to open variant file {}: {source}", path.display())]
    Open {
        /// Path given by the caller.
        path: PathBuf,
        /// Underlying htslib error.
        source: rust_htslib::errors::Error,
    },

    /// The header lists fewer samples than the member columns need.
    #[error("variant header has {found} samples, at least {needed} are required")]
    MissingSamples {
        /// Samples needed by the configured columns.
        needed: usize,
        /// Samples in the header.
        found: usize,
    },

    /// Too many records in a row could not be read.
    #[error("variant stream is unreadable after {failures} consecutive failed records")]
    Unreadable {
        /// Consecutive read failures.
        failures: usize,
    },
}

/// Open a VCF, bgzipped VCF or BCF file. `-` reads from stdin.
pub fn open_variants(path: &Path) -> Result<bcf::Reader, ScanError> {
    let reader = if path == Path::new("-") {
        bcf::Reader::from_stdin()
    } else {
        bcf::Reader::from_path(path)
    };
    reader.map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Outcome tallies of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records read, skipped ones included.
    pub records: usize,
    /// Sites decoded successfully.
    pub sites: u64,
    /// Sites that fell outside every block.
    pub outside_blocks: u64,
    /// Sites consistent with their block.
    pub consistent: u64,
    /// Sites in partial blocks.
    pub unassessed: u64,
    /// Mendelian inheritance errors.
    pub mie: u64,
    /// Not-informative sites.
    pub not_informative: u64,
    /// State-consistency errors.
    pub sce: u64,
    /// Skipped records per error category.
    pub skipped: BTreeMap<&'static str, u64>,
}

impl ScanSummary {
    /// Total skipped records.
    pub fn total_skipped(&self) -> u64 {
        self.skipped.values().sum()
    }

    fn record(&mut self, outcome: Option<SiteOutcome>) {
        self.sites += 1;
        let counter = match outcome {
            None => &mut self.outside_blocks,
            Some(SiteOutcome::Consistent) => &mut self.consistent,
            Some(SiteOutcome::Unassessed) => &mut self.unassessed,
            Some(SiteOutcome::Mie) => &mut self.mie,
            Some(SiteOutcome::NotInformative) => &mut self.not_informative,
            Some(SiteOutcome::StateConsistencyError) => &mut self.sce,
        };
        *counter += 1;
    }

    fn skip(&mut self, record: usize, err: &RecordError) {
        tracing::debug!(record, category = err.category(), "skipping record: {err}");
        *self.skipped.entry(err.category()).or_default() += 1;
    }
}

/// Streams quartet variant records through a [`BlockIndex`].
#[derive(Debug)]
pub struct BlockScanner<'a, S> {
    index: &'a mut BlockIndex<S>,
    decoder: RecordDecoder,
}

impl<'a, S: BlockState> BlockScanner<'a, S> {
    /// Scanner over `index` using `config` to decode records.
    pub fn new(index: &'a mut BlockIndex<S>, config: &ScanConfig) -> Self {
        Self {
            index,
            decoder: config.decoder(),
        }
    }

    /// Scan every record of `reader`.
    pub fn scan<R: Read>(&mut self, reader: &mut R) -> Result<ScanSummary, ScanError> {
        self.scan_with(reader, |_, _| {})
    }

    /// Scan every record of `reader`, calling `observer` for each decoded
    /// site with its outcome (`None` when outside every block).
    pub fn scan_with<R, F>(&mut self, reader: &mut R, mut observer: F) -> Result<ScanSummary, ScanError>
    where
        R: Read,
        F: FnMut(&VariantSite, Option<SiteOutcome>),
    {
        let needed = self.decoder.required_samples();
        let found = reader.header().sample_count() as usize;
        if found < needed {
            return Err(ScanError::MissingSamples { needed, found });
        }

        let mut summary = ScanSummary::default();
        let mut failures = 0;

        for (idx, record) in reader.records().enumerate() {
            let record_no = idx + 1;
            summary.records += 1;

            let record = match record {
                Ok(record) => {
                    failures = 0;
                    record
                }
                Err(err) => {
                    failures += 1;
                    if failures >= MAX_CONSECUTIVE_READ_FAILURES {
                        return Err(ScanError::Unreadable { failures });
                    }
                    summary.skip(record_no, &RecordError::InvalidLine(err.to_string()));
                    continue;
                }
            };

            let site = match self.decoder.decode(&record) {
                Ok(site) => site,
                Err(err) => {
                    summary.skip(record_no, &err);
                    continue;
                }
            };

            let outcome = self.index.classify(&site);
            summary.record(outcome);
            observer(&site, outcome);
        }

        let skipped = summary.total_skipped();
        if skipped > 0 {
            tracing::warn!(skipped, "records were skipped during the scan");
        }
        tracing::info!(
            records = summary.records,
            sites = summary.sites,
            mie = summary.mie,
            sce = summary.sce,
            not_informative = summary.not_informative,
            "scan complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ScoredInterval;
    use crate::family::PerMember;
    use crate::state::QuartetState;
    use crate::variant::test_util::write_vcf;

    const RECORDS: [&str; 6] = [
        "chr1\t10\t.\tA\tG\t50\tPASS\t.\tGT\t0/1\t0/1\t0/0\t0/0",
        "chr1\t20\t.\tC\tT\t50\tPASS\t.\tGT\t0/1\t0/1\t0/0\t1/1",
        "chr1\t30\t.\tG\tA\t50\tLowQual\t.\tGT\t0/1\t0/1\t0/0\t0/0",
        "chr1\t40\t.\tT\tC\t50\tPASS\t.\tGT\t0/0\t0/0\t0/0\t0/1",
        "chr1\t50\t.\tT\tC\t50\tPASS\t.\tGT\t0/0\t0/0\t./.\t0/1",
        "chr2\t5\t.\tA\tT\t50\tPASS\t.\tGT\t0/0\t0/0\t0/0\t0/0",
    ];

    #[test]
    fn scan_tallies_outcomes_and_skips_bad_records() {
        let intervals = vec![ScoredInterval::new("chr1", 0, 1000, 4)];
        let mut index = BlockIndex::<QuartetState>::from_scored_intervals(&intervals).unwrap();
        let file = write_vcf(&RECORDS);
        let mut reader = open_variants(file.path()).unwrap();

        let mut observed = Vec::new();
        let summary = BlockScanner::new(&mut index, &ScanConfig::default())
            .scan_with(&mut reader, |site, outcome| {
                observed.push((site.position(), outcome))
            })
            .unwrap();

        assert_eq!(summary.records, 6);
        assert_eq!(summary.sites, 4);
        assert_eq!(summary.consistent, 1);
        assert_eq!(summary.sce, 1);
        assert_eq!(summary.mie, 1);
        assert_eq!(summary.outside_blocks, 1);
        assert_eq!(summary.skipped.get("filtered-line"), Some(&1));
        assert_eq!(summary.skipped.get("partial-genotype"), Some(&1));
        assert_eq!(observed.last(), Some(&(4, None)));

        let counts = index.lookup("chr1", 0).unwrap().counts();
        assert_eq!(counts.variants, 3);
        assert_eq!(counts.mie + counts.sce + counts.not_informative, 2);
    }

    #[test]
    fn header_without_enough_samples_stops_the_scan() {
        let intervals = vec![ScoredInterval::new("chr1", 0, 1000, 4)];
        let mut index = BlockIndex::<QuartetState>::from_scored_intervals(&intervals).unwrap();
        let file = write_vcf(&RECORDS);
        let mut reader = open_variants(file.path()).unwrap();

        let config = ScanConfig::default().with_sample_columns(PerMember::new(0, 1, 2, 5));
        let err = BlockScanner::new(&mut index, &config)
            .scan(&mut reader)
            .unwrap_err();
        assert!(matches!(err, ScanError::MissingSamples { needed: 6, found: 4 }));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = open_variants(Path::new("/nonexistent/quartet.vcf.gz")).unwrap_err();
        assert!(matches!(err, ScanError::Open { .. }));
    }
}
