use crate::family::PerMember;
use crate::variant::{FilterPolicy, RecordDecoder};

/// Parameters for decoding a quartet VCF stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Sample column (0-based, after `FORMAT`) holding each member.
    pub sample_columns: PerMember<usize>,

    /// Which `FILTER` values are kept.
    pub filter: FilterPolicy,

    /// Skip sites where any member is unphased.
    pub require_phased: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sample_columns: PerMember::new(0, 1, 2, 3),
            filter: FilterPolicy::PassOnly,
            require_phased: false,
        }
    }
}

impl ScanConfig {
    /// Override the member → sample column mapping.
    pub fn with_sample_columns(mut self, sample_columns: PerMember<usize>) -> Self {
        self.sample_columns = sample_columns;
        self
    }

    /// Override the filter policy.
    pub fn with_filter(mut self, filter: FilterPolicy) -> Self {
        self.filter = filter;
        self
    }

    /// Keep only fully phased sites.
    pub fn with_require_phased(mut self, require_phased: bool) -> Self {
        self.require_phased = require_phased;
        self
    }

    /// Decoder configured from these parameters.
    pub fn decoder(&self) -> RecordDecoder {
        RecordDecoder::new(self.sample_columns, self.filter, self.require_phased)
    }
}
