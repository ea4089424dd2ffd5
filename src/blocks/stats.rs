use std::ops::AddAssign;

/// `count / total * 100`, or exactly `0.0` when `total` is zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Classification counters of one block or of a whole genome.
///
/// A site is counted in at most one of `mie`, `not_informative` and
/// `sce`, so their sum never exceeds `variants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockCounts {
    /// Sites classified.
    pub variants: u64,
    /// Mendelian inheritance errors.
    pub mie: u64,
    /// State-consistency errors.
    pub sce: u64,
    /// Not-informative sites.
    pub not_informative: u64,
}

impl BlockCounts {
    /// Percentage of sites that are MIEs.
    pub fn mie_percent(&self) -> f64 {
        percentage(self.mie, self.variants)
    }

    /// Percentage of sites that are SCEs.
    pub fn sce_percent(&self) -> f64 {
        percentage(self.sce, self.variants)
    }

    /// Percentage of sites that are not informative.
    pub fn not_informative_percent(&self) -> f64 {
        percentage(self.not_informative, self.variants)
    }
}

impl AddAssign for BlockCounts {
    fn add_assign(&mut self, other: Self) {
        self.variants += other.variants;
        self.mie += other.mie;
        self.sce += other.sce;
        self.not_informative += other.not_informative;
    }
}

/// Per-block statistics record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockStatistics {
    /// Chromosome name.
    pub chromosome: String,
    /// Inclusive start.
    pub start: u64,
    /// Exclusive stop.
    pub stop: u64,
    /// Assigned state, or `None` for a partial block.
    pub state: Option<String>,
    /// Classification counters.
    pub counts: BlockCounts,
}

impl BlockStatistics {
    /// Block length in bases.
    pub fn length(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    /// Percentage of sites that are MIEs.
    pub fn mie_percent(&self) -> f64 {
        self.counts.mie_percent()
    }

    /// Percentage of sites that are SCEs.
    pub fn sce_percent(&self) -> f64 {
        self.counts.sce_percent()
    }

    /// Percentage of sites that are not informative.
    pub fn not_informative_percent(&self) -> f64 {
        self.counts.not_informative_percent()
    }
}

/// Genome-wide aggregate over every block of an index.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenomeStatistics {
    /// Number of blocks.
    pub blocks: usize,
    /// Number of partial blocks.
    pub partial_blocks: usize,
    /// Total bases covered by blocks.
    pub covered_bases: u64,
    /// Summed counters.
    pub counts: BlockCounts,
}

impl GenomeStatistics {
    /// Percentage of sites that are MIEs.
    pub fn mie_percent(&self) -> f64 {
        self.counts.mie_percent()
    }

    /// Percentage of sites that are SCEs.
    pub fn sce_percent(&self) -> f64 {
        self.counts.sce_percent()
    }

    /// Percentage of sites that are not informative.
    pub fn not_informative_percent(&self) -> f64 {
        self.counts.not_informative_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counts_yield_zero_percentages() {
        let counts = BlockCounts::default();
        assert_eq!(counts.mie_percent(), 0.0);
        assert_eq!(counts.sce_percent(), 0.0);
        assert_eq!(counts.not_informative_percent(), 0.0);
        assert_eq!(GenomeStatistics::default().mie_percent(), 0.0);
    }

    #[test]
    fn percentages_scale_to_hundred() {
        let counts = BlockCounts {
            variants: 8,
            mie: 2,
            sce: 1,
            not_informative: 4,
        };
        assert_eq!(counts.mie_percent(), 25.0);
        assert_eq!(counts.sce_percent(), 12.5);
        assert_eq!(counts.not_informative_percent(), 50.0);
    }

    #[test]
    fn counts_accumulate() {
        let mut total = BlockCounts::default();
        total += BlockCounts {
            variants: 3,
            mie: 1,
            sce: 0,
            not_informative: 1,
        };
        total += BlockCounts {
            variants: 2,
            mie: 0,
            sce: 2,
            not_informative: 0,
        };
        assert_eq!(total.variants, 5);
        assert_eq!(total.sce, 2);
    }
}
