use rust_htslib::bcf::record::GenotypeAllele;
use rust_htslib::bcf::Record;
use thiserror::Error;

use super::VariantSite;
use crate::family::{Allele, FamilyMember, Genotype, PerMember};
use crate::pattern::PatternError;

const PASS: &[u8] = b"PASS";

/// Per-record decoding failures. All of them are recoverable: the caller
/// skips the record and continues with the stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Record could not be parsed, or carries too few samples.
    #[error("invalid record: {0}")]
    InvalidLine(String),

    /// Rejected by the filter policy.
    #[error("filtered record: {0}")]
    FilteredLine(String),

    /// A field could not be interpreted.
    #[error("invalid {field} field '{value}'")]
    InvalidField {
        /// Column name.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// A member's genotype is only partially called.
    #[error("partially called genotype '{value}' for {member}")]
    PartialGenotype {
        /// Member with the partial call.
        member: FamilyMember,
        /// Rendered `GT` value.
        value: String,
    },

    /// Genotypes reduce to a pattern with no classification.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl RecordError {
    /// Whether the stream may continue past this error.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Short category name used in scan summaries.
    pub fn category(&self) -> &'static str {
        match self {
            RecordError::InvalidLine(_) => "invalid-line",
            RecordError::FilteredLine(_) => "filtered-line",
            RecordError::InvalidField { .. } => "invalid-field",
            RecordError::PartialGenotype { .. } => "partial-genotype",
            RecordError::Pattern(_) => "unrecognized-pattern",
        }
    }
}

/// Which `FILTER` values a record must carry to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    /// Keep `PASS` and `.` only.
    #[default]
    PassOnly,
    /// Keep everything.
    AcceptAll,
}

impl FilterPolicy {
    fn accepts(self, filters: &[Vec<u8>]) -> bool {
        match self {
            FilterPolicy::PassOnly => filters.iter().all(|name| name == PASS),
            FilterPolicy::AcceptAll => true,
        }
    }
}

/// Maps VCF/BCF records onto [`VariantSite`]s.
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    sample_columns: PerMember<usize>,
    filter: FilterPolicy,
    require_phased: bool,
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new(PerMember::new(0, 1, 2, 3), FilterPolicy::default(), false)
    }
}

impl RecordDecoder {
    /// Create a decoder. `sample_columns` are 0-based indexes into the
    /// header's sample list.
    pub fn new(sample_columns: PerMember<usize>, filter: FilterPolicy, require_phased: bool) -> Self {
        Self {
            sample_columns,
            filter,
            require_phased,
        }
    }

    /// Number of samples a record must carry for every member to be found.
    pub fn required_samples(&self) -> usize {
        self.sample_columns.values().iter().copied().max().unwrap_or(0) + 1
    }

    /// Decode one record.
    pub fn decode(&self, record: &Record) -> Result<VariantSite, RecordError> {
        let found = record.sample_count() as usize;
        let needed = self.required_samples();
        if found < needed {
            return Err(RecordError::InvalidLine(format!(
                "expected at least {needed} samples, found {found}"
            )));
        }

        let header = record.header();
        let filters: Vec<Vec<u8>> = record.filters().map(|id| header.id_to_name(id)).collect();
        if !self.filter.accepts(&filters) {
            return Err(RecordError::FilteredLine(render_filters(&filters)));
        }

        let chromosome = record
            .rid()
            .and_then(|rid| header.rid2name(rid).ok())
            .and_then(|name| std::str::from_utf8(name).ok())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| invalid_field("CHROM", "."))?;

        let position = u64::try_from(record.pos())
            .map_err(|_| invalid_field("POS", &record.pos().to_string()))?;

        let alleles = record.alleles();
        let [reference, alternative] = alleles.as_slice() else {
            return Err(invalid_field("ALT", &render_alternatives(&alleles)));
        };
        let reference = utf8_allele("REF", reference)?;
        let alternative = utf8_allele("ALT", alternative)?;

        let calls = record
            .genotypes()
            .map_err(|_| invalid_field("FORMAT", "missing GT"))?;

        let genotypes = PerMember::try_from_fn(|member| {
            let genotype = convert_genotype(member, &calls.get(self.sample_columns[member]))?;
            if self.require_phased && !genotype.is_phased() {
                return Err(RecordError::FilteredLine(format!("unphased {member} genotype")));
            }
            Ok(genotype)
        })?;

        let site = VariantSite::new(chromosome, position, reference, alternative, genotypes)?;
        Ok(site)
    }
}

/// Diploid biallelic call for one member. The phase marker sits on the
/// second allele.
fn convert_genotype(member: FamilyMember, alleles: &[GenotypeAllele]) -> Result<Genotype, RecordError> {
    let [first, second] = alleles else {
        return Err(RecordError::InvalidField {
            field: "GT",
            value: render_gt(alleles),
        });
    };
    if first.index().is_none() || second.index().is_none() {
        return Err(RecordError::PartialGenotype {
            member,
            value: render_gt(alleles),
        });
    }

    let allele = |call: &GenotypeAllele| match call.index() {
        Some(0) => Some(Allele::Reference),
        Some(1) => Some(Allele::Alternative),
        _ => None,
    };
    let (Some(a), Some(b)) = (allele(first), allele(second)) else {
        return Err(RecordError::InvalidField {
            field: "GT",
            value: render_gt(alleles),
        });
    };

    Ok(match second {
        GenotypeAllele::Phased(_) => Genotype::phased(a, b),
        _ => Genotype::unphased(a, b),
    })
}

fn render_gt(alleles: &[GenotypeAllele]) -> String {
    if alleles.is_empty() {
        return ".".to_string();
    }
    let mut text = String::new();
    for (idx, call) in alleles.iter().enumerate() {
        if idx > 0 {
            let phased = matches!(call, GenotypeAllele::Phased(_) | GenotypeAllele::PhasedMissing);
            text.push(if phased { '|' } else { '/' });
        }
        match call.index() {
            Some(index) => text.push_str(&index.to_string()),
            None => text.push('.'),
        }
    }
    text
}

fn render_filters(filters: &[Vec<u8>]) -> String {
    filters
        .iter()
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect::<Vec<_>>()
        .join(";")
}

fn render_alternatives(alleles: &[&[u8]]) -> String {
    match alleles.get(1..) {
        Some(alternatives) if !alternatives.is_empty() => alternatives
            .iter()
            .map(|allele| String::from_utf8_lossy(allele).into_owned())
            .collect::<Vec<_>>()
            .join(","),
        _ => ".".to_string(),
    }
}

fn utf8_allele<'a>(field: &'static str, allele: &'a [u8]) -> Result<&'a str, RecordError> {
    std::str::from_utf8(allele).map_err(|_| invalid_field(field, &String::from_utf8_lossy(allele)))
}

fn invalid_field(field: &'static str, value: &str) -> RecordError {
    RecordError::InvalidField {
        field,
        value: value.to_string(),
    }
}
