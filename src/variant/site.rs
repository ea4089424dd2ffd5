use std::sync::Arc;

use crate::family::{Allele, FamilyMember, Genotype, PerMember};
use crate::pattern::{classify, GenotypePattern, PatternError};
use crate::state::CandidateStates;

/// One biallelic site genotyped in all four family members.
///
/// The pattern and candidate states are derived on construction and
/// re-derived whenever a genotype is replaced, so they always reflect the
/// current genotypes.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSite {
    chromosome: Arc<str>,
    position: u64,
    reference: String,
    alternative: String,
    genotypes: PerMember<Genotype>,
    pattern: GenotypePattern,
    candidates: CandidateStates,
}

impl VariantSite {
    /// Build a site and classify it. Fails if the genotypes reduce to a
    /// pattern with no classification.
    pub fn new(
        chromosome: impl Into<Arc<str>>,
        position: u64,
        reference: impl Into<String>,
        alternative: impl Into<String>,
        genotypes: PerMember<Genotype>,
    ) -> Result<Self, PatternError> {
        let pattern = GenotypePattern::derive(&genotypes);
        let candidates = classify(&pattern)?;
        Ok(Self {
            chromosome: chromosome.into(),
            position,
            reference: reference.into(),
            alternative: alternative.into(),
            genotypes,
            pattern,
            candidates,
        })
    }

    /// Chromosome name.
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Shared handle to the chromosome name.
    pub fn chromosome_arc(&self) -> Arc<str> {
        Arc::clone(&self.chromosome)
    }

    /// 0-based position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Reference allele sequence.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Alternative allele sequence.
    pub fn alternative(&self) -> &str {
        &self.alternative
    }

    /// Genotype of `member`.
    pub fn genotype(&self, member: FamilyMember) -> Genotype {
        self.genotypes[member]
    }

    /// All four genotypes.
    pub fn genotypes(&self) -> &PerMember<Genotype> {
        &self.genotypes
    }

    /// Canonical genotype pattern.
    pub fn pattern(&self) -> GenotypePattern {
        self.pattern
    }

    /// Candidate inheritance states.
    pub fn candidates(&self) -> CandidateStates {
        self.candidates
    }

    /// Whether every member's genotype is phased.
    pub fn is_phased(&self) -> bool {
        self.genotypes.values().iter().all(Genotype::is_phased)
    }

    /// Allele sequences carried by `member`, in genotype order.
    pub fn alleles_for(&self, member: FamilyMember) -> [&str; 2] {
        self.genotypes[member].alleles().map(|allele| match allele {
            Allele::Reference => self.reference.as_str(),
            Allele::Alternative => self.alternative.as_str(),
        })
    }

    /// Replace one member's genotype, e.g. after phasing, and re-derive
    /// the pattern. The site is left untouched if the new genotypes do not
    /// classify.
    pub fn set_genotype(
        &mut self,
        member: FamilyMember,
        genotype: Genotype,
    ) -> Result<(), PatternError> {
        let mut genotypes = self.genotypes;
        genotypes[member] = genotype;

        let pattern = GenotypePattern::derive(&genotypes);
        let candidates = classify(&pattern)?;

        self.genotypes = genotypes;
        self.pattern = pattern;
        self.candidates = candidates;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::QuartetState;

    fn site(genotypes: [&str; 4]) -> VariantSite {
        let [f, m, c1, c2] = genotypes.map(|gt| Genotype::parse(gt).unwrap());
        VariantSite::new("chr1", 99, "A", "G", PerMember::new(f, m, c1, c2)).unwrap()
    }

    #[test]
    fn derives_pattern_on_construction() {
        let site = site(["0/1", "0/1", "0/0", "0/0"]);
        assert_eq!(site.pattern().to_string(), "ab/ab;aa/aa");
        assert_eq!(
            site.candidates(),
            CandidateStates::one(QuartetState::Identical)
        );
        assert_eq!(site.alleles_for(FamilyMember::Father), ["A", "G"]);
    }

    #[test]
    fn phasing_update_rederives_pattern() {
        let mut site = site(["0/1", "0/1", "0/0", "0/0"]);
        site.set_genotype(
            FamilyMember::Child2,
            Genotype::phased(Allele::Alternative, Allele::Alternative),
        )
        .unwrap();

        assert_eq!(site.pattern().to_string(), "ab/ab;aa/bb");
        assert_eq!(
            site.candidates(),
            CandidateStates::one(QuartetState::NonIdentical)
        );
        assert!(site.genotype(FamilyMember::Child2).is_phased());
        assert!(!site.is_phased());
    }
}
