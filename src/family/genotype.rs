use std::fmt;

use thiserror::Error;

use super::Allele;

/// Errors raised while parsing a genotype call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenotypeError {
    /// At least one allele was not called (`.`).
    #[error("partially called genotype '{0}'")]
    PartialCall(String),

    /// Not a diploid biallelic `GT` value.
    #[error("invalid genotype '{0}'")]
    Invalid(String),
}

/// Two alleles of one individual at one site.
///
/// Unphased genotypes are unordered: `0/1` and `1/0` compare equal. Once
/// phased, the first allele is the paternally inherited one.
#[derive(Debug, Clone, Copy, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Genotype {
    alleles: [Allele; 2],
    phased: bool,
}

impl Genotype {
    /// Unphased genotype.
    pub fn unphased(first: Allele, second: Allele) -> Self {
        Self {
            alleles: [first, second],
            phased: false,
        }
    }

    /// Phased genotype with an ordered allele pair.
    pub fn phased(first: Allele, second: Allele) -> Self {
        Self {
            alleles: [first, second],
            phased: true,
        }
    }

    /// Homozygous reference (`0/0`).
    pub fn hom_ref() -> Self {
        Self::unphased(Allele::Reference, Allele::Reference)
    }

    /// Heterozygous (`0/1`).
    pub fn het() -> Self {
        Self::unphased(Allele::Reference, Allele::Alternative)
    }

    /// Homozygous alternative (`1/1`).
    pub fn hom_alt() -> Self {
        Self::unphased(Allele::Alternative, Allele::Alternative)
    }

    /// Parse a VCF `GT` value such as `0/1` or `1|0`.
    pub fn parse(text: &str) -> Result<Self, GenotypeError> {
        if text == "." {
            return Err(GenotypeError::PartialCall(text.to_string()));
        }

        let (separator, phased) = if text.contains('|') {
            ('|', true)
        } else {
            ('/', false)
        };

        let mut parts = text.split(separator);
        let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(GenotypeError::Invalid(text.to_string()));
        };

        if first == "." || second == "." {
            return Err(GenotypeError::PartialCall(text.to_string()));
        }

        let parse = |index: &str| {
            Allele::from_index(index).ok_or_else(|| GenotypeError::Invalid(text.to_string()))
        };
        let alleles = [parse(first)?, parse(second)?];

        Ok(Self { alleles, phased })
    }

    /// Both alleles, in stored order.
    pub fn alleles(&self) -> [Allele; 2] {
        self.alleles
    }

    /// Whether the allele order carries parental origin.
    pub fn is_phased(&self) -> bool {
        self.phased
    }

    /// Number of copies of `allele`.
    pub fn count(&self, allele: Allele) -> usize {
        self.alleles.iter().filter(|&&a| a == allele).count()
    }

    /// Whether both alleles differ.
    pub fn is_heterozygous(&self) -> bool {
        self.alleles[0] != self.alleles[1]
    }

    fn sorted(&self) -> [Allele; 2] {
        let [a, b] = self.alleles;
        if a <= b {
            [a, b]
        } else {
            [b, a]
        }
    }
}

impl PartialEq for Genotype {
    fn eq(&self, other: &Self) -> bool {
        if self.phased && other.phased {
            self.alleles == other.alleles
        } else {
            self.phased == other.phased && self.sorted() == other.sorted()
        }
    }
}

impl std::hash::Hash for Genotype {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.phased.hash(state);
        if self.phased {
            self.alleles.hash(state);
        } else {
            self.sorted().hash(state);
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.phased { '|' } else { '/' };
        write!(f, "{}{}{}", self.alleles[0], separator, self.alleles[1])
    }
}
