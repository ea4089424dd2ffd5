use std::fmt;

/// One of the two alleles observed at a biallelic site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Allele {
    /// Reference allele (`0` in a VCF `GT` field).
    Reference,
    /// Alternative allele (`1` in a VCF `GT` field).
    Alternative,
}

impl Allele {
    /// The other allele.
    pub fn opposite(self) -> Self {
        match self {
            Allele::Reference => Allele::Alternative,
            Allele::Alternative => Allele::Reference,
        }
    }

    /// Parse a single VCF allele index. Only `0` and `1` are biallelic.
    pub fn from_index(index: &str) -> Option<Self> {
        match index {
            "0" => Some(Allele::Reference),
            "1" => Some(Allele::Alternative),
            _ => None,
        }
    }

    /// VCF allele index.
    pub fn index(self) -> u8 {
        match self {
            Allele::Reference => 0,
            Allele::Alternative => 1,
        }
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involutive() {
        for allele in [Allele::Reference, Allele::Alternative] {
            assert_ne!(allele.opposite(), allele);
            assert_eq!(allele.opposite().opposite(), allele);
        }
    }

    #[test]
    fn parses_biallelic_indexes_only() {
        assert_eq!(Allele::from_index("0"), Some(Allele::Reference));
        assert_eq!(Allele::from_index("1"), Some(Allele::Alternative));
        assert_eq!(Allele::from_index("2"), None);
        assert_eq!(Allele::from_index("."), None);
    }
}
