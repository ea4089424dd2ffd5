use std::fmt;
use std::str::FromStr;

use super::PatternError;
use crate::family::{Allele, FamilyMember, Genotype, PerMember};

/// Zygosity of one member relative to the most frequent allele `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberPattern {
    /// Two copies of `a`.
    Aa,
    /// One copy of `a`.
    Ab,
    /// No copy of `a`.
    Bb,
}

impl MemberPattern {
    /// Pattern of `genotype` with respect to `major`.
    pub fn of(genotype: &Genotype, major: Allele) -> Self {
        match genotype.count(major) {
            2 => MemberPattern::Aa,
            1 => MemberPattern::Ab,
            _ => MemberPattern::Bb,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            MemberPattern::Aa => "aa",
            MemberPattern::Ab => "ab",
            MemberPattern::Bb => "bb",
        }
    }
}

impl FromStr for MemberPattern {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aa" => Ok(MemberPattern::Aa),
            "ab" => Ok(MemberPattern::Ab),
            "bb" => Ok(MemberPattern::Bb),
            _ => Err(()),
        }
    }
}

/// How the two halves of a pair pattern are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairLink {
    /// `/`: order irrelevant.
    Unordered,
    /// `+`: `father+mother`, order significant.
    Ordered,
}

impl PairLink {
    fn symbol(self) -> char {
        match self {
            PairLink::Unordered => '/',
            PairLink::Ordered => '+',
        }
    }
}

/// Two member patterns joined by a [`PairLink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairPattern {
    /// Left half.
    pub first: MemberPattern,
    /// Right half.
    pub second: MemberPattern,
    /// Joining symbol.
    pub link: PairLink,
}

impl PairPattern {
    fn unordered(first: MemberPattern, second: MemberPattern) -> Self {
        Self {
            first,
            second,
            link: PairLink::Unordered,
        }
    }

    fn ordered(first: MemberPattern, second: MemberPattern) -> Self {
        Self {
            first,
            second,
            link: PairLink::Ordered,
        }
    }

    /// Children combination: a child with `aa` goes first, a child with
    /// `bb` goes last.
    fn children(child1: MemberPattern, child2: MemberPattern) -> Self {
        use MemberPattern::*;
        match (child1, child2) {
            (Aa, _) => Self::unordered(child1, child2),
            (Bb, _) => Self::unordered(child2, child1),
            (_, Aa) => Self::unordered(child2, child1),
            (_, Bb) => Self::unordered(child1, child2),
            _ => Self::unordered(Ab, Ab),
        }
    }

    /// Founder combination. Distinct `aa`/`ab` founders keep their order
    /// unless a child carries a `b` allele, in which case the pair is
    /// forced to `aa/ab`.
    fn founders(father: MemberPattern, mother: MemberPattern, children: &PairPattern) -> Self {
        use MemberPattern::*;
        if father == mother {
            Self::unordered(father, mother)
        } else if father == Bb {
            Self::unordered(mother, father)
        } else if mother == Bb {
            Self::unordered(father, mother)
        } else if children.second == Bb {
            Self::unordered(Aa, Ab)
        } else {
            Self::ordered(father, mother)
        }
    }
}

impl fmt::Display for PairPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.first.as_str(),
            self.link.symbol(),
            self.second.as_str()
        )
    }
}

/// Canonical genotype pattern of a quartet site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenotypePattern {
    /// Founder pair.
    pub parents: PairPattern,
    /// Children pair; always [`PairLink::Unordered`].
    pub children: PairPattern,
}

impl GenotypePattern {
    /// Derive the pattern from the four genotypes. Phase is ignored.
    pub fn derive(genotypes: &PerMember<Genotype>) -> Self {
        let major = most_frequent_allele(genotypes);
        let member = |m: FamilyMember| MemberPattern::of(&genotypes[m], major);

        let children =
            PairPattern::children(member(FamilyMember::Child1), member(FamilyMember::Child2));
        let parents = PairPattern::founders(
            member(FamilyMember::Father),
            member(FamilyMember::Mother),
            &children,
        );

        Self { parents, children }
    }
}

/// Most frequent allele among the founders.
///
/// With a 2:2 founder split the tie is broken over all eight quartet
/// alleles: four or more reference copies select the reference allele.
/// Because the founders contribute exactly two, this depends only on the
/// children's reference count.
pub fn most_frequent_allele(genotypes: &PerMember<Genotype>) -> Allele {
    let reference_count = |members: &[FamilyMember]| -> usize {
        members
            .iter()
            .map(|&m| genotypes[m].count(Allele::Reference))
            .sum()
    };

    match reference_count(&FamilyMember::FOUNDERS) {
        0 | 1 => Allele::Alternative,
        founders @ 2 => {
            if founders + reference_count(&FamilyMember::CHILDREN) >= 4 {
                Allele::Reference
            } else {
                Allele::Alternative
            }
        }
        _ => Allele::Reference,
    }
}

impl fmt::Display for GenotypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.parents, self.children)
    }
}

impl FromStr for GenotypePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PatternError::Malformed(s.to_string());

        let pair = |text: &str, allow_ordered: bool| -> Result<PairPattern, PatternError> {
            if text.len() != 5 || !text.is_ascii() {
                return Err(malformed());
            }
            let link = match &text[2..3] {
                "/" => PairLink::Unordered,
                "+" if allow_ordered => PairLink::Ordered,
                _ => return Err(malformed()),
            };
            Ok(PairPattern {
                first: text[..2].parse().map_err(|_| malformed())?,
                second: text[3..].parse().map_err(|_| malformed())?,
                link,
            })
        };

        let (parents, children) = s.split_once(';').ok_or_else(malformed)?;
        Ok(Self {
            parents: pair(parents, true)?,
            children: pair(children, false)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quartet(father: &str, mother: &str, child1: &str, child2: &str) -> PerMember<Genotype> {
        PerMember::new(father, mother, child1, child2).map(|gt| Genotype::parse(gt).unwrap())
    }

    #[test]
    fn majority_allele_from_founders() {
        assert_eq!(
            most_frequent_allele(&quartet("0/0", "0/1", "1/1", "1/1")),
            Allele::Reference
        );
        assert_eq!(
            most_frequent_allele(&quartet("1/1", "0/1", "0/0", "0/0")),
            Allele::Alternative
        );
    }

    #[test]
    fn tie_is_broken_by_children() {
        assert_eq!(
            most_frequent_allele(&quartet("0/1", "0/1", "0/1", "0/1")),
            Allele::Reference
        );
        assert_eq!(
            most_frequent_allele(&quartet("0/1", "0/1", "0/1", "1/1")),
            Allele::Alternative
        );
    }

    #[test]
    fn derives_identical_pattern() {
        let pattern = GenotypePattern::derive(&quartet("0/1", "0/1", "1/1", "1/1"));
        assert_eq!(pattern.to_string(), "ab/ab;aa/aa");
    }

    #[test]
    fn homozygous_founders_sort_bb_last() {
        let pattern = GenotypePattern::derive(&quartet("1/1", "0/0", "0/1", "0/1"));
        assert_eq!(pattern.to_string(), "aa/bb;ab/ab");
    }

    #[test]
    fn ordered_founders_keep_father_first() {
        let pattern = GenotypePattern::derive(&quartet("0/1", "0/0", "0/0", "0/1"));
        assert_eq!(pattern.to_string(), "ab+aa;aa/ab");

        let pattern = GenotypePattern::derive(&quartet("0/0", "0/1", "0/1", "0/0"));
        assert_eq!(pattern.to_string(), "aa+ab;aa/ab");
    }

    #[test]
    fn b_allele_in_children_forces_unordered_founders() {
        let pattern = GenotypePattern::derive(&quartet("0/1", "0/0", "1/1", "0/0"));
        assert_eq!(pattern.to_string(), "aa/ab;aa/bb");
    }

    #[test]
    fn parses_rendered_patterns() {
        for text in ["ab/ab;aa/aa", "aa+ab;ab/ab", "aa/bb;ab/ab"] {
            let pattern: GenotypePattern = text.parse().unwrap();
            assert_eq!(pattern.to_string(), text);
        }
        assert!("ab+ab;aa+aa".parse::<GenotypePattern>().is_err());
        assert!("ab/ab".parse::<GenotypePattern>().is_err());
        assert!("ab/xx;aa/aa".parse::<GenotypePattern>().is_err());
    }
}
