use super::{GenotypePattern, MemberPattern, PairLink, PatternError};
use crate::family::{Genotype, PerMember};
use crate::state::{CandidateStates, QuartetState};

/// Candidate quartet states for a canonical pattern.
///
/// Every pattern the deriver can produce has an entry; anything else is
/// rejected rather than defaulted.
pub fn classify(pattern: &GenotypePattern) -> Result<CandidateStates, PatternError> {
    use MemberPattern::{Aa, Ab, Bb};
    use PairLink::{Ordered as O, Unordered as U};
    use QuartetState::*;

    let (parents, children) = (pattern.parents, pattern.children);
    if children.link != U {
        return Err(PatternError::Unrecognized(pattern.to_string()));
    }

    let key = (
        parents.first,
        parents.link,
        parents.second,
        children.first,
        children.second,
    );
    let states = match key {
        // Founders share every allele.
        (Aa, U, Aa, Aa, Aa) => CandidateStates::one(NotInformative),
        (Aa, U, Aa, Aa, Ab)
        | (Aa, U, Aa, Aa, Bb)
        | (Aa, U, Aa, Ab, Ab)
        | (Aa, U, Aa, Ab, Bb)
        | (Aa, U, Aa, Bb, Bb) => CandidateStates::one(Mie),

        // Both founders heterozygous.
        (Ab, U, Ab, Aa, Aa) => CandidateStates::one(Identical),
        (Ab, U, Ab, Aa, Bb) => CandidateStates::one(NonIdentical),
        (Ab, U, Ab, Aa, Ab) => CandidateStates::two(Paternal, Maternal),
        (Ab, U, Ab, Ab, Ab) => CandidateStates::two(Identical, NonIdentical),

        // Opposite homozygous founders.
        (Aa, U, Bb, Ab, Ab) => CandidateStates::one(NotInformative),
        (Aa, U, Bb, Aa, Aa) | (Aa, U, Bb, Aa, Ab) | (Aa, U, Bb, Aa, Bb) => {
            CandidateStates::one(Mie)
        }

        // One heterozygous founder and a child carrying a `b` allele.
        (Aa, U, Ab, Aa, Bb) | (Aa, U, Ab, Ab, Bb) | (Aa, U, Ab, Bb, Bb) => {
            CandidateStates::one(Mie)
        }

        // Only the mother is informative. Two `ab` children share her
        // haplotype the same way two `aa` children do.
        (Aa, O, Ab, Aa, Aa) | (Aa, O, Ab, Ab, Ab) => CandidateStates::two(Identical, Maternal),
        (Aa, O, Ab, Aa, Ab) => CandidateStates::two(NonIdentical, Paternal),

        // Only the father is informative; `ab/ab` children follow the same rule.
        (Ab, O, Aa, Aa, Aa) | (Ab, O, Aa, Ab, Ab) => CandidateStates::two(Identical, Paternal),
        (Ab, O, Aa, Aa, Ab) => CandidateStates::two(NonIdentical, Maternal),

        _ => return Err(PatternError::Unrecognized(pattern.to_string())),
    };
    Ok(states)
}

/// Classify a pattern given as text, e.g. `"ab/ab;aa/bb"`.
pub fn classify_str(pattern: &str) -> Result<CandidateStates, PatternError> {
    classify(&pattern.parse()?)
}

/// Stateless front end combining pattern derivation and classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier;

impl PatternClassifier {
    /// Create a classifier.
    pub fn new() -> Self {
        Self
    }

    /// Derive the pattern of `genotypes` and look up its candidate states.
    pub fn classify_genotypes(
        &self,
        genotypes: &PerMember<Genotype>,
    ) -> Result<(GenotypePattern, CandidateStates), PatternError> {
        let pattern = GenotypePattern::derive(genotypes);
        let states = classify(&pattern)?;
        Ok((pattern, states))
    }
}
