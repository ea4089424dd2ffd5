use std::fmt;

use super::{BlockState, InheritanceState, QuartetState, StateError, TrioState};

/// Pair of founder-trio states: father + children and mother + children.
///
/// The composite score is `paternal + maternal * 3` and is only defined
/// when both axes are `Unknown`, `NonIdentical` or `Identical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CrossTriosState {
    paternal: TrioState,
    maternal: TrioState,
}

impl CrossTriosState {
    /// Compose two trio states.
    pub fn new(paternal: TrioState, maternal: TrioState) -> Self {
        Self { paternal, maternal }
    }

    /// State of the father + children trio.
    pub fn paternal(&self) -> TrioState {
        self.paternal
    }

    /// State of the mother + children trio.
    pub fn maternal(&self) -> TrioState {
        self.maternal
    }

    /// Whether a quartet-level state is logically consistent with both trios.
    pub fn is_compatible_with(&self, state: QuartetState) -> bool {
        let (paternal, maternal) = (self.paternal, self.maternal);
        if paternal == TrioState::Unknown && maternal == TrioState::Unknown {
            return true;
        }

        match state {
            QuartetState::Identical => paternal.allows_identical() && maternal.allows_identical(),
            QuartetState::NonIdentical => {
                paternal.allows_non_identical() && maternal.allows_non_identical()
            }
            QuartetState::Paternal => {
                paternal.allows_identical() && maternal.allows_non_identical()
            }
            QuartetState::Maternal => {
                paternal.allows_non_identical() && maternal.allows_identical()
            }
            QuartetState::NotInformative => {
                paternal == TrioState::NotInformative && maternal == TrioState::NotInformative
            }
            QuartetState::Mie => paternal == TrioState::Mie || maternal == TrioState::Mie,
            QuartetState::Partial => {
                paternal == TrioState::Unknown || maternal == TrioState::Unknown
            }
        }
    }

    fn axis_score(&self, trio: TrioState) -> Result<i32, StateError> {
        if TrioState::KNOWN.contains(&trio) {
            Ok(trio.score())
        } else {
            Err(StateError::Unencodable(*self))
        }
    }
}

impl InheritanceState for CrossTriosState {
    const KIND: &'static str = "cross-trios";

    fn encode(&self) -> Result<i32, StateError> {
        Ok(self.axis_score(self.paternal)? + self.axis_score(self.maternal)? * 3)
    }

    fn decode(score: i32) -> Result<Self, StateError> {
        if !(0..=8).contains(&score) {
            return Err(StateError::OutOfDomain(score));
        }
        let axis = |value: i32| TrioState::from_score(value).ok_or(StateError::OutOfDomain(score));
        Ok(Self::new(axis(score % 3)?, axis(score / 3)?))
    }

    fn is_partial(&self) -> bool {
        self.paternal == TrioState::Unknown && self.maternal == TrioState::Unknown
    }
}

impl BlockState for CrossTriosState {
    fn accepts(&self, candidate: QuartetState) -> bool {
        self.is_compatible_with(candidate)
    }
}

impl fmt::Display for CrossTriosState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.paternal, self.maternal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip_on_known_domain() {
        for paternal in TrioState::KNOWN {
            for maternal in TrioState::KNOWN {
                let state = CrossTriosState::new(paternal, maternal);
                let score = state.encode().unwrap();
                assert_eq!(score, paternal.score() + maternal.score() * 3);
                assert_eq!(CrossTriosState::decode(score), Ok(state));
            }
        }
    }

    #[test]
    fn encode_rejects_mie_and_not_informative_axes() {
        let state = CrossTriosState::new(TrioState::Mie, TrioState::Identical);
        assert_eq!(state.encode(), Err(StateError::Unencodable(state)));

        let state = CrossTriosState::new(TrioState::Unknown, TrioState::NotInformative);
        assert!(state.encode().is_err());
    }

    #[test]
    fn decode_rejects_out_of_domain_scores() {
        assert_eq!(CrossTriosState::decode(9), Err(StateError::OutOfDomain(9)));
        assert_eq!(CrossTriosState::decode(-1), Err(StateError::OutOfDomain(-1)));
    }

    #[test]
    fn both_unknown_accepts_everything() {
        let state = CrossTriosState::new(TrioState::Unknown, TrioState::Unknown);
        assert!(QuartetState::ALL.iter().all(|&q| state.is_compatible_with(q)));
        assert!(state.is_partial());
    }

    #[test]
    fn haploidentical_states_follow_axes() {
        let state = CrossTriosState::new(TrioState::Identical, TrioState::NonIdentical);
        assert!(state.is_compatible_with(QuartetState::Paternal));
        assert!(!state.is_compatible_with(QuartetState::Maternal));
        assert!(!state.is_compatible_with(QuartetState::Identical));
        assert!(!state.is_compatible_with(QuartetState::NonIdentical));
        assert!(!state.is_compatible_with(QuartetState::Partial));

        let state = CrossTriosState::new(TrioState::Unknown, TrioState::Identical);
        assert!(state.is_compatible_with(QuartetState::Identical));
        assert!(state.is_compatible_with(QuartetState::Maternal));
        assert!(!state.is_compatible_with(QuartetState::Paternal));
        assert!(state.is_compatible_with(QuartetState::Partial));
    }

    #[test]
    fn mie_and_not_informative_need_matching_axes() {
        let mie = CrossTriosState::new(TrioState::Mie, TrioState::Identical);
        assert!(mie.is_compatible_with(QuartetState::Mie));
        assert!(!mie.is_compatible_with(QuartetState::NotInformative));

        let ni = CrossTriosState::new(TrioState::NotInformative, TrioState::NotInformative);
        assert!(ni.is_compatible_with(QuartetState::NotInformative));
        assert!(!ni.is_compatible_with(QuartetState::Identical));
    }
}
