//! Family members, alleles and per-member genotypes.
//!
//! The member set of a quartet is closed, so per-member data lives in a
//! fixed array indexed by [`FamilyMember`] rather than in a map.

mod allele;
mod genotype;
mod member;

pub use allele::Allele;
pub use genotype::{Genotype, GenotypeError};
pub use member::{FamilyMember, PerMember};
