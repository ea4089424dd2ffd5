use std::fmt;
use std::ops::{Index, IndexMut};

/// Role of an individual within the quartet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FamilyMember {
    /// Paternal founder.
    Father,
    /// Maternal founder.
    Mother,
    /// First child.
    Child1,
    /// Second child.
    Child2,
}

impl FamilyMember {
    /// All members in canonical order.
    pub const ALL: [FamilyMember; 4] = [
        FamilyMember::Father,
        FamilyMember::Mother,
        FamilyMember::Child1,
        FamilyMember::Child2,
    ];

    /// The two founders.
    pub const FOUNDERS: [FamilyMember; 2] = [FamilyMember::Father, FamilyMember::Mother];

    /// The two children.
    pub const CHILDREN: [FamilyMember; 2] = [FamilyMember::Child1, FamilyMember::Child2];

    /// Position of the member in [`FamilyMember::ALL`].
    pub fn ordinal(self) -> usize {
        match self {
            FamilyMember::Father => 0,
            FamilyMember::Mother => 1,
            FamilyMember::Child1 => 2,
            FamilyMember::Child2 => 3,
        }
    }
}

impl fmt::Display for FamilyMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FamilyMember::Father => "father",
            FamilyMember::Mother => "mother",
            FamilyMember::Child1 => "child1",
            FamilyMember::Child2 => "child2",
        };
        f.write_str(name)
    }
}

/// One value per family member, indexed by [`FamilyMember`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PerMember<T> {
    values: [T; 4],
}

impl<T> PerMember<T> {
    /// Build from values in canonical member order.
    pub fn new(father: T, mother: T, child1: T, child2: T) -> Self {
        Self {
            values: [father, mother, child1, child2],
        }
    }

    /// Build by evaluating `f` once per member, stopping at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(FamilyMember) -> Result<T, E>) -> Result<Self, E> {
        let [father, mother, child1, child2] = FamilyMember::ALL;
        Ok(Self::new(f(father)?, f(mother)?, f(child1)?, f(child2)?))
    }

    /// Apply `f` to every value, keeping member positions.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PerMember<U> {
        PerMember {
            values: self.values.map(f),
        }
    }

    /// Iterate `(member, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FamilyMember, &T)> {
        FamilyMember::ALL.into_iter().zip(self.values.iter())
    }

    /// Values in canonical order.
    pub fn values(&self) -> &[T; 4] {
        &self.values
    }
}

impl<T> Index<FamilyMember> for PerMember<T> {
    type Output = T;

    fn index(&self, member: FamilyMember) -> &T {
        &self.values[member.ordinal()]
    }
}

impl<T> IndexMut<FamilyMember> for PerMember<T> {
    fn index_mut(&mut self, member: FamilyMember) -> &mut T {
        &mut self.values[member.ordinal()]
    }
}
