//! Entity trait: identity + continuity across edits.

/// Entity marker + minimal interface.
///
/// Records referenced across modules (parties, productions, moves) are compared
/// by identity, never by their current field values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether `other` designates the same record.
    fn same_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
