//! Entity trait: identity that survives edits.

/// Entity marker + minimal interface.
///
/// Catalog records are looked up and replaced by identifier, so repositories
/// key on `Entity::id` rather than on field values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
