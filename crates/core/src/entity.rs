//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An inventory item keeps its id while its name and quantity change.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
