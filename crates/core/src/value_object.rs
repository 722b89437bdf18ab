//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. They are defined entirely by their
//! attribute values, so two value objects with the same values are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An item code,
/// a rule set, or a validation outcome is a value object; an inventory item
/// (which has an id) is not.
///
/// To "modify" a value object, build a new one. Immutability is what lets a
/// single rule set be shared across concurrent validations without locking.
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ItemCode(String);
///
/// impl ValueObject for ItemCode {}
///
/// let a = ItemCode("AB12CD".to_string());
/// let b = ItemCode("AB12CD".to_string());
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
