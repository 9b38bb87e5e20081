use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};

/// Structural equality and hashing through a trait object.
///
/// Queries, filters and score functions are handled as `dyn` objects, yet the
/// enclosing query has to be comparable and hashable (query plans get cached).
/// `DynEq` is implemented for every `'static` type that is `PartialEq + Hash`:
/// two objects are equal iff they have the same concrete type and are equal as
/// values of that type.
pub trait DynEq {
    /// Returns true iff `other` has the same concrete type as `self`
    /// and is equal to `self`.
    fn dyn_eq(&self, other: &dyn Any) -> bool;

    /// Feeds the concrete type and the value of `self` to `state`.
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T: PartialEq + Hash + 'static> DynEq for T {
    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<T>()
            .is_some_and(|other_val| self == other_val)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}
