//! Compile-time lists of object types.
//!
//! A type set is a tuple of distinct object types, e.g. `(Player, Creature, Corpse)`.
//! Containers are parameterized by a type set and hold one collection per member type.
//!
//! Membership is expressed by [`Member<T, I>`],
//! where `I` is an [`At`] marker for the position of `T` in the tuple.
//! The marker is always inferred (pass `_` in turbofish position),
//! so the position of a type is resolved entirely at compile time.
//! If a type appears twice in the same tuple, the marker becomes ambiguous
//! and every typed operation on that type fails to compile.
//!
//! Tuples of up to 16 types are supported.

use std::any::{self, Any, TypeId};
use std::hash::Hash;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::link::Slot;
use crate::visit::Visit;
use crate::{Collection, GridObject};

/// Marks the position of a type in a type set.
pub struct At<const N: usize>(PhantomData<[(); N]>);

/// A compile-time ordered list of distinct object types.
///
/// This trait is implemented for tuples and should not be implemented manually.
pub trait TypeSet: 'static {
    /// The tuple of one [`Collection`] per member type, in the same order.
    type Collections;

    /// The number of member types.
    const LEN: usize;

    /// Creates an empty collection for each member type.
    fn new_collections() -> Self::Collections;

    /// Returns the names of the member types in order.
    fn type_names() -> Vec<&'static str>;

    /// Returns the position of the type with the given ID, if it is a member.
    fn position_of(type_id: TypeId) -> Option<usize>;

    /// Returns the total number of objects in all collections.
    fn total_len(collections: &Self::Collections) -> usize;

    /// Returns the total number of objects inserted as active in all collections.
    fn total_active(collections: &Self::Collections) -> usize;

    /// Clears all collections, returning the total number of objects removed.
    fn clear_all(collections: &Self::Collections) -> usize;

    /// Checks whether `slot` is live in the collection at its position.
    fn is_live(collections: &Self::Collections, slot: Slot) -> bool;

    /// Inserts `object` into the collection for `T` if `T` is a member.
    ///
    /// Returns `None` if `T` is not a member.
    fn try_insert<T: GridObject>(collections: &Self::Collections, object: &Rc<T>) -> Option<bool>;
}

/// Indicates that `T` is the member of `Self` at the position marked by `I`.
pub trait Member<T, I>: TypeSet {
    /// The position of `T` in the type set.
    const POSITION: usize;

    /// Selects the collection for `T`.
    fn collection(collections: &Self::Collections) -> &Collection<T>;
}

/// A type set whose member types can be mapped from keys of type `K`.
pub trait KeyedSet<K>: TypeSet {
    /// The tuple of one key-to-object map per member type, in the same order.
    ///
    /// Each map iterates in insertion order, except that erasing a key
    /// moves the last mapping into its place.
    type Maps;

    /// Creates an empty map for each member type.
    fn new_maps() -> Self::Maps;

    /// Returns the total number of mappings in all maps.
    fn total_mappings(maps: &Self::Maps) -> usize;
}

/// Indicates that `T` is the member of `Self` at the position marked by `I`,
/// mapped from keys of type `K`.
pub trait KeyedMember<T, K, I>: KeyedSet<K> {
    /// Selects the map for `T`.
    fn map(maps: &Self::Maps) -> &IndexMap<K, Weak<T>>;

    /// Selects the map for `T` mutably.
    fn map_mut(maps: &mut Self::Maps) -> &mut IndexMap<K, Weak<T>>;
}

/// Visits every collection of a type set in order.
///
/// This trait is implemented automatically for every type
/// that implements [`Visit<T>`] for every member type `T` of `S`.
pub trait VisitAll<S: TypeSet> {
    /// Calls [`Visit::visit`] on each collection in type set order.
    fn visit_all(&mut self, collections: &S::Collections);
}

macro_rules! one {
    ($tt:tt) => {
        1
    };
}

macro_rules! impl_type_set {
    ($($ty:ident $index:tt)*) => {
        impl<$($ty: 'static,)*> TypeSet for ($($ty,)*) {
            type Collections = ($(Collection<$ty>,)*);

            const LEN: usize = 0 $(+ one!($ty))*;

            fn new_collections() -> Self::Collections { ($(Collection::<$ty>::at_position($index),)*) }

            fn type_names() -> Vec<&'static str> { vec![$(any::type_name::<$ty>()),*] }

            #[allow(unused_variables)]
            fn position_of(type_id: TypeId) -> Option<usize> {
                $(
                    if type_id == TypeId::of::<$ty>() {
                        return Some($index);
                    }
                )*
                None
            }

            #[allow(unused_variables)]
            fn total_len(collections: &Self::Collections) -> usize {
                0 $(+ collections.$index.len())*
            }

            #[allow(unused_variables)]
            fn total_active(collections: &Self::Collections) -> usize {
                0 $(+ collections.$index.active_len())*
            }

            #[allow(unused_variables)]
            fn clear_all(collections: &Self::Collections) -> usize {
                0 $(+ collections.$index.clear())*
            }

            #[allow(unused_variables, clippy::match_single_binding)]
            fn is_live(collections: &Self::Collections, slot: Slot) -> bool {
                match slot.position() {
                    $($index => collections.$index.is_live(slot),)*
                    _ => false,
                }
            }

            #[allow(unused_variables)]
            fn try_insert<T: GridObject>(
                collections: &Self::Collections,
                object: &Rc<T>,
            ) -> Option<bool> {
                $(
                    let any: &dyn Any = &collections.$index;
                    if let Some(collection) = any.downcast_ref::<Collection<T>>() {
                        return Some(collection.insert(object));
                    }
                )*
                None
            }
        }

        impl<K: Eq + Hash, $($ty: 'static,)*> KeyedSet<K> for ($($ty,)*) {
            type Maps = ($(IndexMap<K, Weak<$ty>>,)*);

            fn new_maps() -> Self::Maps { ($(IndexMap::<K, Weak<$ty>>::new(),)*) }

            #[allow(unused_variables)]
            fn total_mappings(maps: &Self::Maps) -> usize {
                0 $(+ maps.$index.len())*
            }
        }

        impl<V, $($ty: 'static,)*> VisitAll<($($ty,)*)> for V
        where
            $(V: Visit<$ty>,)*
        {
            #[allow(unused_variables)]
            fn visit_all(&mut self, collections: &($(Collection<$ty>,)*)) {
                $(
                    Visit::<$ty>::visit(self, &collections.$index);
                )*
            }
        }

        impl_member!(@each [$($ty)*] $($ty $index)*);
    };
}

macro_rules! impl_member {
    (@each $all:tt $($ty:ident $index:tt)*) => {
        $(
            impl_member!(@one $all $ty $index);
        )*
    };
    (@one [$($all:ident)*] $ty:ident $index:tt) => {
        impl<$($all: 'static,)*> Member<$ty, At<$index>> for ($($all,)*) {
            const POSITION: usize = $index;

            fn collection(collections: &Self::Collections) -> &Collection<$ty> {
                &collections.$index
            }
        }

        impl<K: Eq + Hash, $($all: 'static,)*> KeyedMember<$ty, K, At<$index>> for ($($all,)*) {
            fn map(maps: &Self::Maps) -> &IndexMap<K, Weak<$ty>> { &maps.$index }

            fn map_mut(maps: &mut Self::Maps) -> &mut IndexMap<K, Weak<$ty>> { &mut maps.$index }
        }
    };
}

macro_rules! impl_type_set_accumulate {
    ([$($done:tt)*] []) => {
        impl_type_set!($($done)*);
    };
    ([$($done:tt)*] [$ty:ident $index:tt $($rest:tt)*]) => {
        impl_type_set!($($done)*);
        impl_type_set_accumulate!([$($done)* $ty $index] [$($rest)*]);
    };
}

impl_type_set_accumulate!([] [
    P0 0 P1 1 P2 2 P3 3 P4 4 P5 5 P6 6 P7 7
    P8 8 P9 9 P10 10 P11 11 P12 12 P13 13 P14 14 P15 15
]);
