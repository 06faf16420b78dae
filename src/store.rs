//! A heterogeneous store holds one collection per type of a type set.

use std::any::{self, TypeId};
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

use crate::link::Slot;
use crate::type_set::{Member, TypeSet, VisitAll};
use crate::{Collection, GridObject};

#[cfg(test)]
mod tests;

/// Stores objects of every type in the type set `S`, one [`Collection`] per type.
///
/// All typed operations take the object type `T` and an inferred position marker `I`;
/// `T` must be a member of `S`, which is checked at compile time.
///
/// ```
/// use std::rc::Rc;
///
/// use gridstore::{GridObject, GridRef, Store};
///
/// #[derive(GridObject)]
/// struct Player {
///     #[grid_ref]
///     grid_ref: GridRef<Self>,
/// }
///
/// #[derive(GridObject)]
/// struct Monster {
///     #[grid_ref]
///     grid_ref: GridRef<Self>,
/// }
///
/// let mut store = Store::<(Player, Monster)>::new();
/// let player = Rc::new(Player { grid_ref: GridRef::new() });
///
/// assert!(store.insert(&player));
/// assert_eq!(store.count::<Player, _>(), 1);
/// assert_eq!(store.count::<Monster, _>(), 0);
///
/// assert!(store.remove(&*player));
/// assert_eq!(store.count::<Player, _>(), 0);
/// ```
pub struct Store<S: TypeSet> {
    collections: S::Collections,
}

impl<S: TypeSet> Store<S> {
    /// Creates an empty store.
    pub fn new() -> Self { Self { collections: S::new_collections() } }

    /// Inserts `object` into the collection for `T`.
    ///
    /// Returns `false` without any effect if the object is already linked,
    /// whether into this store or into any other container.
    pub fn insert<T: GridObject, I>(&mut self, object: &Rc<T>) -> bool
    where
        S: Member<T, I>,
    {
        S::collection(&self.collections).insert(object)
    }

    /// Inserts `object`, counting it towards [`active_len`](Self::active_len) if `active` is set.
    pub(crate) fn insert_marked<T: GridObject, I>(&mut self, object: &Rc<T>, active: bool) -> bool
    where
        S: Member<T, I>,
    {
        S::collection(&self.collections).insert_marked(object, active)
    }

    /// Inserts `object` if `T` is a member of the type set.
    ///
    /// This is the escape hatch for generic call sites
    /// that do not know statically whether this store supports `T`.
    /// For types outside the type set this is a no-op returning `false`.
    /// Unlike the typed operations, the member lookup happens at runtime.
    pub fn try_insert<T: GridObject>(&mut self, object: &Rc<T>) -> bool {
        match S::try_insert(&self.collections, object) {
            Some(inserted) => inserted,
            None => {
                log::trace!("{} is not a member of this store", any::type_name::<T>());
                false
            }
        }
    }

    /// Returns whether `T` is a member of the type set.
    pub fn supports<T: 'static>() -> bool { S::position_of(TypeId::of::<T>()).is_some() }

    /// Removes `object` from the collection for `T`.
    ///
    /// Returns `false` if the object is not in this store.
    pub fn remove<T: GridObject, I>(&mut self, object: &T) -> bool
    where
        S: Member<T, I>,
    {
        S::collection(&self.collections).remove(object)
    }

    /// Returns whether `object` is in this store.
    pub fn contains<T: GridObject, I>(&self, object: &T) -> bool
    where
        S: Member<T, I>,
    {
        S::collection(&self.collections).contains(object)
    }

    /// Returns the number of objects of type `T`.
    pub fn count<T, I>(&self) -> usize
    where
        S: Member<T, I>,
    {
        S::collection(&self.collections).len()
    }

    /// Returns the collection for `T`.
    ///
    /// The collection is a read-only view;
    /// objects can only be added and removed through the store.
    ///
    /// ```compile_fail
    /// # use std::rc::Rc;
    /// # use gridstore::{GridObject, GridRef, Store};
    /// # #[derive(GridObject)]
    /// # struct Player {
    /// #     #[grid_ref]
    /// #     grid_ref: GridRef<Self>,
    /// # }
    /// let store = Store::<(Player,)>::new();
    /// let player = Rc::new(Player { grid_ref: GridRef::new() });
    /// store.collection::<Player, _>().insert(&player);
    /// ```
    pub fn collection<T, I>(&self) -> &Collection<T>
    where
        S: Member<T, I>,
    {
        S::collection(&self.collections)
    }

    /// Applies `visitor` to every collection in type set order.
    pub fn accept<V: VisitAll<S>>(&self, visitor: &mut V) { visitor.visit_all(&self.collections) }

    /// Returns the total number of objects of all types.
    pub fn len(&self) -> usize { S::total_len(&self.collections) }

    /// Returns the number of objects inserted through [`insert_marked`](Self::insert_marked)
    /// with `active` set that are still in the store.
    pub(crate) fn active_len(&self) -> usize { S::total_active(&self.collections) }

    /// Returns whether the store contains no objects.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns whether `slot` is a live slot of this store.
    pub fn is_live(&self, slot: Slot) -> bool { S::is_live(&self.collections, slot) }

    /// Removes all objects, returning the number of objects removed.
    pub fn clear(&mut self) -> usize { S::clear_all(&self.collections) }
}

impl<S: TypeSet> Default for Store<S> {
    fn default() -> Self { Self::new() }
}

impl<S: TypeSet> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store<({})> {{ len: {} }}", S::type_names().iter().join(", "), self.len())
    }
}

static_assertions::assert_not_impl_any!(Store<(u8, u16)>: Send, Sync);
