//! A heterogeneous store mapping keys to objects.
//!
//! Unlike [`Store`](crate::Store), a [`KeyedStore`] does not link objects;
//! it only holds weak pointers, so an object may be mapped in any number of keyed stores
//! while also being a member of a [`Collection`](crate::Collection).

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::{any, ptr};

use indexmap::map::Entry;
use itertools::Itertools;

use crate::error::Result;
use crate::type_set::{KeyedMember, KeyedSet};

#[cfg(test)]
mod tests;

/// Whether keyed insertion conflicts panic in the current build.
///
/// This is controlled by the `debug-conflict-abort` and `release-conflict-abort` features.
pub const ABORTS_ON_CONFLICT: bool = cfg!(any(
    all(debug_assertions, feature = "debug-conflict-abort"),
    all(not(debug_assertions), feature = "release-conflict-abort"),
));

/// The successful outcome of [`KeyedStore::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    /// The key was not mapped before.
    New,
    /// The key was already mapped to the same object.
    AlreadyPresent,
}

/// Maps keys of type `K` to objects of each type in the type set `S`.
///
/// Each member type has its own key space,
/// so the same key may map to a `Player` and to a `Monster` at the same time.
pub struct KeyedStore<S: KeyedSet<K>, K> {
    maps: S::Maps,
}

impl<S: KeyedSet<K>, K: Eq + Hash + fmt::Debug> KeyedStore<S, K> {
    /// Creates an empty keyed store.
    pub fn new() -> Self { Self { maps: S::new_maps() } }

    /// Maps `key` to `object`.
    ///
    /// Mapping a key to the object it already maps to is a no-op.
    /// A key whose previous object has been dropped is treated as unmapped.
    ///
    /// # Errors
    /// Mapping a key that maps to a different live object is a logic error.
    /// Depending on the `debug-conflict-abort` and `release-conflict-abort` features
    /// (see [`ABORTS_ON_CONFLICT`]), this either panics
    /// or returns [`Error::KeyConflict`](crate::Error::KeyConflict)
    /// without changing the existing mapping.
    pub fn insert<T: 'static, I>(&mut self, key: K, object: &Rc<T>) -> Result<Inserted>
    where
        S: KeyedMember<T, K, I>,
    {
        match S::map_mut(&mut self.maps).entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(Rc::downgrade(object));
                Ok(Inserted::New)
            }
            Entry::Occupied(mut entry) => {
                if ptr::eq(entry.get().as_ptr(), Rc::as_ptr(object)) {
                    return Ok(Inserted::AlreadyPresent);
                }

                if entry.get().strong_count() == 0 {
                    log::trace!(
                        "Replacing dropped {} at key {:?}",
                        any::type_name::<T>(),
                        entry.key()
                    );
                    entry.insert(Rc::downgrade(object));
                    return Ok(Inserted::New);
                }

                conflict::<T, K>(entry.key())
            }
        }
    }

    /// Returns the object of type `T` mapped from `key`.
    ///
    /// Returns `None` if the key is unmapped or the object has been dropped.
    pub fn find<T: 'static, I>(&self, key: &K) -> Option<Rc<T>>
    where
        S: KeyedMember<T, K, I>,
    {
        S::map(&self.maps).get(key)?.upgrade()
    }

    /// Unmaps `key` for type `T`, returning whether a mapping was removed.
    pub fn erase<T: 'static, I>(&mut self, key: &K) -> bool
    where
        S: KeyedMember<T, K, I>,
    {
        S::map_mut(&mut self.maps).swap_remove(key).is_some()
    }

    /// Returns whether `key` is mapped for type `T`.
    pub fn contains_key<T: 'static, I>(&self, key: &K) -> bool
    where
        S: KeyedMember<T, K, I>,
    {
        S::map(&self.maps).contains_key(key)
    }

    /// Returns the number of keys mapped for type `T`.
    ///
    /// Keys whose object has been dropped are still counted until they are erased or replaced.
    pub fn count<T: 'static, I>(&self) -> usize
    where
        S: KeyedMember<T, K, I>,
    {
        S::map(&self.maps).len()
    }

    /// Iterates over the live mappings for type `T`.
    ///
    /// Mappings are yielded in insertion order,
    /// except that erasing a key moves the most recent mapping into its place.
    pub fn iter<T: 'static, I>(&self) -> impl Iterator<Item = (&K, Rc<T>)> + '_
    where
        S: KeyedMember<T, K, I>,
    {
        S::map(&self.maps).iter().filter_map(|(key, object)| Some((key, object.upgrade()?)))
    }

    /// Returns the total number of mappings of all types.
    pub fn len(&self) -> usize { S::total_mappings(&self.maps) }

    /// Returns whether there are no mappings of any type.
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

cfg_if::cfg_if! {
    if #[cfg(any(
        all(debug_assertions, feature = "debug-conflict-abort"),
        all(not(debug_assertions), feature = "release-conflict-abort"),
    ))] {
        fn conflict<T, K: fmt::Debug>(key: &K) -> Result<Inserted> {
            panic!("Key {key:?} is already mapped to a different {}", any::type_name::<T>())
        }
    } else {
        fn conflict<T, K: fmt::Debug>(key: &K) -> Result<Inserted> {
            let type_name = any::type_name::<T>();
            log::error!("Key {key:?} is already mapped to a different {type_name}");
            Err(crate::Error::KeyConflict { type_name, key: format!("{key:?}") })
        }
    }
}

impl<S: KeyedSet<K>, K: Eq + Hash + fmt::Debug> Default for KeyedStore<S, K> {
    fn default() -> Self { Self::new() }
}

impl<S: KeyedSet<K>, K> fmt::Debug for KeyedStore<S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KeyedStore<({}), {}> {{ len: {} }}",
            S::type_names().iter().join(", "),
            any::type_name::<K>(),
            S::total_mappings(&self.maps),
        )
    }
}

static_assertions::assert_not_impl_any!(KeyedStore<(u8, u16), u32>: Send, Sync);
