//! A collection holds the objects of a single type that are currently linked into it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::{any, fmt, iter};

use bitvec::prelude::BitVec;
use xias::Xias;

use crate::link::{Generation, Slot};
use crate::GridObject;


/// The set of objects of type `T` linked into one container.
///
/// Objects are owned elsewhere (as `Rc<T>`);
/// the collection only stores weak pointers in a slot arena.
/// Each linked object records its slot in its embedded [`GridRef`](crate::GridRef),
/// so insertion, removal and cardinality are all O(1).
///
/// A collection is a read-only view outside this crate.
/// Objects are added and removed through the owning [`Store`](crate::Store) or [`Grid`](crate::Grid),
/// or leave by [`GridRef::unlink`](crate::GridRef::unlink) and by being dropped.
///
/// Iteration order is not meaningful.
pub struct Collection<T> {
    arena: Rc<RefCell<Arena<T>>>,
}

impl<T> Collection<T> {
    #[cfg(test)]
    pub(crate) fn new() -> Self { Self::at_position(0) }

    /// Creates an empty collection for the type at `position` of a type set.
    pub(crate) fn at_position(position: usize) -> Self {
        Self { arena: Rc::new(RefCell::new(Arena::new(position))) }
    }

    pub(crate) fn arena(&self) -> &Rc<RefCell<Arena<T>>> { &self.arena }

    /// Returns the number of objects in this collection.
    pub fn len(&self) -> usize { self.arena.borrow().cardinality }

    /// Returns whether this collection is empty.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Returns the number of objects that were active when inserted.
    pub(crate) fn active_len(&self) -> usize { self.arena.borrow().active_cardinality }

    /// Returns whether `slot` is a live slot of this collection.
    pub fn is_live(&self, slot: Slot) -> bool { self.arena.borrow().is_live(slot) }

    /// Returns an iterator over the objects in this collection.
    ///
    /// The iterator walks the slots in index order and only borrows the collection
    /// while stepping, so the collection may be freely mutated during iteration.
    /// Objects removed before the walk reaches them are skipped;
    /// objects inserted behind the cursor are not visited.
    pub fn iter(&self) -> Iter<'_, T> { Iter { arena: &self.arena, cursor: Some(0) } }

    /// Calls `f` on each object in this collection.
    pub fn for_each(&self, mut f: impl FnMut(&Rc<T>)) {
        for object in self.iter() {
            f(&object);
        }
    }

    /// Vacates every slot of this collection, returning the number of objects removed.
    ///
    /// Objects are not touched; their references simply become stale.
    pub(crate) fn clear(&self) -> usize {
        let cleared = self.arena.borrow_mut().clear();
        if cleared > 0 {
            log::debug!("Cleared {cleared} objects of {}", any::type_name::<T>());
        }
        cleared
    }
}

impl<T: GridObject> Collection<T> {
    /// Links `object` into this collection.
    ///
    /// Returns `false` if the object is already linked anywhere.
    pub(crate) fn insert(&self, object: &Rc<T>) -> bool { self.insert_marked(object, false) }

    /// Links `object` into this collection, counting it as active if `active` is set.
    pub(crate) fn insert_marked(&self, object: &Rc<T>, active: bool) -> bool {
        object.grid_ref().link(self, object, active).is_some()
    }

    /// Unlinks `object` if it is linked into this collection.
    ///
    /// Returns `false` if the object is not a member of this collection,
    /// in which case the object is left untouched.
    pub(crate) fn remove(&self, object: &T) -> bool {
        if self.contains(object) {
            object.grid_ref().unlink()
        } else {
            false
        }
    }

    /// Returns whether `object` is linked into this collection.
    pub fn contains(&self, object: &T) -> bool { object.grid_ref().is_linked_to(&self.arena) }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("type", &any::type_name::<T>())
            .field("len", &self.len())
            .finish()
    }
}

impl<'t, T> IntoIterator for &'t Collection<T> {
    type Item = Rc<T>;
    type IntoIter = Iter<'t, T>;

    fn into_iter(self) -> Iter<'t, T> { self.iter() }
}

/// Return value of [`Collection::iter`].
pub struct Iter<'t, T> {
    arena:  &'t RefCell<Arena<T>>,
    /// The next slot index to inspect, `None` once exhausted.
    cursor: Option<usize>,
}

impl<'t, T> Iterator for Iter<'t, T> {
    type Item = Rc<T>;

    fn next(&mut self) -> Option<Rc<T>> {
        loop {
            let cursor = self.cursor?;
            let arena = self.arena.borrow();

            let Some(index) = arena.next_occupied(cursor) else {
                self.cursor = None;
                return None;
            };
            self.cursor = Some(index + 1);

            let entry = arena.entries.get(index).expect("occupied bits mismatch entries");
            if let Some(object) = entry.object.upgrade() {
                return Some(object);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(_) => (0, Some(self.arena.borrow().cardinality)),
            None => (0, Some(0)),
        }
    }
}

impl<'t, T> iter::FusedIterator for Iter<'t, T> {}

struct Entry<T> {
    generation: Generation,
    object:     Weak<T>,
    active:     bool,
}

/// The slot arena shared between a collection and the links pointing into it.
pub(crate) struct Arena<T> {
    position:           usize,
    cardinality:        usize,
    /// Number of occupied entries marked active.
    active_cardinality: usize,
    occupied:           BitVec,
    entries:            Vec<Entry<T>>,
    /// Vacant slot indices, reused in FILO order.
    free:               Vec<u32>,
}

impl<T> Arena<T> {
    fn new(position: usize) -> Self {
        Self {
            position,
            cardinality: 0,
            active_cardinality: 0,
            occupied: BitVec::new(),
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    fn occupied(&self, index: usize) -> bool {
        match self.occupied.get(index) {
            Some(bit) => *bit,
            None => false,
        }
    }

    fn next_occupied(&self, from: usize) -> Option<usize> {
        let rest = self.occupied.get(from..)?;
        Some(from + rest.first_one()?)
    }

    /// Stores `object` in a vacant slot and returns the handle to it.
    pub(crate) fn occupy(&mut self, object: Weak<T>, active: bool) -> Slot {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                let index = self.entries.len();
                self.entries.push(Entry {
                    generation: Generation::default(),
                    object:     Weak::new(),
                    active:     false,
                });
                self.occupied.push(false);
                index.small_int::<u32>()
            }
        };

        let offset = index.small_int::<usize>();
        let entry = self.entries.get_mut(offset).expect("free list points to a valid entry");
        entry.object = object;
        entry.active = active;
        self.occupied.set(offset, true);
        self.cardinality += 1;
        if active {
            self.active_cardinality += 1;
        }

        Slot { position: self.position, index, generation: entry.generation }
    }

    /// Vacates the slot if it is live, returning whether it was.
    pub(crate) fn vacate(&mut self, slot: Slot) -> bool {
        if !self.is_live(slot) {
            return false;
        }

        let index = slot.index.small_int::<usize>();
        let entry = self.entries.get_mut(index).expect("live slot points to a valid entry");
        entry.generation = entry.generation.next();
        entry.object = Weak::new();
        if entry.active {
            entry.active = false;
            self.active_cardinality -= 1;
        }
        self.occupied.set(index, false);
        self.free.push(slot.index);
        self.cardinality -= 1;

        true
    }

    pub(crate) fn is_live(&self, slot: Slot) -> bool {
        let index = slot.index.small_int::<usize>();
        slot.position == self.position
            && self.occupied(index)
            && self.entries.get(index).map(|entry| entry.generation) == Some(slot.generation)
    }

    fn clear(&mut self) -> usize {
        let cleared = self.cardinality;

        for index in self.occupied.iter_ones() {
            let entry = self.entries.get_mut(index).expect("occupied bits mismatch entries");
            entry.generation = entry.generation.next();
            entry.object = Weak::new();
            entry.active = false;
            self.free.push(index.small_int());
        }
        self.occupied.fill(false);
        self.cardinality = 0;
        self.active_cardinality = 0;

        cleared
    }
}
