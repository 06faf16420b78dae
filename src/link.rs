//! Back-references embedded in stored objects.
//!
//! Every object that can be stored in a [`Collection`] embeds exactly one [`GridRef`]
//! (exposed through [`GridObject::grid_ref`]).
//! The reference records which collection slot currently holds the object,
//! so that the object can be removed in O(1) without any lookup.
//!
//! A link is the pair of a weak pointer to the collection's slot arena
//! and a [`Slot`] handle carrying the slot's [`Generation`].
//! A link is only live while the arena still exists
//! and the slot still carries the same generation;
//! otherwise the reference behaves exactly like an unlinked one.
//!
//! Dropping a `GridRef` (usually because its owning object is dropped)
//! unlinks it, so an object can never outlive its membership.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::{any, fmt, ptr};

use crate::collection::{Arena, Collection};
use crate::GridObject;

mod generation;
pub use generation::Generation;

/// A handle to an occupied slot of a collection.
///
/// Handles are only meaningful relative to the store that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub(crate) position:   usize,
    pub(crate) index:      u32,
    pub(crate) generation: Generation,
}

impl Slot {
    /// The position of the object type in the type set of the issuing store.
    pub fn position(&self) -> usize { self.position }

    /// The index of the slot in its collection.
    pub fn index(&self) -> u32 { self.index }

    /// The generation of the slot at the time it was occupied.
    pub fn generation(&self) -> Generation { self.generation }
}

struct Link<T> {
    arena: Weak<RefCell<Arena<T>>>,
    slot:  Slot,
}

/// The back-reference embedded in every storable object.
///
/// A `GridRef` starts unlinked.
/// It is linked by inserting its owning object into a store or grid
/// and unlinked by removing the object, by calling [`unlink`](Self::unlink) directly,
/// or by dropping the object.
pub struct GridRef<T> {
    link: RefCell<Option<Link<T>>>,
}

impl<T> GridRef<T> {
    /// Creates an unlinked reference.
    pub const fn new() -> Self { Self { link: RefCell::new(None) } }

    /// Returns whether the reference currently points at a live slot.
    pub fn is_linked(&self) -> bool { self.slot().is_some() }

    /// Returns the handle of the live slot holding the owning object.
    pub fn slot(&self) -> Option<Slot> {
        let link = self.link.borrow();
        let link = link.as_ref()?;
        let arena = link.arena.upgrade()?;
        let live = arena.borrow().is_live(link.slot);
        live.then_some(link.slot)
    }

    /// Returns whether the reference is live in the given arena.
    pub(crate) fn is_linked_to(&self, arena: &Rc<RefCell<Arena<T>>>) -> bool {
        match &*self.link.borrow() {
            Some(link) => {
                ptr::eq(link.arena.as_ptr(), Rc::as_ptr(arena)) && arena.borrow().is_live(link.slot)
            }
            None => false,
        }
    }

    /// Removes the owning object from its current collection.
    ///
    /// This is a no-op if the reference is unlinked,
    /// the link is stale or the collection no longer exists.
    /// Returns whether a live slot was vacated.
    pub fn unlink(&self) -> bool {
        let link = self.link.borrow_mut().take();
        let Some(link) = link else { return false };

        let Some(arena) = link.arena.upgrade() else { return false };
        let vacated = arena.borrow_mut().vacate(link.slot);
        if vacated {
            log::trace!("Unlinked {} from {:?}", any::type_name::<T>(), link.slot);
        }
        vacated
    }
}

impl<T: GridObject> GridRef<T> {
    /// Registers `object` in `collection`, counting it as active if `active` is set.
    ///
    /// `self` must be the reference embedded in `object`.
    /// Returns `None` without any effect if the reference is already linked,
    /// whether to `collection` or to any other collection.
    /// A reference must be unlinked before it can be linked again.
    pub(crate) fn link(
        &self,
        collection: &Collection<T>,
        object: &Rc<T>,
        active: bool,
    ) -> Option<Slot> {
        debug_assert!(
            ptr::eq(object.grid_ref(), self),
            "GridRef::link must be called on the reference embedded in the object"
        );

        if let Some(slot) = self.slot() {
            log::warn!(
                "Refusing to link {} which is still linked at {:?}",
                any::type_name::<T>(),
                slot
            );
            return None;
        }

        let arena = collection.arena();
        let slot = arena.borrow_mut().occupy(Rc::downgrade(object), active);
        *self.link.borrow_mut() = Some(Link { arena: Rc::downgrade(arena), slot });
        log::trace!("Linked {} at {:?}", any::type_name::<T>(), slot);
        Some(slot)
    }
}

impl<T> Default for GridRef<T> {
    fn default() -> Self { Self::new() }
}

impl<T> Drop for GridRef<T> {
    fn drop(&mut self) { self.unlink(); }
}

impl<T> fmt::Debug for GridRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridRef").field("slot", &self.slot()).finish()
    }
}

static_assertions::assert_not_impl_any!(GridRef<()>: Send, Sync, Clone);
