//! Statically dispatched visitors over heterogeneous containers.
//!
//! A visitor implements [`Visit<T>`] once for every object type it can be applied to.
//! Containers accept any visitor implementing [`VisitAll<S>`](crate::type_set::VisitAll)
//! for their type set, which is automatically the case
//! when the visitor implements `Visit<T>` for every member `T`.
//! Forgetting a member type is therefore a compile error.
//!
//! `Visit::visit` does nothing by default,
//! so types the visitor is not interested in only need an empty impl:
//!
//! ```
//! use std::rc::Rc;
//!
//! use gridstore::{Collection, GridObject, GridRef, Store, Visit};
//!
//! #[derive(GridObject)]
//! struct Player {
//!     #[grid_ref]
//!     grid_ref: GridRef<Self>,
//! }
//!
//! #[derive(GridObject)]
//! struct Monster {
//!     #[grid_ref]
//!     grid_ref: GridRef<Self>,
//!     health:   u32,
//! }
//!
//! #[derive(Default)]
//! struct TotalHealth(u32);
//!
//! impl Visit<Monster> for TotalHealth {
//!     fn visit(&mut self, monsters: &Collection<Monster>) {
//!         for monster in monsters {
//!             self.0 += monster.health;
//!         }
//!     }
//! }
//! impl Visit<Player> for TotalHealth {}
//!
//! let mut store = Store::<(Player, Monster)>::new();
//! let monster = Rc::new(Monster { grid_ref: GridRef::new(), health: 7 });
//! store.insert(&monster);
//!
//! let mut total = TotalHealth::default();
//! store.accept(&mut total);
//! assert_eq!(total.0, 7);
//! ```

use std::any::Any;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::Collection;

#[cfg(test)]
mod tests;

/// Visits the collection of objects of type `T`.
pub trait Visit<T> {
    /// Called once with the collection for `T`.
    ///
    /// The default implementation ignores the collection.
    fn visit(&mut self, collection: &Collection<T>) { let _ = collection; }
}

/// Adapts a closure into a visitor that only observes objects of type `T`.
///
/// `OnlyVisit` can be accepted by any container;
/// collections of types other than `T` are skipped.
///
/// The skip is decided by comparing the `TypeId`s of `T` and the visited type.
/// Both are constants in each monomorphized `visit`,
/// so the comparison folds away and no type is dispatched at runtime.
/// Implement [`Visit`] per member type instead where this must be guaranteed.
pub struct OnlyVisit<T, F> {
    f:   F,
    _ph: PhantomData<fn(&Rc<T>)>,
}

impl<T, F: FnMut(&Rc<T>)> OnlyVisit<T, F> {
    /// Wraps `f`.
    pub fn new(f: F) -> Self { Self { f, _ph: PhantomData } }

    /// Unwraps the closure.
    pub fn into_inner(self) -> F { self.f }
}

impl<T: 'static, U: 'static, F: FnMut(&Rc<T>)> Visit<U> for OnlyVisit<T, F> {
    fn visit(&mut self, collection: &Collection<U>) {
        let any: &dyn Any = collection;
        if let Some(collection) = any.downcast_ref::<Collection<T>>() {
            collection.for_each(&mut self.f);
        }
    }
}

/// A visitor counting the objects of type `T`.
///
/// Like [`OnlyVisit`], it matches the visited type through a constant `TypeId` comparison.
pub struct Count<T> {
    count: usize,
    _ph:   PhantomData<fn(&T)>,
}

impl<T> Count<T> {
    /// Creates a counter starting from zero.
    pub fn new() -> Self { Self { count: 0, _ph: PhantomData } }

    /// Returns the number of objects counted so far.
    pub fn get(&self) -> usize { self.count }
}

impl<T> Default for Count<T> {
    fn default() -> Self { Self::new() }
}

impl<T: 'static, U: 'static> Visit<U> for Count<T> {
    fn visit(&mut self, collection: &Collection<U>) {
        let any: &dyn Any = collection;
        if any.is::<Collection<T>>() {
            self.count += collection.len();
        }
    }
}
