//! The object container of a single spatial grid.
//!
//! A grid holds two stores:
//! the world store for object types that can move between grids,
//! and the grid-local store for object types that stay in one grid for their lifetime.
//! Grid-local objects reporting [`GridObject::is_active_object`] on insertion
//! are counted as active by their collection until they leave it,
//! which together with the world objects of the active type `A`
//! decides whether the grid must keep simulating.

use std::marker::PhantomData;
use std::rc::Rc;
use std::{any, fmt};

use crate::type_set::{Member, TypeSet, VisitAll};
use crate::visit::{OnlyVisit, Visit};
use crate::{Collection, GridObject, Store};

mod loader;
pub use loader::{Depopulate, Loader, Populate};


/// Marks a type located in the world store at the position marked by `I`.
pub struct InWorld<I>(PhantomData<I>);

/// Marks a type located in the grid-local store at the position marked by `I`.
pub struct InGrid<I>(PhantomData<I>);

/// Resolves the store holding objects of type `T`.
///
/// `Loc` is either [`InWorld`] or [`InGrid`] and is always inferred.
/// If `T` is a member of both type sets of a grid, the location is ambiguous
/// and operations routed through this trait fail to compile.
pub trait Located<T, Loc> {
    /// Returns the collection holding objects of type `T`.
    fn locate(&self) -> &Collection<T>;
}

/// The objects currently located in one grid.
///
/// - `A` is the active world object type, usually the player type.
/// - `W` is the type set of world objects.
/// - `L` is the type set of grid-local objects.
///
/// The grid never owns objects.
/// Objects are owned externally as `Rc<T>` and removed automatically when dropped.
pub struct Grid<A, W: TypeSet, L: TypeSet> {
    world: Store<W>,
    local: Store<L>,
    _ph:   PhantomData<fn() -> A>,
}

impl<A: 'static, W: TypeSet, L: TypeSet> Grid<A, W, L> {
    /// Creates an empty grid.
    ///
    /// The active type `A` must be a member of the world type set `W`.
    pub fn new<I>() -> Self
    where
        W: Member<A, I>,
    {
        Self { world: Store::new(), local: Store::new(), _ph: PhantomData }
    }

    /// Adds a world object to this grid.
    ///
    /// Returns `false` if the object is already linked anywhere,
    /// e.g. because it was not removed from its previous grid.
    pub fn add_world_object<T: GridObject, I>(&mut self, object: &Rc<T>) -> bool
    where
        W: Member<T, I>,
    {
        self.world.insert(object)
    }

    /// Removes a world object from this grid.
    ///
    /// Returns `false` if the object is not in this grid.
    pub fn remove_world_object<T: GridObject, I>(&mut self, object: &T) -> bool
    where
        W: Member<T, I>,
    {
        self.world.remove(object)
    }

    /// Adds a grid-local object to this grid.
    ///
    /// [`GridObject::is_active_object`] is evaluated once, before the object is linked.
    /// If it reports `true`, the object counts towards
    /// [`active_objects_in_grid`](Self::active_objects_in_grid) until it leaves this grid.
    /// Returns `false` if the object is already linked anywhere.
    pub fn add_grid_object<T: GridObject, I>(&mut self, object: &Rc<T>) -> bool
    where
        L: Member<T, I>,
    {
        let active = object.is_active_object();
        let inserted = self.local.insert_marked(object, active);
        if inserted && active {
            log::trace!("Added active {}", any::type_name::<T>());
        }
        inserted
    }

    /// Removes a grid-local object from this grid.
    ///
    /// An object that was active when added stops counting as active,
    /// regardless of what [`GridObject::is_active_object`] currently reports.
    /// Returns `false` if the object is not in this grid.
    pub fn remove_grid_object<T: GridObject, I>(&mut self, object: &T) -> bool
    where
        L: Member<T, I>,
    {
        self.local.remove(object)
    }

    /// Applies `visitor` to every world object collection.
    pub fn visit_world<V: VisitAll<W>>(&self, visitor: &mut V) { self.world.accept(visitor) }

    /// Applies `visitor` to every grid-local object collection.
    pub fn visit_grid<V: VisitAll<L>>(&self, visitor: &mut V) { self.local.accept(visitor) }

    /// Applies `visitor` to the collection of `T`, whichever store holds it.
    pub fn visit<T, Loc>(&self, visitor: &mut impl Visit<T>)
    where
        Self: Located<T, Loc>,
    {
        visitor.visit(self.locate());
    }

    /// Calls `f` on each object of type `T`, whichever store holds it.
    pub fn for_each<T: 'static, Loc>(&self, f: impl FnMut(&Rc<T>))
    where
        Self: Located<T, Loc>,
    {
        let mut visitor = OnlyVisit::new(f);
        self.visit::<T, Loc>(&mut visitor);
    }

    /// Returns the number of objects of type `T`, whichever store holds it.
    pub fn count<T, Loc>(&self) -> usize
    where
        Self: Located<T, Loc>,
    {
        self.locate().len()
    }

    /// Returns the number of objects keeping this grid active.
    ///
    /// This is the number of grid-local objects that were active when added
    /// and are still in this grid, plus the number of world objects of type `A`.
    /// Both counts are maintained on insertion and removal, so this is O(1) in the number of objects.
    pub fn active_objects_in_grid<I>(&self) -> usize
    where
        W: Member<A, I>,
    {
        self.local.active_len() + self.world.count::<A, I>()
    }

    /// Returns the world store.
    pub fn world(&self) -> &Store<W> { &self.world }

    /// Returns the grid-local store.
    ///
    /// Grid-local objects can only be added through the grid,
    /// which keeps the active count consistent.
    ///
    /// ```compile_fail
    /// # use std::rc::Rc;
    /// # use gridstore::{GridObject, GridRef, Grid};
    /// # #[derive(GridObject)]
    /// # struct Player {
    /// #     #[grid_ref]
    /// #     grid_ref: GridRef<Self>,
    /// # }
    /// # #[derive(GridObject)]
    /// # #[grid_object(active = |_| true)]
    /// # struct Beacon {
    /// #     #[grid_ref]
    /// #     grid_ref: GridRef<Self>,
    /// # }
    /// let grid = Grid::<Player, (Player,), (Beacon,)>::new();
    /// let beacon = Rc::new(Beacon { grid_ref: GridRef::new() });
    /// grid.grid_objects().collection::<Beacon, _>().insert(&beacon);
    /// ```
    pub fn grid_objects(&self) -> &Store<L> { &self.local }

    /// Returns whether this grid contains no objects.
    pub fn is_empty(&self) -> bool { self.world.is_empty() && self.local.is_empty() }

    /// Lets `loader` populate this grid.
    pub fn load_with(&mut self, loader: &mut impl Loader<A, W, L>) {
        let before = self.local.len() + self.world.len();
        loader.load(&mut Populate::new(self));
        log::debug!(
            "Loaded grid, {} objects before, {} objects after",
            before,
            self.local.len() + self.world.len()
        );
    }

    /// Lets `loader` depopulate this grid.
    pub fn unload_with(&mut self, loader: &mut impl Loader<A, W, L>) {
        let before = self.local.len() + self.world.len();
        loader.unload(&mut Depopulate::new(self));
        log::debug!(
            "Unloaded grid, {} objects before, {} objects after",
            before,
            self.local.len() + self.world.len()
        );
    }

    fn clear_world(&mut self) -> usize { self.world.clear() }

    fn clear_grid(&mut self) -> usize { self.local.clear() }
}

impl<A, W, L, T, I> Located<T, InWorld<I>> for Grid<A, W, L>
where
    W: TypeSet + Member<T, I>,
    L: TypeSet,
{
    fn locate(&self) -> &Collection<T> { self.world.collection::<T, I>() }
}

impl<A, W, L, T, I> Located<T, InGrid<I>> for Grid<A, W, L>
where
    W: TypeSet,
    L: TypeSet + Member<T, I>,
{
    fn locate(&self) -> &Collection<T> { self.local.collection::<T, I>() }
}

impl<A, W: TypeSet, L: TypeSet> fmt::Debug for Grid<A, W, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("active_type", &any::type_name::<A>())
            .field("world", &self.world)
            .field("local", &self.local)
            .field("active", &self.local.active_len())
            .finish()
    }
}

static_assertions::assert_not_impl_any!(Grid<u8, (u8,), (u16,)>: Send, Sync);
