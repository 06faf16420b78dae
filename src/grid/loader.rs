use std::rc::Rc;

use super::Grid;
use crate::type_set::{Member, TypeSet};
use crate::GridObject;

/// Populates and depopulates grids when they are loaded and unloaded.
///
/// A loader only receives restricted access to the grid
/// through the [`Populate`] and [`Depopulate`] capabilities,
/// which can only be obtained from [`Grid::load_with`] and [`Grid::unload_with`].
pub trait Loader<A: 'static, W: TypeSet, L: TypeSet> {
    /// Adds the initial objects of a newly loaded grid.
    fn load(&mut self, populate: &mut Populate<'_, A, W, L>);

    /// Removes the objects of a grid being unloaded.
    ///
    /// The default implementation removes every object.
    fn unload(&mut self, depopulate: &mut Depopulate<'_, A, W, L>) { depopulate.clear(); }
}

/// The capability to add objects to a grid being loaded.
pub struct Populate<'g, A, W: TypeSet, L: TypeSet> {
    grid: &'g mut Grid<A, W, L>,
}

impl<'g, A: 'static, W: TypeSet, L: TypeSet> Populate<'g, A, W, L> {
    pub(super) fn new(grid: &'g mut Grid<A, W, L>) -> Self { Self { grid } }

    /// Adds a world object, see [`Grid::add_world_object`].
    pub fn add_world_object<T: GridObject, I>(&mut self, object: &Rc<T>) -> bool
    where
        W: Member<T, I>,
    {
        self.grid.add_world_object(object)
    }

    /// Adds a grid-local object, see [`Grid::add_grid_object`].
    pub fn add_grid_object<T: GridObject, I>(&mut self, object: &Rc<T>) -> bool
    where
        L: Member<T, I>,
    {
        self.grid.add_grid_object(object)
    }

    /// Adds world objects in bulk, returning the number of objects added.
    pub fn extend_world<'o, T: GridObject, I>(
        &mut self,
        objects: impl IntoIterator<Item = &'o Rc<T>>,
    ) -> usize
    where
        W: Member<T, I>,
    {
        objects.into_iter().filter(|object| self.grid.add_world_object(object)).count()
    }

    /// Adds grid-local objects in bulk, returning the number of objects added.
    pub fn extend_grid<'o, T: GridObject, I>(
        &mut self,
        objects: impl IntoIterator<Item = &'o Rc<T>>,
    ) -> usize
    where
        L: Member<T, I>,
    {
        objects.into_iter().filter(|object| self.grid.add_grid_object(object)).count()
    }
}

/// The capability to remove objects from a grid being unloaded.
pub struct Depopulate<'g, A, W: TypeSet, L: TypeSet> {
    grid: &'g mut Grid<A, W, L>,
}

impl<'g, A: 'static, W: TypeSet, L: TypeSet> Depopulate<'g, A, W, L> {
    pub(super) fn new(grid: &'g mut Grid<A, W, L>) -> Self { Self { grid } }

    /// Returns the grid being unloaded.
    pub fn grid(&self) -> &Grid<A, W, L> { &*self.grid }

    /// Removes a world object, see [`Grid::remove_world_object`].
    pub fn remove_world_object<T: GridObject, I>(&mut self, object: &T) -> bool
    where
        W: Member<T, I>,
    {
        self.grid.remove_world_object(object)
    }

    /// Removes a grid-local object, see [`Grid::remove_grid_object`].
    pub fn remove_grid_object<T: GridObject, I>(&mut self, object: &T) -> bool
    where
        L: Member<T, I>,
    {
        self.grid.remove_grid_object(object)
    }

    /// Removes every world object, returning the number of objects removed.
    pub fn clear_world(&mut self) -> usize { self.grid.clear_world() }

    /// Removes every grid-local object, returning the number of objects removed.
    pub fn clear_grid(&mut self) -> usize { self.grid.clear_grid() }

    /// Removes every object, returning the number of objects removed.
    pub fn clear(&mut self) -> usize { self.clear_world() + self.clear_grid() }
}
