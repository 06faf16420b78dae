#![allow(missing_docs)]

use std::cell::Cell;
use std::rc::Rc;

use parking_lot::Once;

use crate::{Grid, GridRef};

pub(crate) fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

// Test object summary:
// Player: world, the active type of TestGrid
// Monster: world
// Pet: world
// GameObject: grid-local, never active
// Corpse: grid-local, never active
// DynamicObject: grid-local, active while `active` is set

/// A world object that keeps grids active.
#[derive(Debug, gridstore_codegen::GridObject)]
#[grid_object(gridstore_as(crate))]
pub struct Player {
    #[grid_ref]
    pub grid_ref: GridRef<Self>,
    pub id:       u32,
}

impl Player {
    pub fn new(id: u32) -> Rc<Self> { Rc::new(Self { grid_ref: GridRef::new(), id }) }
}

/// A world object.
#[derive(Debug, gridstore_codegen::GridObject)]
#[grid_object(gridstore_as(crate))]
pub struct Monster {
    #[grid_ref]
    pub grid_ref: GridRef<Self>,
    pub id:       u32,
    pub health:   Cell<u32>,
}

impl Monster {
    pub fn new(id: u32) -> Rc<Self> {
        Rc::new(Self { grid_ref: GridRef::new(), id, health: Cell::new(10) })
    }
}

/// A world object declared as a tuple struct.
#[derive(Debug, gridstore_codegen::GridObject)]
#[grid_object(gridstore_as(crate))]
pub struct Pet(#[grid_ref] pub GridRef<Pet>, pub u32);

impl Pet {
    pub fn new(id: u32) -> Rc<Self> { Rc::new(Self(GridRef::new(), id)) }
}

/// A grid-local object.
#[derive(Debug, gridstore_codegen::GridObject)]
#[grid_object(gridstore_as(crate))]
pub struct GameObject {
    #[grid_ref]
    pub grid_ref: GridRef<Self>,
    pub id:       u32,
}

impl GameObject {
    pub fn new(id: u32) -> Rc<Self> { Rc::new(Self { grid_ref: GridRef::new(), id }) }
}

/// A grid-local object.
#[derive(Debug, gridstore_codegen::GridObject)]
#[grid_object(gridstore_as(crate))]
pub struct Corpse {
    #[grid_ref]
    pub grid_ref: GridRef<Self>,
    pub id:       u32,
}

impl Corpse {
    pub fn new(id: u32) -> Rc<Self> { Rc::new(Self { grid_ref: GridRef::new(), id }) }
}

/// A grid-local object whose activeness can change over time.
#[derive(Debug, gridstore_codegen::GridObject)]
#[grid_object(gridstore_as(crate), active = DynamicObject::is_active)]
pub struct DynamicObject {
    #[grid_ref]
    pub grid_ref: GridRef<Self>,
    pub id:       u32,
    pub active:   Cell<bool>,
}

impl DynamicObject {
    pub fn new(id: u32, active: bool) -> Rc<Self> {
        Rc::new(Self { grid_ref: GridRef::new(), id, active: Cell::new(active) })
    }

    fn is_active(&self) -> bool { self.active.get() }
}

pub type WorldTypes = (Player, Monster, Pet);
pub type GridTypes = (GameObject, Corpse, DynamicObject);

/// The default test grid.
pub type TestGrid = Grid<Player, WorldTypes, GridTypes>;

/// An operation applied in randomized tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Op {
    AddWorld,
    RemoveWorld,
    AddGrid,
    RemoveGrid,
    Drop,
    ToggleActive,
}

impl Op {
    /// Selects an operation from a random number.
    pub fn from_random(random: usize) -> Self {
        use strum::IntoEnumIterator;

        let ops: Vec<Self> = Self::iter().collect();
        ops[random % ops.len()]
    }
}
