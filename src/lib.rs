//! Compile-time heterogeneous object containers for spatial grids.
//!
//! A game world is split into grids, and every grid holds the objects currently located in it.
//! Object kinds are fixed at compile time as *type sets*,
//! i.e. tuples of distinct types such as `(Player, Creature)`.
//! Containers hold one collection per member type,
//! and every typed operation resolves its collection statically,
//! so using a type that a container does not hold is a compile error.
//!
//! # Ownership
//! Containers never own objects.
//! Objects are shared as `Rc<T>` and embed a [`GridRef<Self>`](GridRef)
//! that records which collection slot currently holds them.
//! Removal is O(1) through this back-reference,
//! and dropping an object removes it from its container automatically.
//! An object is a member of at most one collection at a time;
//! inserting an object that is still linked elsewhere is refused.
//!
//! # Containers
//! - [`Store<S>`](Store) holds the objects of every type in `S`.
//! - [`KeyedStore<S, K>`](KeyedStore) maps keys to objects of every type in `S`.
//! - [`Grid<A, W, L>`](Grid) combines a world store for objects that move between grids,
//!   a grid-local store for objects that stay in one grid,
//!   and the bookkeeping of active objects.
//!
//! Containers are inspected with statically dispatched [visitors](visit).
//!
//! # Example
//! ```
//! use std::rc::Rc;
//!
//! use gridstore::{Grid, GridObject, GridRef};
//!
//! #[derive(GridObject)]
//! struct Player {
//!     #[grid_ref]
//!     grid_ref: GridRef<Self>,
//! }
//!
//! #[derive(GridObject)]
//! #[grid_object(active = |_| true)]
//! struct Spawner {
//!     #[grid_ref]
//!     grid_ref: GridRef<Self>,
//! }
//!
//! type MyGrid = Grid<Player, (Player,), (Spawner,)>;
//!
//! let mut g1 = MyGrid::new();
//! let mut g2 = MyGrid::new();
//!
//! let player = Rc::new(Player { grid_ref: GridRef::new() });
//! assert!(g1.add_world_object(&player));
//! // still linked into g1
//! assert!(!g2.add_world_object(&player));
//!
//! assert!(g1.remove_world_object(&*player));
//! assert!(g2.add_world_object(&player));
//! assert_eq!(g2.active_objects_in_grid(), 1);
//!
//! let spawner = Rc::new(Spawner { grid_ref: GridRef::new() });
//! g1.add_grid_object(&spawner);
//! assert_eq!(g1.active_objects_in_grid(), 1);
//!
//! drop(spawner);
//! assert!(g1.is_empty());
//! assert_eq!(g1.active_objects_in_grid(), 0);
//! ```

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

mod macros;
#[doc(inline)]
pub use macros::*;

pub mod collection;
pub use collection::Collection;

pub mod error;
pub use error::{Error, Result};

pub mod grid;
pub use grid::{Grid, Loader};

pub mod keyed;
pub use keyed::KeyedStore;

pub mod link;
pub use link::GridRef;

mod object;
pub use object::GridObject;

pub mod store;
pub use store::Store;

#[cfg(any(test, feature = "internal-bench"))]
pub mod test_util;

pub mod type_set;
pub use type_set::TypeSet;

pub mod visit;
pub use visit::Visit;
