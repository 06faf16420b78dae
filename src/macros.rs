/// Derives the [`GridObject`](trait@crate::GridObject) trait for a struct.
///
/// Exactly one field must be marked with `#[grid_ref]`,
/// and that field must be of type [`GridRef<Self>`](crate::GridRef).
///
/// # Options
/// Options are applied behind the `#[grid_object(...)]` attribute on the struct.
/// Multiple options are separated by commas.
///
/// ## `active = expr`
/// Implements [`GridObject::is_active_object`](crate::GridObject::is_active_object)
/// with `expr`, which must be coercible to `fn(&Self) -> bool`.
/// Without this option, the object is never active.
///
/// ## `gridstore_as(path)`
/// Overrides the path to the `gridstore` crate,
/// e.g. `gridstore_as(crate)` inside the crate itself.
///
/// # Example
/// ```
/// use std::cell::Cell;
///
/// use gridstore::{GridObject, GridRef};
///
/// #[derive(GridObject)]
/// #[grid_object(active = |monster: &Monster| monster.hostile.get())]
/// struct Monster {
///     #[grid_ref]
///     grid_ref: GridRef<Self>,
///     hostile:  Cell<bool>,
/// }
///
/// let monster = Monster { grid_ref: GridRef::new(), hostile: Cell::new(true) };
/// assert!(monster.is_active_object());
/// monster.hostile.set(false);
/// assert!(!monster.is_active_object());
///
/// #[derive(GridObject)]
/// struct Tombstone(#[grid_ref] GridRef<Tombstone>, &'static str);
///
/// let tombstone = Tombstone(GridRef::new(), "here lies a monster");
/// assert!(!tombstone.is_active_object());
/// assert!(!tombstone.grid_ref().is_linked());
/// ```
///
/// Forgetting the back-reference is a compile error:
/// ```compile_fail
/// #[derive(gridstore::GridObject)]
/// struct Rock {
///     weight: u32,
/// }
/// ```
///
/// So is marking more than one back-reference:
/// ```compile_fail
/// use gridstore::GridRef;
///
/// #[derive(gridstore::GridObject)]
/// struct Twin {
///     #[grid_ref]
///     left:  GridRef<Self>,
///     #[grid_ref]
///     right: GridRef<Self>,
/// }
/// ```
///
/// Only structs can be grid objects:
/// ```compile_fail
/// use gridstore::GridRef;
///
/// #[derive(gridstore::GridObject)]
/// enum Weather {
///     Rain(#[grid_ref] GridRef<Weather>),
///     Sun,
/// }
/// ```
///
/// Unknown options are rejected:
/// ```compile_fail
/// use gridstore::GridRef;
///
/// #[derive(gridstore::GridObject)]
/// #[grid_object(passive = |_| true)]
/// struct Statue {
///     #[grid_ref]
///     grid_ref: GridRef<Self>,
/// }
/// ```
#[doc(inline)]
pub use gridstore_codegen::GridObject;
